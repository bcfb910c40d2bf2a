//! Payload type sniffing for entries whose name could not be recovered

use std::fmt;

/// Asset type detected from the first bytes of a decoded payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ExtensionType {
    /// No known signature matched
    #[default]
    Unknown,
    /// Ogg Vorbis music (`Oggs`)
    Ogg,
    /// RIFF WAVE sound effect (`RIFF`)
    Wav,
    /// Retro Engine 3D model (`R3D\0`)
    Mdl,
    /// PNG image (`PNG` at offset 0)
    Png,
    /// GIF sprite sheet (`GIF`)
    Gif,
}

/// Checked in order; first match wins
const SIGNATURES: [(&[u8], ExtensionType); 5] = [
    (b"Oggs", ExtensionType::Ogg),
    (b"GIF", ExtensionType::Gif),
    (b"R3D\0", ExtensionType::Mdl),
    (b"PNG", ExtensionType::Png),
    (b"RIFF", ExtensionType::Wav),
];

impl ExtensionType {
    /// Classify a payload by its leading magic bytes
    pub fn classify(data: &[u8]) -> Self {
        SIGNATURES
            .iter()
            .find(|&&(magic, _)| data.starts_with(magic))
            .map_or(Self::Unknown, |&(_, extension)| extension)
    }

    /// File suffix used when synthesizing a name
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Ogg => "ogg",
            Self::Wav => "wav",
            Self::Png => "png",
            Self::Gif => "gif",
            Self::Mdl | Self::Unknown => "bin",
        }
    }

    /// Name stem describing what kind of asset this is
    pub const fn stem(self) -> &'static str {
        match self {
            Self::Unknown => "UnknownFileType",
            Self::Ogg => "Music",
            Self::Wav => "SoundEffect",
            Self::Mdl => "Model",
            Self::Png => "Image",
            Self::Gif => "Sprite",
        }
    }

    /// Synthesize a display name for the entry at table position `ordinal`.
    ///
    /// Names are one-based, so the first entry of an unknown type becomes
    /// `UnknownFileType1.bin`.
    pub fn fallback_name(self, ordinal: usize) -> String {
        format!("{}{}.{}", self.stem(), ordinal + 1, self.extension())
    }
}

impl fmt::Display for ExtensionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}
