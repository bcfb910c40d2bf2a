//! Data file format versions

use std::fmt;

/// Known data file container versions.
///
/// Each version is identified by the signature at the start of the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataFileVersion {
    /// Fourth-generation container (`RSDKvB`)
    V4,
}

impl DataFileVersion {
    /// Every version this crate can read and write
    pub const ALL: [Self; 1] = [Self::V4];

    /// Signature bytes written at offset 0
    pub const fn signature(self) -> &'static [u8; 6] {
        match self {
            Self::V4 => b"RSDKvB",
        }
    }

    /// Identify the container version from the leading bytes of a file
    pub fn detect(data: &[u8]) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|version| data.starts_with(version.signature()))
    }
}

impl fmt::Display for DataFileVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::V4 => f.write_str("RSDKv4"),
        }
    }
}
