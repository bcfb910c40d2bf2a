//! MD5 hashing for archive entry names

use binrw::{BinRead, BinWrite};
use md5::{Digest, Md5};
use std::fmt;

/// Normalize an asset path the way the engine does before hashing.
///
/// Backslashes become forward slashes and the whole path is lowercased with
/// Unicode rules, so `Data\Sprites\Title.gif` and `data/sprites/title.gif`
/// name the same entry. Non-ASCII characters left after lowercasing hash as
/// `?`.
pub fn normalize_name(name: &str) -> String {
    name.replace('\\', "/").to_lowercase()
}

/// Encode text as the engine's ASCII byte string.
///
/// Characters outside ASCII are replaced by `?`, as an ASCII text encoder
/// does.
fn ascii_bytes(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| if c.is_ascii() { c as u8 } else { b'?' })
        .collect()
}

/// Reverse the byte order inside each 4-byte word of a 16-byte block.
const fn swap_words(bytes: [u8; 16]) -> [u8; 16] {
    let mut out = [0u8; 16];
    let mut word = 0;
    while word < 16 {
        out[word] = bytes[word + 3];
        out[word + 1] = bytes[word + 2];
        out[word + 2] = bytes[word + 1];
        out[word + 3] = bytes[word];
        word += 4;
    }
    out
}

/// Name hash (MD5 digest) identifying an entry in a data file
#[derive(BinRead, BinWrite, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NameHash([u8; 16]);

impl NameHash {
    /// Create name hash from raw digest bytes
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    /// Create name hash from arbitrary data by computing its MD5 digest
    pub fn from_data(data: &[u8]) -> Self {
        let mut hasher = Md5::new();
        hasher.update(data);
        let result = hasher.finalize();
        let mut bytes = [0u8; 16];
        bytes.copy_from_slice(&result);
        Self(bytes)
    }

    /// Hash an asset name after normalizing it with [`normalize_name`]
    pub fn from_name(name: &str) -> Self {
        Self::from_data(&ascii_bytes(&normalize_name(name)))
    }

    /// Create name hash from its on-disk form.
    ///
    /// Data files store each 32-bit word of the digest byte-reversed.
    pub const fn from_le_words(stored: [u8; 16]) -> Self {
        Self(swap_words(stored))
    }

    /// Convert to the on-disk form (each 32-bit word byte-reversed)
    pub const fn to_le_words(&self) -> [u8; 16] {
        swap_words(self.0)
    }

    /// Parse name hash from hex string
    pub fn from_hex(hex: &str) -> Result<Self, hex::FromHexError> {
        let mut bytes = [0u8; 16];
        hex::decode_to_slice(hex, &mut bytes)?;
        Ok(Self(bytes))
    }

    /// Get raw bytes
    pub const fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }

    /// Convert to lowercase hex string
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for NameHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl From<[u8; 16]> for NameHash {
    fn from(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }
}
