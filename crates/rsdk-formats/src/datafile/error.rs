//! Error types for the data file format

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when reading, writing or querying a data file
#[derive(Debug, Error)]
pub enum DataFileError {
    /// Invalid signature (expected "RSDKvB")
    #[error("Invalid data file signature: expected 'RSDKvB', got {0:02x?}")]
    InvalidSignature([u8; 6]),

    /// An entry's payload region does not fit inside the stream
    #[error(
        "Entry {index} out of bounds: offset {offset} + size {size} exceeds stream length {stream_len}"
    )]
    EntryOutOfBounds {
        /// Table position of the entry
        index: usize,
        /// Stored payload offset
        offset: u32,
        /// Stored payload size
        size: u32,
        /// Total length of the stream
        stream_len: u64,
    },

    /// Lookup by name found no entry
    #[error("File not found in data file: {0}")]
    FileNotFound(String),

    /// The entry table count is a 16-bit field
    #[error("Too many entries: {0} (maximum is 65535)")]
    TooManyEntries(usize),

    /// Payload sizes are 31-bit fields; the top bit is the encryption flag
    #[error("Entry '{name}' is too large: {size} bytes (maximum is 2147483647)")]
    EntryTooLarge {
        /// Display name of the entry
        name: String,
        /// Payload size in bytes
        size: usize,
    },

    /// Payload offsets are 32-bit fields
    #[error("Payload offset {0} does not fit in 32 bits")]
    OffsetOverflow(u64),

    /// A candidate name list could not be read
    #[error("Failed to read name list {path}: {source}")]
    NameList {
        /// Path of the name list file
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Options document could not be parsed
    #[error("Invalid options: {0}")]
    InvalidOptions(#[from] serde_json::Error),

    /// Binary read/write error
    #[error("Binary parsing error: {0}")]
    BinRead(String),

    /// IO error during parsing or building
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<binrw::Error> for DataFileError {
    fn from(e: binrw::Error) -> Self {
        match e {
            binrw::Error::Backtrace(backtrace) => Self::from(*backtrace.error),
            binrw::Error::Io(io) => Self::Io(io),
            other => Self::BinRead(other.to_string()),
        }
    }
}

/// Result type alias for data file operations
pub type Result<T> = std::result::Result<T, DataFileError>;
