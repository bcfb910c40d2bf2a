//! RSDK v4 data file container (`RSDKvB`)
//!
//! The data file packs every asset of a game into one archive. Entries carry
//! no plaintext names: each is identified by the MD5 hash of its lowercased,
//! forward-slash path, and a reader recovers names by hashing a list of
//! candidate paths supplied by the caller.
//!
//! # Format Overview
//!
//! ```text
//! +--------------------+
//! | "RSDKvB"   6 bytes |
//! | entry_count   u16  |
//! +--------------------+
//! | entry record × N   |  24 bytes each:
//! |   name hash   16   |    MD5, each 32-bit word byte-reversed
//! |   offset      u32  |    absolute payload offset
//! |   size|flags  u32  |    bit 31 = encrypted, bits 0-30 = length
//! +--------------------+
//! | payloads           |  contiguous, in table order
//! +--------------------+
//! ```
//!
//! All integers are little-endian. Encrypted payloads use
//! [`rsdk_crypto::DataFileCipher`], keyed by the payload length.
//!
//! # Usage
//!
//! ```rust
//! use rsdk_formats::datafile::{DataFile, DataFileOptions};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut file = DataFile::new();
//! file.add_file("Data/Game/GameConfig.bin", b"config".to_vec(), false);
//! file.add_file("Data/Music/Title.ogg", b"Oggs...".to_vec(), true);
//!
//! let bytes = file.build()?;
//!
//! // Without names, entries are named after their content
//! let anonymous = DataFile::parse(&bytes)?;
//! assert_eq!(anonymous.entries()[1].name(), "Music2.ogg");
//!
//! // With a name list, real paths are recovered
//! let options = DataFileOptions::new().with_names(["Data/Music/Title.ogg"]);
//! let named = DataFile::parse_with(&bytes, &options)?;
//! assert_eq!(named.entries()[1].name(), "Data/Music/Title.ogg");
//! assert_eq!(named.get_file_data("data\\music\\title.ogg")?, b"Oggs...");
//! # Ok(())
//! # }
//! ```

mod config;
mod entry;
mod error;
mod extension;
mod file;
mod identity;
mod version;

pub use config::DataFileOptions;
pub use entry::{DataFileEntry, ENCRYPTED_FLAG, ENTRY_HEADER_SIZE, EntryHeader, SIZE_MASK};
pub use error::{DataFileError, Result};
pub use extension::ExtensionType;
pub use file::{DataFile, DataFileHeader, HEADER_SIZE};
pub use identity::NameIdentifier;
pub use version::DataFileVersion;
