//! Cryptographic primitives for RSDK v4 data files
//!
//! This crate provides the two pieces of cryptography used by the `RSDKvB`
//! archive container:
//!
//! - **Name hashing**: MD5 digests of normalized asset paths, which are the
//!   only identity an archive entry carries on disk
//! - **Data file cipher**: the length-keyed nibble-swapping XOR stream cipher
//!   applied to encrypted entries
//!
//! # Examples
//!
//! ## Name Hash
//!
//! ```
//! use rsdk_crypto::NameHash;
//!
//! let hash = NameHash::from_name("Data\\Music\\Title.ogg");
//! assert_eq!(hash, NameHash::from_name("data/music/title.ogg"));
//! println!("Name hash: {}", hash);
//! ```
//!
//! ## Encrypting a Payload
//!
//! ```
//! use rsdk_crypto::DataFileCipher;
//!
//! let plaintext = b"Hello, World!";
//! let ciphertext = DataFileCipher::encrypt(plaintext);
//! assert_eq!(DataFileCipher::decrypt(&ciphertext), plaintext);
//! ```

#![warn(missing_docs)]

pub mod datafile_cipher;
pub mod md5;

// Re-export commonly used types
pub use datafile_cipher::{DataFileCipher, Direction, KeySchedule, derive_key};
pub use md5::{NameHash, normalize_name};
