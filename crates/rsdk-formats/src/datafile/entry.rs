//! Data file entry table records and payloads

use crate::datafile::error::{DataFileError, Result};
use crate::datafile::extension::ExtensionType;
use crate::datafile::identity::NameIdentifier;
use binrw::{BinRead, BinWrite};
use rsdk_crypto::{DataFileCipher, Direction, NameHash};
use std::borrow::Cow;
use std::io::{Read, Seek, SeekFrom, Write};
use tracing::{debug, trace};

/// Size of one entry table record in bytes
pub const ENTRY_HEADER_SIZE: usize = 24;

/// Bit 31 of the size field marks an encrypted payload
pub const ENCRYPTED_FLAG: u32 = 0x8000_0000;

/// Bits 0-30 of the size field hold the payload length
pub const SIZE_MASK: u32 = 0x7FFF_FFFF;

/// One record of the entry table (24 bytes).
///
/// The name hash is stored with each 32-bit word byte-reversed.
#[derive(BinRead, BinWrite, Debug, Clone, Copy, PartialEq, Eq)]
#[brw(little)]
pub struct EntryHeader {
    /// MD5 of the normalized entry path
    #[br(map = |stored: [u8; 16]| NameHash::from_le_words(stored))]
    #[bw(map = |hash: &NameHash| hash.to_le_words())]
    pub name_hash: NameHash,
    /// Absolute offset of the payload
    pub offset: u32,
    /// Payload length in bits 0-30, encryption flag in bit 31
    pub size_and_flags: u32,
}

impl EntryHeader {
    /// Create a header, packing the encryption flag into the size field
    pub const fn new(name_hash: NameHash, offset: u32, size: u32, encrypted: bool) -> Self {
        let flag = if encrypted { ENCRYPTED_FLAG } else { 0 };
        Self {
            name_hash,
            offset,
            size_and_flags: (size & SIZE_MASK) | flag,
        }
    }

    /// Payload length in bytes
    pub const fn size(&self) -> u32 {
        self.size_and_flags & SIZE_MASK
    }

    /// Whether the payload is encrypted
    pub const fn is_encrypted(&self) -> bool {
        self.size_and_flags & ENCRYPTED_FLAG != 0
    }
}

/// A single asset stored in a data file.
///
/// The payload is always held decrypted; encryption is applied when the entry
/// is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataFileEntry {
    identity: NameIdentifier,
    encrypted: bool,
    data: Vec<u8>,
    extension: ExtensionType,
    offset: u32,
    /// Content-derived name, only set while the identity is unresolved
    fallback_name: Option<String>,
}

impl DataFileEntry {
    /// Create an entry from a known path
    pub fn new(name: impl Into<String>, data: Vec<u8>, encrypted: bool) -> Self {
        Self::with_identity(NameIdentifier::from_name(name), data, encrypted)
    }

    /// Create an entry from a bare name hash
    pub fn from_hash(hash: NameHash, data: Vec<u8>, encrypted: bool) -> Self {
        Self::with_identity(NameIdentifier::from_hash(hash), data, encrypted)
    }

    /// Create an entry from an existing identity
    pub fn with_identity(identity: NameIdentifier, data: Vec<u8>, encrypted: bool) -> Self {
        Self {
            identity,
            encrypted,
            extension: ExtensionType::classify(&data),
            data,
            offset: 0,
            fallback_name: None,
        }
    }

    /// Read an entry table record and its payload.
    ///
    /// `ordinal` is the entry's position in the table and is only used to
    /// synthesize a name when none of `candidates` matches. The reader is left
    /// positioned just after the record.
    pub fn read<R, S>(
        reader: &mut R,
        candidates: &[S],
        ordinal: usize,
        stream_len: u64,
    ) -> Result<Self>
    where
        R: Read + Seek,
        S: AsRef<str>,
    {
        let header = EntryHeader::read_le(reader)?;

        let mut identity = NameIdentifier::from_hash(header.name_hash);
        let resolved = identity.resolve(candidates);

        let size = header.size();
        if u64::from(header.offset) + u64::from(size) > stream_len {
            return Err(DataFileError::EntryOutOfBounds {
                index: ordinal,
                offset: header.offset,
                size,
                stream_len,
            });
        }

        let resume = reader.stream_position()?;
        reader.seek(SeekFrom::Start(u64::from(header.offset)))?;
        let mut data = vec![0u8; size as usize];
        reader.read_exact(&mut data)?;
        if header.is_encrypted() {
            DataFileCipher::apply_in_place(&mut data, Direction::Decrypt);
        }
        reader.seek(SeekFrom::Start(resume))?;

        let extension = ExtensionType::classify(&data);
        let fallback_name = if resolved {
            None
        } else {
            let name = extension.fallback_name(ordinal);
            debug!(
                "Entry {} hash {} not in candidate list, naming it {}",
                ordinal,
                identity.hash(),
                name
            );
            Some(name)
        };

        trace!(
            "Read entry {}: offset={} size={} encrypted={} extension={}",
            ordinal,
            header.offset,
            size,
            header.is_encrypted(),
            extension
        );

        Ok(Self {
            identity,
            encrypted: header.is_encrypted(),
            data,
            extension,
            offset: header.offset,
            fallback_name,
        })
    }

    /// Payload length as stored in the size field
    pub(crate) fn stored_size(&self) -> Result<u32> {
        u32::try_from(self.data.len())
            .ok()
            .filter(|&size| size <= SIZE_MASK)
            .ok_or_else(|| DataFileError::EntryTooLarge {
                name: self.name().into_owned(),
                size: self.data.len(),
            })
    }

    /// Build the table record for this entry at `offset`
    pub fn header(&self, offset: u32) -> Result<EntryHeader> {
        Ok(EntryHeader::new(
            self.identity.stored_hash(),
            offset,
            self.stored_size()?,
            self.encrypted,
        ))
    }

    /// Write the 24-byte table record with the given payload offset
    pub fn write_header<W: Write + Seek>(&self, writer: &mut W, offset: u32) -> Result<()> {
        self.header(offset)?.write_le(writer)?;
        Ok(())
    }

    /// Write the payload, encrypting it if the entry is flagged
    pub fn write_data<W: Write>(&self, writer: &mut W) -> Result<()> {
        if self.encrypted {
            writer.write_all(&DataFileCipher::encrypt(&self.data))?;
        } else {
            writer.write_all(&self.data)?;
        }
        Ok(())
    }

    /// Try to recover this entry's real name from `candidates`
    pub fn resolve<S: AsRef<str>>(&mut self, candidates: &[S]) -> bool {
        let resolved = self.identity.resolve(candidates);
        if resolved {
            self.fallback_name = None;
        }
        resolved
    }

    /// Best available name: the real path, the content-derived name, or the
    /// hash in hex
    pub fn name(&self) -> Cow<'_, str> {
        match (self.identity.name(), &self.fallback_name) {
            (Some(name), _) => Cow::Borrowed(name),
            (None, Some(fallback)) => Cow::Borrowed(fallback),
            (None, None) => Cow::Owned(self.identity.hash().to_hex()),
        }
    }

    /// Whether the real path of this entry is known
    pub const fn is_resolved(&self) -> bool {
        self.identity.is_resolved()
    }

    /// Identity of the entry
    pub const fn identity(&self) -> &NameIdentifier {
        &self.identity
    }

    /// Decrypted payload
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Take ownership of the decrypted payload
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Replace the payload and re-classify it
    pub fn set_data(&mut self, data: Vec<u8>) {
        self.extension = ExtensionType::classify(&data);
        self.data = data;
    }

    /// Payload length in bytes
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the payload is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Whether the payload is encrypted on disk
    pub const fn is_encrypted(&self) -> bool {
        self.encrypted
    }

    /// Set whether the payload is encrypted on disk
    pub fn set_encrypted(&mut self, encrypted: bool) {
        self.encrypted = encrypted;
    }

    /// Type detected from the payload's leading bytes
    pub const fn extension(&self) -> ExtensionType {
        self.extension
    }

    /// Payload offset from the last read or write
    pub const fn offset(&self) -> u32 {
        self.offset
    }

    pub(crate) fn set_offset(&mut self, offset: u32) {
        self.offset = offset;
    }
}
