//! Data file container: signature, entry table and payload layout

use crate::datafile::config::DataFileOptions;
use crate::datafile::entry::{DataFileEntry, ENTRY_HEADER_SIZE};
use crate::datafile::error::{DataFileError, Result};
use crate::datafile::version::DataFileVersion;
use binrw::{BinRead, BinWrite};
use rsdk_crypto::NameHash;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Cursor, Read, Seek, SeekFrom, Write};
use std::path::Path;
use tracing::debug;

/// Size of the container header (signature + entry count)
pub const HEADER_SIZE: usize = 8;

/// Container header: 6-byte signature and 16-bit entry count
#[derive(BinRead, BinWrite, Debug, Clone, Copy, PartialEq, Eq)]
#[brw(little)]
pub struct DataFileHeader {
    /// Signature bytes ("RSDKvB")
    pub signature: [u8; 6],
    /// Number of entry table records that follow
    pub entry_count: u16,
}

impl DataFileHeader {
    /// Create a v4 header
    pub const fn new(entry_count: u16) -> Self {
        Self {
            signature: *DataFileVersion::V4.signature(),
            entry_count,
        }
    }

    /// Container version named by the signature
    pub fn version(&self) -> Option<DataFileVersion> {
        DataFileVersion::detect(&self.signature)
    }

    /// Validate the signature
    pub fn validate(&self) -> Result<DataFileVersion> {
        self.version()
            .ok_or(DataFileError::InvalidSignature(self.signature))
    }
}

/// An RSDK v4 data file.
///
/// Entries keep their table order across a read/write cycle. Lookups hash the
/// requested path and return the first entry with a matching hash.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataFile {
    entries: Vec<DataFileEntry>,
}

impl DataFile {
    /// Create an empty data file
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a data file, resolving names from `options.candidate_names`.
    ///
    /// Entry offsets are absolute positions in `reader`.
    pub fn read<R: Read + Seek>(reader: &mut R, options: &DataFileOptions) -> Result<Self> {
        let start = reader.stream_position()?;
        let stream_len = reader.seek(SeekFrom::End(0))?;
        reader.seek(SeekFrom::Start(start))?;

        let header = DataFileHeader::read_le(reader)?;
        header.validate()?;

        debug!(
            "Reading data file: {} entries, {} candidate names",
            header.entry_count,
            options.candidate_names.len()
        );

        let mut entries = Vec::with_capacity(usize::from(header.entry_count));
        for ordinal in 0..usize::from(header.entry_count) {
            entries.push(DataFileEntry::read(
                reader,
                &options.candidate_names,
                ordinal,
                stream_len,
            )?);
        }

        let resolved = entries.iter().filter(|e| e.is_resolved()).count();
        debug!(
            "Read {} entries ({} named, {} unresolved)",
            entries.len(),
            resolved,
            entries.len() - resolved
        );

        Ok(Self { entries })
    }

    /// Parse a data file from bytes without any candidate names
    pub fn parse(data: &[u8]) -> Result<Self> {
        Self::parse_with(data, &DataFileOptions::default())
    }

    /// Parse a data file from bytes with the given options
    pub fn parse_with(data: &[u8], options: &DataFileOptions) -> Result<Self> {
        Self::read(&mut Cursor::new(data), options)
    }

    /// Open and read a data file from disk
    pub fn open<P: AsRef<Path>>(path: P, options: &DataFileOptions) -> Result<Self> {
        let mut reader = BufReader::new(File::open(path)?);
        Self::read(&mut reader, options)
    }

    /// Write the data file.
    ///
    /// Layout is done in two passes. Payload offsets are computed and checked
    /// up front. The first pass writes the header, every entry record with a
    /// zero offset, and a zero-filled region per payload. The second seeks
    /// back, rewrites the header and records with the real offsets, and fills
    /// each region with its (possibly encrypted) payload. Entry offsets are
    /// updated to the written values and the writer is left at the end of the
    /// last payload.
    pub fn write<W: Write + Seek>(&mut self, writer: &mut W) -> Result<()> {
        let offsets = self.write_layout(writer)?;
        for (entry, offset) in self.entries.iter_mut().zip(offsets) {
            entry.set_offset(offset);
        }
        Ok(())
    }

    /// Serialize the data file to bytes
    pub fn build(&self) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        self.write_layout(&mut Cursor::new(&mut buffer))?;
        Ok(buffer)
    }

    /// Write the data file to disk
    pub fn save<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.write(&mut writer)?;
        writer.flush()?;
        Ok(())
    }

    fn write_layout<W: Write + Seek>(&self, writer: &mut W) -> Result<Vec<u32>> {
        let entry_count = u16::try_from(self.entries.len())
            .map_err(|_| DataFileError::TooManyEntries(self.entries.len()))?;
        let sizes = self
            .entries
            .iter()
            .map(DataFileEntry::stored_size)
            .collect::<Result<Vec<u32>>>()?;

        let header = DataFileHeader::new(entry_count);
        let start = writer.stream_position()?;

        let mut position = start + (HEADER_SIZE + self.entries.len() * ENTRY_HEADER_SIZE) as u64;
        let mut offsets = Vec::with_capacity(sizes.len());
        for &size in &sizes {
            let offset =
                u32::try_from(position).map_err(|_| DataFileError::OffsetOverflow(position))?;
            offsets.push(offset);
            position += u64::from(size);
        }

        // Pass 1: placeholder table, then reserve each payload region
        header.write_le(writer)?;
        for entry in &self.entries {
            entry.write_header(writer, 0)?;
        }
        for &size in &sizes {
            io::copy(&mut io::repeat(0).take(u64::from(size)), writer)?;
        }
        let end = writer.stream_position()?;

        // Pass 2: real offsets, payloads into their reserved regions
        writer.seek(SeekFrom::Start(start))?;
        header.write_le(writer)?;
        for (entry, &offset) in self.entries.iter().zip(&offsets) {
            entry.write_header(writer, offset)?;
            let resume = writer.stream_position()?;
            writer.seek(SeekFrom::Start(u64::from(offset)))?;
            entry.write_data(writer)?;
            writer.seek(SeekFrom::Start(resume))?;
        }
        writer.seek(SeekFrom::Start(end))?;

        debug!(
            "Wrote data file: {} entries, {} bytes",
            self.entries.len(),
            end - start
        );

        Ok(offsets)
    }

    /// Container version
    pub const fn version(&self) -> DataFileVersion {
        DataFileVersion::V4
    }

    /// All entries in table order
    pub fn entries(&self) -> &[DataFileEntry] {
        &self.entries
    }

    /// Mutable access to the entries
    pub fn entries_mut(&mut self) -> &mut [DataFileEntry] {
        &mut self.entries
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the data file has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append an entry
    pub fn push(&mut self, entry: DataFileEntry) {
        self.entries.push(entry);
    }

    /// Append a new entry built from a path and payload
    pub fn add_file(&mut self, name: impl Into<String>, data: Vec<u8>, encrypted: bool) {
        self.entries.push(DataFileEntry::new(name, data, encrypted));
    }

    /// Remove the first entry matching `name`
    pub fn remove_file(&mut self, name: &str) -> Option<DataFileEntry> {
        let hash = NameHash::from_name(name);
        let index = self
            .entries
            .iter()
            .position(|entry| entry.identity().hash() == &hash)?;
        Some(self.entries.remove(index))
    }

    /// First entry matching `name`
    pub fn find_entry(&self, name: &str) -> Option<&DataFileEntry> {
        let hash = NameHash::from_name(name);
        self.entries
            .iter()
            .find(|entry| entry.identity().hash() == &hash)
    }

    /// Whether an entry matching `name` exists
    pub fn exists(&self, name: &str) -> bool {
        self.find_entry(name).is_some()
    }

    /// Payload of the first entry matching `name`
    pub fn get_file_data(&self, name: &str) -> Result<&[u8]> {
        self.try_get_file_data(name)
            .ok_or_else(|| DataFileError::FileNotFound(name.to_string()))
    }

    /// Payload of the first entry matching `name`, if any
    pub fn try_get_file_data(&self, name: &str) -> Option<&[u8]> {
        self.find_entry(name).map(DataFileEntry::data)
    }

    /// Try to name still-unresolved entries from `candidates`.
    ///
    /// Returns how many entries were newly resolved.
    pub fn resolve_names<S: AsRef<str>>(&mut self, candidates: &[S]) -> usize {
        let resolved = self
            .entries
            .iter_mut()
            .filter(|entry| !entry.is_resolved())
            .map(|entry| entry.resolve(candidates))
            .filter(|&resolved| resolved)
            .count();
        debug!("Resolved {} additional entry names", resolved);
        resolved
    }
}

impl FromIterator<DataFileEntry> for DataFile {
    fn from_iter<I: IntoIterator<Item = DataFileEntry>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for DataFile {
    type Item = DataFileEntry;
    type IntoIter = std::vec::IntoIter<DataFileEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl crate::RsdkFormat for DataFile {
    fn parse(data: &[u8]) -> std::result::Result<Self, Box<dyn std::error::Error>> {
        Self::parse(data).map_err(|e| Box::new(e) as Box<dyn std::error::Error>)
    }

    fn build(&self) -> std::result::Result<Vec<u8>, Box<dyn std::error::Error>> {
        self.build()
            .map_err(|e| Box::new(e) as Box<dyn std::error::Error>)
    }
}
