//! Options for reading data files

use crate::datafile::error::{DataFileError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Options controlling how a data file is read.
///
/// Data files do not store entry names, so a reader can only show real names
/// for entries whose path appears in `candidate_names`. Everything else gets a
/// name derived from its content.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataFileOptions {
    /// Plaintext paths to match against stored name hashes
    #[serde(default)]
    pub candidate_names: Vec<String>,
}

impl DataFileOptions {
    /// Create options with no candidate names
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the candidate names
    #[must_use]
    pub fn with_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.candidate_names = names.into_iter().map(Into::into).collect();
        self
    }

    /// Append a single candidate name
    pub fn add_name(&mut self, name: impl Into<String>) {
        self.candidate_names.push(name.into());
    }

    /// Append candidate names from a text list.
    ///
    /// One path per line. Surrounding whitespace is trimmed, and blank lines
    /// and lines starting with `#` are skipped.
    pub fn add_name_list(&mut self, list: &str) -> usize {
        let before = self.candidate_names.len();
        self.candidate_names.extend(
            list.lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#'))
                .map(str::to_string),
        );
        self.candidate_names.len() - before
    }

    /// Append candidate names from a list file on disk
    pub fn load_name_list<P: AsRef<Path>>(&mut self, path: P) -> Result<usize> {
        let path = path.as_ref();
        let list = std::fs::read_to_string(path).map_err(|source| DataFileError::NameList {
            path: path.to_path_buf(),
            source,
        })?;
        let added = self.add_name_list(&list);
        debug!("Loaded {} candidate names from {}", added, path.display());
        Ok(added)
    }

    /// Parse options from a JSON document
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
