//! Entry identity: a name hash with an optional recovered plaintext name

use rsdk_crypto::NameHash;
use std::fmt;

/// Identity of a data file entry.
///
/// The container only stores the MD5 hash of each entry's normalized path.
/// A plaintext name is present when the entry was created from a name, or
/// once [`NameIdentifier::resolve`] has matched the hash against a candidate.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NameIdentifier {
    hash: NameHash,
    name: Option<String>,
}

impl NameIdentifier {
    /// Create an identity from a known name, hashing its normalized form
    pub fn from_name(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            hash: NameHash::from_name(&name),
            name: Some(name),
        }
    }

    /// Wrap a stored hash whose name is not (yet) known
    pub const fn from_hash(hash: NameHash) -> Self {
        Self { hash, name: None }
    }

    /// Try to recover the plaintext name from a list of candidates.
    ///
    /// Candidates are normalized before hashing, so case and slash direction
    /// do not matter. The first match is adopted verbatim. Returns whether the
    /// identity now has a name; an identity that already had one is left
    /// untouched.
    pub fn resolve<S: AsRef<str>>(&mut self, candidates: &[S]) -> bool {
        if self.name.is_some() {
            return true;
        }

        for candidate in candidates {
            let candidate: &str = candidate.as_ref();
            if NameHash::from_name(candidate) == self.hash {
                self.name = Some(candidate.to_string());
                return true;
            }
        }
        false
    }

    /// Whether the plaintext name is known
    pub const fn is_resolved(&self) -> bool {
        self.name.is_some()
    }

    /// Stored name hash
    pub const fn hash(&self) -> &NameHash {
        &self.hash
    }

    /// Known plaintext name, if any
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Hash to write to disk.
    ///
    /// Recomputed from the normalized name when one is known, otherwise the
    /// hash that was read.
    pub fn stored_hash(&self) -> NameHash {
        self.name
            .as_deref()
            .map_or(self.hash, NameHash::from_name)
    }

    /// Known name, or the hash as lowercase hex
    pub fn display_name(&self) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| self.hash.to_hex())
    }

    /// Whether `name` refers to this identity
    pub fn matches(&self, name: &str) -> bool {
        NameHash::from_name(name) == self.hash
    }
}

impl fmt::Display for NameIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => f.write_str(name),
            None => write!(f, "{}", self.hash),
        }
    }
}

impl From<NameHash> for NameIdentifier {
    fn from(hash: NameHash) -> Self {
        Self::from_hash(hash)
    }
}
