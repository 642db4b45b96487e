use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Canonical form of a user supplied hash: surrounding whitespace trimmed, ASCII lowercased.
pub fn normalize_hash(raw: &str) -> String {
    raw.trim().to_ascii_lowercase()
}

/// Outcome of offering a (hash, path) pair to the index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Insert {
    Added,
    /// The hash was already mapped; the existing path is kept.
    Collision(PathBuf),
}

/// Immutable hash -> path mapping produced by a single scan.
///
/// Keys are lowercase hex digests. For every key the stored path is the first file that
/// produced it during the walk.
#[derive(Debug, Default, Clone)]
pub struct HashIndex {
    entries: HashMap<String, PathBuf>,
}

impl HashIndex {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert_first_seen(&mut self, hash: String, path: PathBuf) -> Insert {
        match self.entries.get(&hash) {
            Some(existing) => Insert::Collision(existing.clone()),
            None => {
                self.entries.insert(hash, path);
                Insert::Added
            }
        }
    }

    /// Look up a hash. The query is normalised first; malformed input is simply absent.
    pub fn get(&self, hash: &str) -> Option<&Path> {
        self.entries.get(&normalize_hash(hash)).map(PathBuf::as_path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Path)> {
        self.entries
            .iter()
            .map(|(hash, path)| (hash.as_str(), path.as_path()))
    }
}
