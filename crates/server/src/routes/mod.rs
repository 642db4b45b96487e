mod download;
mod lookup;

pub(crate) use download::download;
pub(crate) use lookup::lookup;

use serde::Deserialize;

/// Query string shared by both routes, kept as ordered pairs so a repeated `hash`
/// parameter resolves to its first occurrence.
#[derive(Debug, Default, Deserialize)]
#[serde(transparent)]
pub(crate) struct HashQuery {
    pairs: Vec<(String, String)>,
}

impl HashQuery {
    /// Normalised first `hash` value, or `None` when it is absent or blank.
    pub(crate) fn normalized(&self) -> Option<String> {
        self.pairs
            .iter()
            .find(|(key, _)| key == "hash")
            .map(|(_, value)| digest_indexer::normalize_hash(value))
            .filter(|hash| !hash.is_empty())
    }
}
