use serde::Serialize;

/// Counters collected during a scan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IndexStats {
    /// Regular files reached by the walk.
    pub files_seen: usize,
    /// Distinct digests added to the index.
    pub indexed: usize,
    /// Files whose digest was already mapped to an earlier path.
    pub collisions: usize,
    /// Files or directory entries skipped because they could not be read.
    pub failures: usize,
    /// Wall-clock time of the walk.
    pub duration_ms: u64,
}
