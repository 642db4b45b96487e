use crate::error::{IndexerError, Result};
use crate::hasher::sha256_file;
use crate::index::{HashIndex, Insert};
use crate::stats::IndexStats;
use std::path::{Path, PathBuf};
use std::time::Instant;
use walkdir::WalkDir;

#[derive(Debug, Clone)]
pub struct IndexerConfig {
    pub root: PathBuf,
    /// Follow symbolic links while walking. Off by default; link cycles are not detected.
    pub follow_links: bool,
}

impl IndexerConfig {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            follow_links: false,
        }
    }

    pub fn follow_links(mut self, follow: bool) -> Self {
        self.follow_links = follow;
        self
    }
}

/// Notable things that happen while scanning, in walk order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanEvent {
    Indexed {
        hash: String,
        path: PathBuf,
    },
    Collision {
        hash: String,
        existing: PathBuf,
        duplicate: PathBuf,
    },
    Failed {
        path: PathBuf,
        error: String,
    },
}

/// One-shot indexer that hashes every regular file under a root directory.
pub struct ProjectIndexer {
    root: PathBuf,
    follow_links: bool,
}

impl ProjectIndexer {
    /// Validate the root and prepare an indexer.
    ///
    /// The root must exist, be a directory and be listable. It is canonicalised so every
    /// indexed path is absolute.
    pub fn new(config: IndexerConfig) -> Result<Self> {
        let root = config.root;
        let invalid = |reason: String| IndexerError::InvalidRoot {
            path: root.clone(),
            reason,
        };

        let canonical = dunce::canonicalize(&root).map_err(|e| invalid(e.to_string()))?;
        let metadata = std::fs::metadata(&canonical).map_err(|e| invalid(e.to_string()))?;
        if !metadata.is_dir() {
            return Err(invalid("not a directory".to_string()));
        }
        std::fs::read_dir(&canonical).map_err(|e| invalid(e.to_string()))?;

        Ok(Self {
            root: canonical,
            follow_links: config.follow_links,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn build(&self) -> Result<(HashIndex, IndexStats)> {
        self.build_with_observer(|_| {})
    }

    /// Walk the tree once and build the index, reporting every event to `observer`.
    ///
    /// Per-file failures are logged and skipped. Only a failure to read the root itself
    /// aborts the scan.
    pub fn build_with_observer<F>(&self, mut observer: F) -> Result<(HashIndex, IndexStats)>
    where
        F: FnMut(&ScanEvent),
    {
        let start = Instant::now();
        let mut index = HashIndex::new();
        let mut stats = IndexStats::default();

        log::info!("Scan started: {}", self.root.display());

        let walker = WalkDir::new(&self.root)
            .follow_links(self.follow_links)
            .sort_by_file_name();

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    if err.depth() == 0 {
                        return Err(IndexerError::Walk(err));
                    }
                    let path = err
                        .path()
                        .map(Path::to_path_buf)
                        .unwrap_or_else(|| self.root.clone());
                    log::warn!("Skipping unreadable entry {}: {err}", path.display());
                    stats.failures += 1;
                    observer(&ScanEvent::Failed {
                        path,
                        error: err.to_string(),
                    });
                    continue;
                }
            };

            // Without link following, a link to a regular file is still indexed under the
            // link path; links to directories are not descended into.
            let is_file = if entry.path_is_symlink() && !self.follow_links {
                match std::fs::metadata(entry.path()) {
                    Ok(metadata) => metadata.is_file(),
                    Err(err) => {
                        let path = entry.into_path();
                        log::error!("Failed to resolve link {}: {err}", path.display());
                        stats.failures += 1;
                        observer(&ScanEvent::Failed {
                            path,
                            error: err.to_string(),
                        });
                        continue;
                    }
                }
            } else {
                entry.file_type().is_file()
            };
            if !is_file {
                continue;
            }
            stats.files_seen += 1;

            let path = entry.into_path();
            let hash = match sha256_file(&path) {
                Ok(hash) => hash,
                Err(err) => {
                    log::error!("Failed to hash {}: {err}", path.display());
                    stats.failures += 1;
                    observer(&ScanEvent::Failed {
                        path,
                        error: err.to_string(),
                    });
                    continue;
                }
            };

            match index.insert_first_seen(hash.clone(), path.clone()) {
                Insert::Added => {
                    stats.indexed += 1;
                    observer(&ScanEvent::Indexed { hash, path });
                }
                Insert::Collision(existing) => {
                    log::warn!(
                        "Hash collision: {hash} maps to {} and {}",
                        existing.display(),
                        path.display()
                    );
                    stats.collisions += 1;
                    observer(&ScanEvent::Collision {
                        hash,
                        existing,
                        duplicate: path,
                    });
                }
            }
        }

        #[allow(clippy::cast_possible_truncation)]
        {
            stats.duration_ms = start.elapsed().as_millis() as u64;
        }
        log::info!("Scan completed: {} files indexed ({stats:?})", index.len());

        Ok((index, stats))
    }
}
