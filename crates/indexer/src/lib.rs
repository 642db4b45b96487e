//! # Digest Indexer
//!
//! Content-hash index over a directory tree.
//!
//! ## Pipeline
//!
//! ```text
//! Root directory
//!     │
//!     ├──> Walker (sorted, symlinks not followed by default)
//!     │      └─> Regular files
//!     │
//!     ├──> Hasher (SHA-256, 8 KiB streaming reads)
//!     │      └─> Lowercase hex digests
//!     │
//!     └──> HashIndex (first path seen wins)
//!            └─> Immutable hash -> path lookup
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use digest_indexer::{IndexerConfig, ProjectIndexer};
//!
//! fn main() -> digest_indexer::Result<()> {
//!     let indexer = ProjectIndexer::new(IndexerConfig::new("/srv/files"))?;
//!     let (index, stats) = indexer.build()?;
//!
//!     println!("Indexed {} files ({} collisions)", index.len(), stats.collisions);
//!     Ok(())
//! }
//! ```

mod error;
mod hasher;
mod index;
mod indexer;
mod stats;

pub use error::{IndexerError, Result};
pub use hasher::{sha256_bytes, sha256_file, DIGEST_HEX_LEN, HASH_CHUNK_SIZE};
pub use index::{normalize_hash, HashIndex};
pub use indexer::{IndexerConfig, ProjectIndexer, ScanEvent};
pub use stats::IndexStats;
