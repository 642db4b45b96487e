//! Digest Finder server
//!
//! Indexes a directory tree by SHA-256 once at startup, then serves two routes:
//!
//! - `GET /?hash=<digest>` - lookup page (form, found panel, or not-found panel)
//! - `GET /download?hash=<digest>` - the matching file as an attachment

pub mod config;
mod error;
pub mod page;
mod routes;
mod server;

pub use config::ServerConfig;
pub use error::ApiError;
pub use server::{build_index, router, run, AppState, Server};
