use anyhow::{Context, Result};
use clap::Parser;
use digest_indexer::IndexerConfig;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;

/// Look up and download files under a directory by their SHA-256 digest.
#[derive(Debug, Clone, Parser)]
#[command(name = "digest-finder", version, about)]
pub struct ServerConfig {
    /// Directory to index at startup
    #[arg(long, env = "DIGEST_FINDER_ROOT", value_name = "DIR")]
    pub root: PathBuf,

    /// Address to listen on
    #[arg(long, env = "DIGEST_FINDER_HOST", default_value = DEFAULT_HOST)]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "DIGEST_FINDER_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Follow symbolic links while indexing (cycles are not detected)
    #[arg(long, env = "DIGEST_FINDER_FOLLOW_LINKS")]
    pub follow_links: bool,
}

impl ServerConfig {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            follow_links: false,
        }
    }

    pub fn bind_addr(&self) -> Result<SocketAddr> {
        let ip: IpAddr = self
            .host
            .trim()
            .parse()
            .with_context(|| format!("invalid listen host {:?}", self.host))?;
        Ok(SocketAddr::new(ip, self.port))
    }

    pub fn indexer_config(&self) -> IndexerConfig {
        IndexerConfig::new(&self.root).follow_links(self.follow_links)
    }
}
