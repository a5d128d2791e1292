//! Core configuration types.
//!
//! [`Config`] carries everything the composition root needs to wire the
//! catalog, the metadata extractor and the artwork lookup. The standalone
//! server fills it from YAML and environment overrides.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::protocol_constants::DEFAULT_ARTWORK_SEARCH_URL;

/// Configuration for the Radiodial backend.
///
/// All fields have sensible defaults.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    // Server
    /// Address the HTTP server binds to.
    pub bind_address: IpAddr,

    /// Port the HTTP server binds to.
    pub bind_port: u16,

    /// Origins allowed by CORS. Empty allows any origin.
    pub trusted_origins: Vec<String>,

    // Catalog
    /// Directory holding `stations.json`. `None` keeps the catalog in memory.
    pub data_dir: Option<PathBuf>,

    /// Populate the default station list when the catalog starts empty.
    pub seed_defaults: bool,

    // Metadata extraction
    /// Hard limit on a single ICY probe (seconds).
    pub metadata_timeout_secs: u64,

    /// Bytes read past the metadata interval before giving up.
    pub metadata_read_allowance: usize,

    // Artwork
    /// Timeout for a single artwork search (seconds).
    pub artwork_timeout_secs: u64,

    /// Search endpoint queried for artwork.
    pub artwork_search_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            bind_port: 5000,
            trusted_origins: Vec::new(),
            data_dir: None,
            seed_defaults: true,
            metadata_timeout_secs: 5,
            metadata_read_allowance: 4096,
            artwork_timeout_secs: 10,
            artwork_search_url: DEFAULT_ARTWORK_SEARCH_URL.to_string(),
        }
    }
}

impl Config {
    /// Socket address the server listens on.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_address, self.bind_port)
    }

    #[must_use]
    pub fn metadata_timeout(&self) -> Duration {
        Duration::from_secs(self.metadata_timeout_secs)
    }

    #[must_use]
    pub fn artwork_timeout(&self) -> Duration {
        Duration::from_secs(self.artwork_timeout_secs)
    }

    /// Validates the configuration values.
    pub fn validate(&self) -> Result<(), String> {
        if self.metadata_timeout_secs == 0 {
            return Err("metadata_timeout_secs must be >= 1".to_string());
        }
        if self.artwork_timeout_secs == 0 {
            return Err("artwork_timeout_secs must be >= 1".to_string());
        }
        if self.artwork_search_url.is_empty() {
            return Err("artwork_search_url must not be empty".to_string());
        }
        Ok(())
    }
}
