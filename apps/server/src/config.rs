//! Server configuration.
//!
//! Supports loading from YAML files with environment variable overrides.

use std::net::IpAddr;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Server configuration loaded from YAML with environment overrides.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Port to bind the HTTP server to.
    /// Override: `RADIODIAL_BIND_PORT`
    pub bind_port: u16,

    /// Address to bind the HTTP server to.
    /// Override: `RADIODIAL_BIND_ADDRESS`
    pub bind_address: IpAddr,

    /// Origins allowed to call the API from a browser. Empty allows any.
    pub trusted_origins: Vec<String>,

    /// Directory for persistent data (`stations.json`).
    /// Override: `RADIODIAL_DATA_DIR`
    pub data_dir: Option<PathBuf>,

    /// Populate the default stations on first run.
    pub seed_defaults: bool,

    /// ICY probe settings.
    pub metadata: MetadataSection,

    /// Artwork search settings.
    pub artwork: ArtworkSection,
}

/// `metadata:` section.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct MetadataSection {
    /// Hard limit per probe (seconds).
    /// Override: `RADIODIAL_METADATA_TIMEOUT`
    pub timeout_secs: u64,

    /// Bytes read past the metadata interval.
    pub read_allowance: usize,
}

/// `artwork:` section.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ArtworkSection {
    /// Catalog search endpoint.
    /// Override: `RADIODIAL_ARTWORK_SEARCH_URL`
    pub search_url: String,

    /// Timeout per search (seconds).
    pub timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        let core = radiodial_core::Config::default();
        Self {
            bind_port: core.bind_port,
            bind_address: core.bind_address,
            trusted_origins: core.trusted_origins,
            data_dir: core.data_dir,
            seed_defaults: core.seed_defaults,
            metadata: MetadataSection::default(),
            artwork: ArtworkSection::default(),
        }
    }
}

impl Default for MetadataSection {
    fn default() -> Self {
        let core = radiodial_core::Config::default();
        Self {
            timeout_secs: core.metadata_timeout_secs,
            read_allowance: core.metadata_read_allowance,
        }
    }
}

impl Default for ArtworkSection {
    fn default() -> Self {
        let core = radiodial_core::Config::default();
        Self {
            search_url: core.artwork_search_url,
            timeout_secs: core.artwork_timeout_secs,
        }
    }
}

impl ServerConfig {
    /// Loads configuration from a YAML file, then applies environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with(path, |key| std::env::var(key).ok())
    }

    /// Loads configuration, resolving overrides through `lookup`.
    fn load_with(path: Option<&Path>, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = if let Some(path) = path {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?
        } else {
            Self::default()
        };

        config.apply_overrides(lookup);
        Ok(config)
    }

    /// Applies overrides looked up by variable name.
    ///
    /// Unparseable values are ignored and the configured value is kept.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(port) = lookup("RADIODIAL_BIND_PORT").and_then(|v| v.parse().ok()) {
            self.bind_port = port;
        }

        if let Some(addr) = lookup("RADIODIAL_BIND_ADDRESS").and_then(|v| v.parse().ok()) {
            self.bind_address = addr;
        }

        if let Some(secs) = lookup("RADIODIAL_METADATA_TIMEOUT").and_then(|v| v.parse().ok()) {
            self.metadata.timeout_secs = secs;
        }

        if let Some(url) = lookup("RADIODIAL_ARTWORK_SEARCH_URL").filter(|v| !v.is_empty()) {
            self.artwork.search_url = url;
        }

        // Note: RADIODIAL_DATA_DIR is handled by clap via #[arg(env = ...)] in main.rs
    }

    /// Converts to radiodial-core's Config type.
    pub fn to_core_config(&self) -> radiodial_core::Config {
        radiodial_core::Config {
            bind_address: self.bind_address,
            bind_port: self.bind_port,
            trusted_origins: self.trusted_origins.clone(),
            data_dir: self.data_dir.clone(),
            seed_defaults: self.seed_defaults,
            metadata_timeout_secs: self.metadata.timeout_secs,
            metadata_read_allowance: self.metadata.read_allowance,
            artwork_timeout_secs: self.artwork.timeout_secs,
            artwork_search_url: self.artwork.search_url.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults_match_core() {
        let config = ServerConfig::default().to_core_config();
        let core = radiodial_core::Config::default();
        assert_eq!(config.bind_port, core.bind_port);
        assert_eq!(config.metadata_timeout_secs, 5);
        assert_eq!(config.metadata_read_allowance, 4096);
        assert_eq!(config.artwork_search_url, core.artwork_search_url);
    }

    #[test]
    fn yaml_file_is_loaded_with_partial_sections() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("radiodial.yaml");
        std::fs::write(
            &path,
            "bind_port: 8080\nseed_defaults: false\nmetadata:\n  timeout_secs: 3\n",
        )
        .unwrap();

        let config = ServerConfig::load_with(Some(&path), |_| None).unwrap();
        assert_eq!(config.bind_port, 8080);
        assert!(!config.seed_defaults);
        assert_eq!(config.metadata.timeout_secs, 3);
        assert_eq!(config.metadata.read_allowance, 4096);
    }

    #[test]
    fn unreadable_file_is_an_error() {
        let result =
            ServerConfig::load_with(Some(Path::new("/nonexistent/radiodial.yaml")), |_| None);
        assert!(result.is_err());
    }

    #[test]
    fn overrides_apply_on_top_of_file() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("radiodial.yaml");
        std::fs::write(&path, "metadata:\n  timeout_secs: 3\n").unwrap();

        let config = ServerConfig::load_with(Some(&path), |key| {
            (key == "RADIODIAL_METADATA_TIMEOUT").then(|| "7".to_string())
        })
        .unwrap();
        assert_eq!(config.metadata.timeout_secs, 7);
    }

    #[test]
    fn overrides_replace_values_and_ignore_garbage() {
        let env: HashMap<&str, &str> = [
            ("RADIODIAL_BIND_PORT", "9000"),
            ("RADIODIAL_BIND_ADDRESS", "not-an-ip"),
            ("RADIODIAL_ARTWORK_SEARCH_URL", "http://127.0.0.1:1/search"),
        ]
        .into_iter()
        .collect();

        let mut config = ServerConfig::default();
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.bind_port, 9000);
        assert_eq!(config.bind_address, ServerConfig::default().bind_address);
        assert_eq!(config.artwork.search_url, "http://127.0.0.1:1/search");
    }
}
