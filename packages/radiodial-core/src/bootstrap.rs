//! Application bootstrap and dependency wiring.
//!
//! This module contains the composition root - the single place where the
//! catalog, the metadata extractor and the artwork lookup are instantiated
//! and wired into [`AppState`].

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;

use crate::api::AppState;
use crate::artwork::ArtworkLookup;
use crate::catalog::{seed_default_stations, StationCatalog, StationStore};
use crate::error::{RadiodialError, RadiodialResult};
use crate::state::Config;
use crate::stream::MetadataExtractor;

/// Connect timeout for the shared client. Total time per call is bounded
/// by each caller's own timeout.
const CONNECT_TIMEOUT_SECS: u64 = 5;

/// Creates the shared HTTP client for all outbound requests.
///
/// No total request timeout is set: the extractor bounds its whole probe
/// itself and the artwork lookup sets a per-request timeout.
pub fn create_http_client() -> RadiodialResult<Client> {
    Client::builder()
        .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
        .build()
        .map_err(|e| RadiodialError::Internal(format!("Failed to create HTTP client: {}", e)))
}

/// Opens the catalog described by `config` and seeds it if requested.
pub fn open_catalog(config: &Config) -> RadiodialResult<StationCatalog> {
    let catalog = match &config.data_dir {
        Some(dir) => StationCatalog::open(dir)?,
        None => {
            log::info!("[Bootstrap] No data directory configured - stations will not persist");
            StationCatalog::in_memory()
        }
    };

    if config.seed_defaults {
        seed_default_stations(&catalog)?;
    }

    Ok(catalog)
}

/// Builds the metadata extractor from `config`.
pub fn create_extractor(client: Client, config: &Config) -> MetadataExtractor {
    MetadataExtractor::new(
        client,
        config.metadata_timeout(),
        config.metadata_read_allowance,
    )
}

/// Bootstraps all application services with their dependencies.
///
/// Wiring order:
/// 1. Configuration validation
/// 2. Shared HTTP client
/// 3. Catalog (load + seed)
/// 4. Metadata extractor and artwork lookup (share the client)
/// 5. API state
pub fn bootstrap(config: &Config) -> RadiodialResult<AppState> {
    config.validate().map_err(RadiodialError::Configuration)?;

    let client = create_http_client()?;
    let catalog = open_catalog(config)?;
    log::info!("[Bootstrap] Catalog ready with {} station(s)", catalog.count());

    let extractor = create_extractor(client.clone(), config);
    let artwork = ArtworkLookup::new(
        client,
        config.artwork_search_url.clone(),
        config.artwork_timeout(),
    );

    Ok(AppState::new(
        Arc::new(catalog),
        Arc::new(extractor),
        Arc::new(artwork),
        config.trusted_origins.clone(),
    ))
}
