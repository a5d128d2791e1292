//! Radiodial Core - backend library for the Radiodial station directory.
//!
//! Browsers stream audio straight from each station's origin; this crate
//! only serves the station catalog and two best-effort enrichments that the
//! player polls for: the current track (read from in-band ICY metadata) and
//! album artwork for it.
//!
//! # Architecture
//!
//! - [`catalog`]: Station records, validation, persistence and seeding
//! - [`stream`]: ICY parsing and the now-playing probe
//! - [`artwork`]: Artwork search and URL upgrading
//! - [`services`]: Metadata + artwork composition
//! - [`api`]: Axum router and handlers
//! - [`bootstrap`]: Composition root
//! - [`state`]: Configuration
//! - [`error`]: Centralized error types
//!
//! # Abstraction Traits
//!
//! - [`StationStore`](catalog::StationStore): Catalog persistence
//! - [`MetadataSource`](stream::MetadataSource): Now-playing probe
//! - [`ArtworkProvider`](artwork::ArtworkProvider): Artwork search

#![warn(clippy::all)]

pub mod api;
pub mod artwork;
pub mod bootstrap;
pub mod catalog;
pub mod error;
pub mod protocol_constants;
pub mod services;
pub mod state;
pub mod stream;

#[cfg(test)]
mod test_support;

// Re-export commonly used types at the crate root
pub use artwork::{upgrade_artwork_url, ArtworkLookup, ArtworkMatch, ArtworkProvider};
pub use catalog::{NewStation, Station, StationCatalog, StationStore, StreamKind};
pub use error::{RadiodialError, RadiodialResult, ValidationError};
pub use services::{NowPlaying, NowPlayingService};
pub use state::Config;
pub use stream::{MetadataExtractor, MetadataSource, StreamMetadata};

// Re-export bootstrap types
pub use bootstrap::{bootstrap, create_extractor, create_http_client};

// Re-export API types
pub use api::{start_server, AppState, ServerError};
