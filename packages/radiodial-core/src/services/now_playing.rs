//! Server-side composition of one poll cycle: metadata first, then artwork.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::artwork::ArtworkProvider;
use crate::catalog::Station;
use crate::stream::MetadataSource;

const UNKNOWN_TRACK: &str = "Unknown Track";
const UNKNOWN_ARTIST: &str = "Unknown Artist";

/// What a station is playing right now. Ephemeral, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NowPlaying {
    pub title: String,
    pub artist: String,
    pub artwork: Option<String>,
    pub album_name: Option<String>,
}

/// Resolves [`NowPlaying`] for a station.
#[derive(Clone)]
pub struct NowPlayingService {
    metadata: Arc<dyn MetadataSource>,
    artwork: Arc<dyn ArtworkProvider>,
}

impl NowPlayingService {
    pub fn new(metadata: Arc<dyn MetadataSource>, artwork: Arc<dyn ArtworkProvider>) -> Self {
        Self { metadata, artwork }
    }

    /// Probes the station and, if it announced anything, looks up artwork.
    ///
    /// Returns `None` for HLS stations and for streams without metadata;
    /// artwork is never requested in either case.
    pub async fn resolve(&self, station: &Station) -> Option<NowPlaying> {
        if !station.stream_kind().supports_icy() {
            return None;
        }

        let metadata = self.metadata.fetch(&station.url).await;
        if metadata.is_empty() {
            return None;
        }

        let found = self
            .artwork
            .lookup(metadata.artist.as_deref(), metadata.title.as_deref())
            .await;

        Some(NowPlaying {
            title: metadata.title.unwrap_or_else(|| UNKNOWN_TRACK.to_string()),
            artist: metadata.artist.unwrap_or_else(|| UNKNOWN_ARTIST.to_string()),
            artwork: found.artwork,
            album_name: found.album_name,
        })
    }
}
