//! Album artwork lookup.
//!
//! Forwards an artist/title pair to a public catalog search (the iTunes
//! Search API by default) and republishes the top hit:
//!
//! 1. **Search term**: non-blank artist and title joined with a space
//! 2. **Query**: `term`, `media=music`, `limit=1`
//! 3. **Result**: artwork URL upgraded from the `100x100` thumbnail to
//!    `600x600`, plus track, album and artist names
//!
//! Like ICY metadata, artwork is decoration. Network errors, non-200
//! answers and empty result sets all produce an empty [`ArtworkMatch`].
//!
//! # Example
//!
//! ```ignore
//! use radiodial_core::ArtworkLookup;
//!
//! let lookup = ArtworkLookup::new(client, "https://itunes.apple.com/search", timeout);
//! let found = lookup.lookup(Some("Massive Attack"), Some("Teardrop")).await;
//! // found.artwork == Some("https://.../600x600bb.jpg")
//! ```

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::protocol_constants::{ARTWORK_FULL_SIZE, ARTWORK_THUMBNAIL_SIZE};

/// Best artwork match for a track.
///
/// Serialized as `{"artwork": null}` when nothing was found.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtworkMatch {
    pub artwork: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artist_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub track_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub album_name: Option<String>,
}

/// Search response envelope.
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchResult {
    artwork_url100: Option<String>,
    artist_name: Option<String>,
    track_name: Option<String>,
    collection_name: Option<String>,
}

impl From<SearchResult> for ArtworkMatch {
    fn from(hit: SearchResult) -> Self {
        Self {
            artwork: hit.artwork_url100.as_deref().map(upgrade_artwork_url),
            artist_name: hit.artist_name,
            track_name: hit.track_name,
            album_name: hit.collection_name,
        }
    }
}

#[derive(Debug, Error)]
enum LookupError {
    #[error("invalid search URL: {0}")]
    Url(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP error {0}")]
    HttpStatus(u16),
}

/// Rewrites a thumbnail artwork URL to its large rendition.
///
/// URLs without the thumbnail token are returned unchanged.
#[must_use]
pub fn upgrade_artwork_url(url: &str) -> String {
    url.replace(ARTWORK_THUMBNAIL_SIZE, ARTWORK_FULL_SIZE)
}

/// Builds the search term from the non-blank inputs.
fn search_term(artist: Option<&str>, title: Option<&str>) -> Option<String> {
    let parts: Vec<&str> = [artist, title]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" "))
    }
}

/// Provider of artwork for a track.
#[async_trait]
pub trait ArtworkProvider: Send + Sync {
    /// Returns the best match, or an empty match when nothing was found.
    async fn lookup(&self, artist: Option<&str>, title: Option<&str>) -> ArtworkMatch;
}

/// Artwork lookup against a catalog search endpoint.
#[derive(Debug, Clone)]
pub struct ArtworkLookup {
    client: Client,
    search_url: String,
    timeout: Duration,
}

impl ArtworkLookup {
    /// Creates a lookup querying `search_url`.
    #[must_use]
    pub fn new(client: Client, search_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client,
            search_url: search_url.into(),
            timeout,
        }
    }

    /// Looks up artwork for the given artist and/or title.
    ///
    /// With both inputs blank, returns an empty match without any request.
    pub async fn lookup(&self, artist: Option<&str>, title: Option<&str>) -> ArtworkMatch {
        let Some(term) = search_term(artist, title) else {
            return ArtworkMatch::default();
        };

        match self.search(&term).await {
            Ok(Some(found)) => {
                log::debug!("[Artwork] '{}' -> {:?}", term, found.artwork);
                found
            }
            Ok(None) => {
                log::debug!("[Artwork] No results for '{}'", term);
                ArtworkMatch::default()
            }
            Err(e) => {
                log::debug!("[Artwork] Search for '{}' failed: {}", term, e);
                ArtworkMatch::default()
            }
        }
    }

    async fn search(&self, term: &str) -> Result<Option<ArtworkMatch>, LookupError> {
        let url = Url::parse_with_params(
            &self.search_url,
            &[("term", term), ("media", "music"), ("limit", "1")],
        )
        .map_err(|e| LookupError::Url(e.to_string()))?;

        let res = self.client.get(url).timeout(self.timeout).send().await?;

        let status = res.status();
        if !status.is_success() {
            return Err(LookupError::HttpStatus(status.as_u16()));
        }

        let body: SearchResponse = res.json().await?;
        Ok(body.results.into_iter().next().map(ArtworkMatch::from))
    }
}

#[async_trait]
impl ArtworkProvider for ArtworkLookup {
    async fn lookup(&self, artist: Option<&str>, title: Option<&str>) -> ArtworkMatch {
        ArtworkLookup::lookup(self, artist, title).await
    }
}
