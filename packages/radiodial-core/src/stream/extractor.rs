//! ICY now-playing probe.
//!
//! Opens a short-lived connection to a station's stream, reads just far
//! enough to see the first metadata block, and hangs up. Metadata is a
//! cosmetic enhancement: every failure collapses to an empty result and
//! nothing is retried.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use bytes::BytesMut;
use reqwest::header::USER_AGENT;
use reqwest::Client;
use thiserror::Error;

use super::{icy, StreamMetadata};
use crate::protocol_constants::{ICY_METADATA_REQUEST_HEADER, STREAM_USER_AGENT};

/// Upper bound on the buffer allocated up front. Origins may advertise
/// intervals far larger than what arrives before the timeout.
const MAX_INITIAL_BUFFER: usize = 64 * 1024;

/// Why a probe produced no metadata.
///
/// Only used for logging; callers of [`MetadataExtractor::fetch`] never see it.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// Connecting, sending, or reading a chunk failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Origin answered with a non-success status.
    #[error("HTTP error {0}")]
    HttpStatus(u16),

    /// The probe did not finish within its time budget.
    #[error("timed out after {0:?}")]
    Timeout(Duration),
}

/// Source of now-playing metadata for a stream URL.
///
/// Implemented by [`MetadataExtractor`]; tests substitute fixed values.
#[async_trait]
pub trait MetadataSource: Send + Sync {
    /// Returns the current artist/title, or an empty value if unknown.
    async fn fetch(&self, url: &str) -> StreamMetadata;
}

/// Reads in-band ICY metadata from progressive audio streams.
#[derive(Debug, Clone)]
pub struct MetadataExtractor {
    client: Client,
    timeout: Duration,
    read_allowance: usize,
}

impl MetadataExtractor {
    /// Creates an extractor.
    ///
    /// # Arguments
    /// * `client` - Shared HTTP client (must not carry a total request timeout
    ///   shorter than `timeout`)
    /// * `timeout` - Hard limit for connect, headers and body reads combined
    /// * `read_allowance` - Bytes read past the metadata interval before giving up
    #[must_use]
    pub fn new(client: Client, timeout: Duration, read_allowance: usize) -> Self {
        Self {
            client,
            timeout,
            read_allowance,
        }
    }

    /// Probes `url` and returns whatever metadata it announces.
    ///
    /// Never fails: timeouts, connection errors and streams without ICY
    /// support all yield an empty [`StreamMetadata`].
    pub async fn fetch(&self, url: &str) -> StreamMetadata {
        let start = Instant::now();

        // Dropping the timed-out future drops the response, aborting the connection
        let outcome = match tokio::time::timeout(self.timeout, self.probe(url)).await {
            Ok(result) => result,
            Err(_) => Err(ProbeError::Timeout(self.timeout)),
        };

        match outcome {
            Ok(metadata) => {
                log::debug!(
                    "[Metadata] {} -> artist={:?}, title={:?} ({:?})",
                    url,
                    metadata.artist,
                    metadata.title,
                    start.elapsed()
                );
                metadata
            }
            Err(e) => {
                log::debug!("[Metadata] Probe of {} gave up: {}", url, e);
                StreamMetadata::default()
            }
        }
    }

    /// Performs the probe without the time limit.
    async fn probe(&self, url: &str) -> Result<StreamMetadata, ProbeError> {
        let mut response = self
            .client
            .get(url)
            .header(ICY_METADATA_REQUEST_HEADER, "1")
            .header(USER_AGENT, STREAM_USER_AGENT)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProbeError::HttpStatus(status.as_u16()));
        }

        let Some(metaint) = icy::parse_metaint(response.headers()) else {
            log::debug!("[Metadata] {} does not interleave ICY metadata", url);
            return Ok(StreamMetadata::default());
        };

        // Heuristic bound: large metadata blocks past the allowance are missed
        let budget = metaint.saturating_add(self.read_allowance);
        let mut buffer = BytesMut::with_capacity(budget.min(MAX_INITIAL_BUFFER));
        let mut metadata = StreamMetadata::default();

        while buffer.len() < budget {
            let Some(chunk) = response.chunk().await? else {
                log::debug!("[Metadata] {} ended after {} bytes", url, buffer.len());
                break;
            };
            buffer.extend_from_slice(&chunk);

            // Transport chunks are not aligned to the interval, so search
            // the accumulated bytes once the boundary has been passed.
            if buffer.len() >= metaint {
                if let Some(payload) = icy::find_stream_title(&buffer) {
                    metadata = StreamMetadata::from_stream_title(&payload);
                    break;
                }
            }
        }

        // Short-lived probe: hang up instead of draining the stream
        drop(response);
        Ok(metadata)
    }
}

#[async_trait]
impl MetadataSource for MetadataExtractor {
    async fn fetch(&self, url: &str) -> StreamMetadata {
        MetadataExtractor::fetch(self, url).await
    }
}
