//! Now-playing metadata for live streams.
//!
//! - [`icy`]: ICY header and `StreamTitle` parsing
//! - [`extractor`]: the short-lived HTTP probe that reads one metadata block

pub mod extractor;
pub mod icy;

pub use extractor::{MetadataExtractor, MetadataSource, ProbeError};

use serde::{Deserialize, Serialize};

/// Artist and title currently announced by a stream.
///
/// Both fields serialize as `null` when unknown.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamMetadata {
    pub title: Option<String>,
    pub artist: Option<String>,
}

impl StreamMetadata {
    /// Whether the probe found anything worth displaying.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.artist.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_metadata_serializes_both_keys_as_null() {
        let json = serde_json::to_value(StreamMetadata::default()).unwrap();
        assert_eq!(json, serde_json::json!({ "title": null, "artist": null }));
    }

    #[test]
    fn is_empty_checks_both_fields() {
        assert!(StreamMetadata::default().is_empty());
        assert!(!StreamMetadata::from_stream_title("Ambient Mix").is_empty());
    }
}
