//! Station catalog.
//!
//! A single shared table of stations. Stations are created and listed;
//! there is no update or delete path.

mod seed;
mod store;

pub use seed::{default_stations, seed_default_stations};
pub use store::StationCatalog;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{RadiodialResult, ValidationError};
use crate::protocol_constants::HLS_PLAYLIST_MARKER;

/// A radio station in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Station {
    pub id: i64,
    pub name: String,
    pub url: String,
    pub icon: Option<String>,
    pub country: Option<String>,
}

impl Station {
    #[must_use]
    pub fn stream_kind(&self) -> StreamKind {
        StreamKind::from_url(&self.url)
    }
}

/// How a station's stream is delivered.
///
/// Decided purely from the URL; the actual content type is never checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamKind {
    /// HLS playlist, decoded client-side. Carries no ICY metadata.
    Hls,
    /// Direct progressive audio stream.
    Progressive,
}

impl StreamKind {
    #[must_use]
    pub fn from_url(url: &str) -> Self {
        if url.contains(HLS_PLAYLIST_MARKER) {
            Self::Hls
        } else {
            Self::Progressive
        }
    }

    /// Whether the ICY extractor applies to this kind of stream.
    #[must_use]
    pub const fn supports_icy(&self) -> bool {
        matches!(self, Self::Progressive)
    }
}

/// A validated station insert payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStation {
    pub name: String,
    pub url: String,
    pub icon: Option<String>,
    pub country: Option<String>,
}

impl NewStation {
    /// Validates a JSON body into an insert payload.
    ///
    /// Fields are checked in declaration order and the first failure wins.
    /// Accepted strings are stored trimmed, so a whitespace-only value counts
    /// as empty.
    pub fn from_json(body: &Value) -> Result<Self, ValidationError> {
        let Some(fields) = body.as_object() else {
            return Err(ValidationError::new(
                "",
                format!("Expected object, received {}", json_type_name(body)),
            ));
        };

        Ok(Self {
            name: required_string(fields.get("name"), "name")?,
            url: required_string(fields.get("url"), "url")?,
            icon: optional_string(fields.get("icon"), "icon")?,
            country: optional_string(fields.get("country"), "country")?,
        })
    }
}

fn required_string(value: Option<&Value>, field: &str) -> Result<String, ValidationError> {
    match value {
        None | Some(Value::Null) => Err(ValidationError::new(field, "Required")),
        Some(Value::String(s)) if s.trim().is_empty() => Err(ValidationError::new(
            field,
            "String must contain at least 1 character(s)",
        )),
        Some(Value::String(s)) => Ok(s.trim().to_string()),
        Some(other) => Err(type_mismatch(field, other)),
    }
}

fn optional_string(value: Option<&Value>, field: &str) -> Result<Option<String>, ValidationError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.trim().to_string())),
        Some(other) => Err(type_mismatch(field, other)),
    }
}

fn type_mismatch(field: &str, value: &Value) -> ValidationError {
    ValidationError::new(
        field,
        format!("Expected string, received {}", json_type_name(value)),
    )
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Persistence seam for the catalog.
///
/// Handlers depend on this trait rather than on [`StationCatalog`].
pub trait StationStore: Send + Sync {
    /// Returns every station.
    fn list(&self) -> Vec<Station>;

    /// Looks up a station by id.
    fn get(&self, id: i64) -> Option<Station>;

    /// Persists a new station and returns it with its assigned id.
    fn create(&self, station: NewStation) -> RadiodialResult<Station>;

    /// Number of stations in the catalog.
    fn count(&self) -> usize {
        self.list().len()
    }
}
