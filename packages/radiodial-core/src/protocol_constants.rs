//! Fixed protocol constants that should NOT be changed.
//!
//! These values are defined by the ICY convention or by the artwork search
//! provider, and changing them would break compatibility with origins.

// ─────────────────────────────────────────────────────────────────────────────
// ICY Protocol (Shoutcast/Icecast metadata)
// ─────────────────────────────────────────────────────────────────────────────

/// Request header asking the origin to interleave metadata blocks.
pub const ICY_METADATA_REQUEST_HEADER: &str = "Icy-MetaData";

/// Response header carrying the metadata interval in bytes.
pub const ICY_METAINT_HEADER: &str = "icy-metaint";

/// Marker that opens the title field inside a metadata block.
pub const STREAM_TITLE_PREFIX: &[u8] = b"StreamTitle='";

/// Separator between artist and title inside a `StreamTitle` payload.
pub const ARTIST_TITLE_SEPARATOR: &str = " - ";

/// User-Agent sent to stream origins.
///
/// Several origins reject requests carrying a library default identifier.
pub const STREAM_USER_AGENT: &str = "Mozilla/5.0";

/// File-extension convention identifying HLS playlists.
pub const HLS_PLAYLIST_MARKER: &str = ".m3u8";

// ─────────────────────────────────────────────────────────────────────────────
// Artwork Search
// ─────────────────────────────────────────────────────────────────────────────

/// Default catalog search endpoint.
pub const DEFAULT_ARTWORK_SEARCH_URL: &str = "https://itunes.apple.com/search";

/// Thumbnail dimension token in search result artwork URLs.
pub const ARTWORK_THUMBNAIL_SIZE: &str = "100x100";

/// Dimension token substituted to request the large rendition.
pub const ARTWORK_FULL_SIZE: &str = "600x600";

// ─────────────────────────────────────────────────────────────────────────────
// Application Identity
// ─────────────────────────────────────────────────────────────────────────────

/// Service identifier reported by the health endpoint.
pub const SERVICE_ID: &str = "radiodial";
