//! ICY (Shoutcast) protocol metadata parsing.
//!
//! Stateless helpers used by the extractor: reading the interval header and
//! locating the `StreamTitle` field inside buffered stream bytes.

use reqwest::header::HeaderMap;

use super::StreamMetadata;
use crate::protocol_constants::{ARTIST_TITLE_SEPARATOR, ICY_METAINT_HEADER, STREAM_TITLE_PREFIX};

/// Reads the metadata interval advertised by the origin.
///
/// Returns `None` when the header is absent or not a byte count, which means
/// the origin does not interleave metadata.
#[must_use]
pub fn parse_metaint(headers: &HeaderMap) -> Option<usize> {
    headers
        .get(ICY_METAINT_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<usize>().ok())
}

/// Locates the first non-blank `StreamTitle='...'` payload in `buffer`.
///
/// The buffer holds raw audio interleaved with metadata, so the search runs
/// on bytes and only the payload is decoded. Blank payloads are skipped and
/// the scan moves on to the next block. Returns `None` if no complete,
/// non-blank payload has arrived yet.
#[must_use]
pub fn find_stream_title(buffer: &[u8]) -> Option<String> {
    let mut offset = 0;

    loop {
        let start = offset
            + find_subslice(&buffer[offset..], STREAM_TITLE_PREFIX)?
            + STREAM_TITLE_PREFIX.len();
        let len = buffer[start..].iter().position(|&b| b == b'\'')?;
        let payload = decode_text(&buffer[start..start + len]);

        if !payload.trim().is_empty() {
            return Some(payload);
        }
        offset = start + len + 1;
    }
}

/// Decodes metadata text as UTF-8, falling back to Latin-1.
///
/// Many Shoutcast origins still send ISO-8859-1 titles.
fn decode_text(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => bytes.iter().map(|&b| char::from(b)).collect(),
    }
}

fn find_subslice(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

impl StreamMetadata {
    /// Splits a `StreamTitle` payload into artist and title.
    ///
    /// Splits on the first `" - "` only: `"DJ - Part 1 - Remix"` gives artist
    /// `"DJ"` and title `"Part 1 - Remix"`. Without a separator the whole
    /// payload is the title.
    #[must_use]
    pub fn from_stream_title(payload: &str) -> Self {
        match payload.split_once(ARTIST_TITLE_SEPARATOR) {
            Some((artist, title)) => Self {
                title: non_blank(title),
                artist: non_blank(artist),
            },
            None => Self {
                title: non_blank(payload),
                artist: None,
            },
        }
    }
}

fn non_blank(s: &str) -> Option<String> {
    let s = s.trim();
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}
