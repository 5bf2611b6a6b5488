use super::{non_negative_seconds, null_as_default, TrackId};
use serde::{Deserialize, Serialize};

const UNKNOWN_ARTIST: &str = "Unknown artist";

/// A track as served by `GET /track/random`
///
/// Immutable once fetched; a session replaces it wholesale on every advance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub id: TrackId,

    /// Path relative to the music directory, shown as the title line
    #[serde(default, deserialize_with = "null_as_default")]
    pub file_path: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub author: String,

    /// Seconds, never negative
    #[serde(default, deserialize_with = "non_negative_seconds")]
    pub duration: f64,

    /// Tag title, when the scanner found one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Server-relative stream path (e.g. `/api/stream/42`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stream_url: Option<String>,
}

impl Track {
    /// Title line for the player
    pub fn display_title(&self) -> &str {
        &self.file_path
    }

    /// Artist line for the player
    pub fn display_author(&self) -> &str {
        if self.author.trim().is_empty() {
            UNKNOWN_ARTIST
        } else {
            &self.author
        }
    }
}
