use super::{non_negative_seconds, null_as_default};
use crate::time::format_time;
use serde::{Deserialize, Serialize};

/// Aggregate collection stats from `GET /stats`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_tracks: u64,

    /// Sum of all track durations in seconds
    #[serde(default, deserialize_with = "non_negative_seconds")]
    pub total_duration: f64,

    #[serde(default)]
    pub most_played: Option<MostPlayed>,
}

/// Summary of the most played track
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MostPlayed {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub play_count: Option<u64>,
    #[serde(default)]
    pub file_path: Option<String>,
}

impl MostPlayed {
    /// Tag title, or `"unknown"` when missing or blank
    pub fn display_title(&self) -> &str {
        self.title
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or("unknown")
    }
}

impl Stats {
    /// One-line summary shown under the player
    pub fn summary(&self) -> String {
        let most_played = self
            .most_played
            .as_ref()
            .map_or("unknown", MostPlayed::display_title);

        format!(
            "{} songs | total runtime - {} | most played - {}",
            self.total_tracks,
            format_time(self.total_duration),
            most_played
        )
    }
}
