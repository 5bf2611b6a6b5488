//! Display model
//!
//! What the player shows, computed by the session. Painting it is left to
//! the front-end.

use crate::types::{PlaybackStatus, StatusMessage};
use serde::Serialize;

pub const STATS_LOADING: &str = "Loading stats...";
pub const STATS_UNAVAILABLE: &str = "Stats unavailable";

/// Play/pause button face, mirroring the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum PlayButton {
    /// Engine is paused: offer to play
    #[default]
    Play,
    /// Engine is playing: offer to pause
    Pause,
}

impl PlayButton {
    pub fn label(self) -> &'static str {
        match self {
            PlayButton::Play => "PLAY",
            PlayButton::Pause => "PAUSE",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            PlayButton::Play => "▶",
            PlayButton::Pause => "⏸",
        }
    }
}

/// Snapshot of everything the player displays
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionDisplay {
    pub status: PlaybackStatus,
    pub title: String,
    pub author: String,
    /// `"{elapsed} / {total}"`
    pub time_readout: String,
    /// Progress bar width, 0-100
    pub progress_percent: f64,
    pub play_button: PlayButton,
    pub volume_readout: String,
    pub status_message: StatusMessage,
    pub stats_text: String,
}

impl Default for SessionDisplay {
    fn default() -> Self {
        Self {
            status: PlaybackStatus::Idle,
            title: String::new(),
            author: String::new(),
            time_readout: "0:00 / 0:00".to_string(),
            progress_percent: 0.0,
            play_button: PlayButton::Play,
            volume_readout: String::new(),
            status_message: StatusMessage::default(),
            stats_text: STATS_LOADING.to_string(),
        }
    }
}
