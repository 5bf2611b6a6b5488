//! Core types for playback sessions

use crate::keys::KeyBindings;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Playback status
///
/// Exactly one is active at a time. `Playing`/`Paused` mirror the engine;
/// the rest are driven by the session itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PlaybackStatus {
    /// Nothing loaded yet
    #[default]
    Idle,

    /// Waiting on a catalog fetch
    Loading,

    /// Engine is playing
    Playing,

    /// Engine is paused mid-track
    Paused,

    /// Engine reached the end of the track; an advance follows immediately
    Ended,

    /// Last fetch or playback failed; the next play/next retries
    Error,
}

/// Kind of status-line message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StatusKind {
    #[default]
    None,
    Loading,
    /// Sticky until superseded
    Error,
}

/// The single status-line message
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatusMessage {
    pub text: String,
    pub kind: StatusKind,
}

impl StatusMessage {
    pub fn new(text: impl Into<String>, kind: StatusKind) -> Self {
        Self {
            text: text.into(),
            kind,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Configuration for a playback session
#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    /// Initial volume (0-100, default: 80)
    pub initial_volume: u8,

    /// How long non-error status messages stay up (default: 3s)
    pub status_clear_delay: Duration,

    /// Keyboard shortcuts
    pub bindings: KeyBindings,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            initial_volume: 80,
            status_clear_delay: Duration::from_secs(3),
            bindings: KeyBindings::default(),
        }
    }
}
