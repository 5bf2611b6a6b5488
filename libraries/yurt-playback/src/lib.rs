//! Yurt Radio - Playback Session
//!
//! Platform-agnostic playback session for Yurt Radio.
//!
//! This crate provides:
//! - Random-track fetching with stale-response suppression
//! - Play/pause/next with automatic advance when a track ends
//! - Seek by fraction and progress readout
//! - Volume control (0-100%)
//! - Self-clearing status messages
//! - Keyboard shortcuts with text-input suppression
//!
//! # Architecture
//!
//! `yurt-playback` knows nothing about HTTP or audio output:
//! - The catalog comes in as `Arc<dyn yurt_core::Catalog>`
//! - Audio output comes in as `Box<dyn AudioEngine>`
//! - The UI subscribes to [`SessionDisplay`] snapshots
//!
//! All inputs (user commands, engine events, finished fetches, timers) are
//! queued on one [`SessionChannel`] and handled in order, so there is no
//! shared mutable state.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use yurt_playback::{SessionChannel, SessionConfig, SessionController};
//!
//! let channel = SessionChannel::new();
//! let engine = MyEngine::new(channel.sender());
//! let mut session = SessionController::new(
//!     SessionConfig::default(),
//!     Arc::new(catalog),
//!     Box::new(engine),
//!     channel,
//! );
//!
//! session.start();
//! session.toggle_play(); // Idle -> Loading -> Playing
//! session.run().await;
//! ```

pub mod controller;
pub mod display;
pub mod engine;
pub mod epoch;
pub mod error;
pub mod events;
pub mod keys;
pub mod progress;
pub mod status;
pub mod types;
pub mod volume;

// Re-exports
pub use controller::SessionController;
pub use display::{PlayButton, SessionDisplay};
pub use engine::{AudioEngine, EngineSource, SourceTag};
pub use epoch::{RequestEpoch, RequestSequencer};
pub use error::SessionError;
pub use events::{
    EngineEvent, SessionChannel, SessionEvent, SessionEvents, SessionInbox, UserCommand,
};
pub use keys::{InputFocus, KeyBindings};
pub use types::{PlaybackStatus, SessionConfig, StatusKind, StatusMessage};
pub use volume::Volume;
