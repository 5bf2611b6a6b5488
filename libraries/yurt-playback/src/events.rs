//! Session Events
//!
//! Everything that can change a session arrives as a [`SessionEvent`] on one
//! queue and is handled in order by the controller:
//! - User commands (play/pause, next, seek, volume)
//! - Engine lifecycle events (play, pause, ended, timeupdate, error)
//! - Completed catalog fetches, tagged with their request epoch
//! - Status-line auto-clear timers

use crate::engine::SourceTag;
use crate::epoch::RequestEpoch;
use crate::error::SessionError;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::trace;
use yurt_core::{CatalogError, Stats, Track};

/// Events emitted by the audio engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EngineEvent {
    /// Playback started or resumed
    Play,

    /// Playback paused
    Pause,

    /// Reached the end of the source
    Ended,

    /// Playback position moved
    TimeUpdate,

    /// Source could not be loaded or played
    Error(String),
}

/// Abstract user commands, independent of any widget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum UserCommand {
    /// Play/pause toggle
    TogglePlay,

    /// Fetch and play a new track
    Next,

    /// Jump to a fraction (0.0-1.0) of the track
    Seek(f64),

    /// Volume in percent; clamped to 0-100
    SetVolume(i32),

    /// End the session
    Quit,
}

/// Everything a session reacts to
#[derive(Debug)]
pub enum SessionEvent {
    Command(UserCommand),

    /// Lifecycle event from the engine's source `source`
    Engine {
        source: SourceTag,
        event: EngineEvent,
    },

    /// A track fetch finished; only the current epoch's result is applied
    TrackFetched {
        epoch: RequestEpoch,
        result: Result<Track, SessionError>,
    },

    StatsFetched(Result<Stats, CatalogError>),

    /// Auto-clear timer for status message `generation` fired
    StatusExpired {
        generation: u64,
    },

    /// Stop the event loop
    Shutdown,
}

/// Cloneable handle for posting events to a session
///
/// Handed to the engine, input readers and the session's own background
/// tasks. Posting to a session that has shut down is a no-op.
#[derive(Debug, Clone)]
pub struct SessionEvents {
    tx: mpsc::UnboundedSender<SessionEvent>,
}

impl SessionEvents {
    pub fn send(&self, event: SessionEvent) {
        if self.tx.send(event).is_err() {
            trace!("Session closed, dropping event");
        }
    }

    /// Post an engine lifecycle event for the source tagged `source`
    pub fn engine(&self, source: SourceTag, event: EngineEvent) {
        self.send(SessionEvent::Engine { source, event });
    }

    /// Post a user command
    pub fn command(&self, command: UserCommand) {
        self.send(SessionEvent::Command(command));
    }

    pub fn shutdown(&self) {
        self.send(SessionEvent::Shutdown);
    }
}

/// Receiving end of a session's event queue
///
/// Normally owned by the controller; engine tests hold it directly to see
/// what an engine posts.
#[derive(Debug)]
pub struct SessionInbox {
    rx: mpsc::UnboundedReceiver<SessionEvent>,
}

impl SessionInbox {
    pub async fn recv(&mut self) -> Option<SessionEvent> {
        self.rx.recv().await
    }

    /// Next queued event, without waiting
    pub fn try_recv(&mut self) -> Option<SessionEvent> {
        self.rx.try_recv().ok()
    }
}

/// A session's event queue
///
/// Created before the session so the engine can be given a sender first:
///
/// ```ignore
/// let channel = SessionChannel::new();
/// let engine = MyEngine::new(channel.sender());
/// let session = SessionController::new(config, catalog, Box::new(engine), channel);
/// ```
#[derive(Debug)]
pub struct SessionChannel {
    events: SessionEvents,
    inbox: SessionInbox,
}

impl SessionChannel {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            events: SessionEvents { tx },
            inbox: SessionInbox { rx },
        }
    }

    pub fn sender(&self) -> SessionEvents {
        self.events.clone()
    }

    pub fn split(self) -> (SessionEvents, SessionInbox) {
        (self.events, self.inbox)
    }
}

impl Default for SessionChannel {
    fn default() -> Self {
        Self::new()
    }
}
