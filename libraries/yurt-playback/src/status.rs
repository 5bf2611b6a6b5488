//! Status-line message lifecycle
//!
//! At most one message is live. Non-error messages clear themselves after a
//! delay; each message owns its timer, and replacing or clearing the message
//! drops (and so aborts) the previous timer. Expiry notices carry the
//! message generation, so a notice already queued when its timer was
//! superseded is ignored.

use crate::events::{SessionEvent, SessionEvents};
use crate::types::{StatusKind, StatusMessage};
use std::time::Duration;
use tokio::task::JoinHandle;

/// Owned auto-clear timer; aborted on drop
#[derive(Debug)]
pub struct StatusTimer {
    generation: u64,
    handle: JoinHandle<()>,
}

impl StatusTimer {
    /// Post `StatusExpired { generation }` after `delay`
    ///
    /// Must be called from within a tokio runtime.
    pub fn schedule(generation: u64, delay: Duration, events: SessionEvents) -> Self {
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            events.send(SessionEvent::StatusExpired { generation });
        });

        Self { generation, handle }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl Drop for StatusTimer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// The status line and its pending auto-clear
#[derive(Debug, Default)]
pub struct StatusLine {
    message: StatusMessage,
    generation: u64,
    timer: Option<StatusTimer>,
}

impl StatusLine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the message, cancelling any pending auto-clear
    ///
    /// Schedules a new auto-clear unless `kind` is `Error` or `text` is empty.
    pub fn show(
        &mut self,
        text: impl Into<String>,
        kind: StatusKind,
        delay: Duration,
        events: &SessionEvents,
    ) {
        self.generation += 1;
        self.timer = None;
        self.message = StatusMessage::new(text, kind);

        if kind != StatusKind::Error && !self.message.is_empty() {
            self.timer = Some(StatusTimer::schedule(
                self.generation,
                delay,
                events.clone(),
            ));
        }
    }

    /// Clear now, releasing any pending timer
    pub fn clear(&mut self) {
        self.generation += 1;
        self.timer = None;
        self.message = StatusMessage::default();
    }

    /// Handle a timer notice; returns `true` if it cleared the message
    pub fn expire(&mut self, generation: u64) -> bool {
        let current = self
            .timer
            .as_ref()
            .is_some_and(|timer| timer.generation() == generation);

        if current {
            self.timer = None;
            self.message = StatusMessage::default();
        }
        current
    }

    pub fn message(&self) -> &StatusMessage {
        &self.message
    }

    pub fn has_pending_clear(&self) -> bool {
        self.timer.is_some()
    }
}
