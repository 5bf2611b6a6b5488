//! Request sequencing
//!
//! Every track fetch is tagged with a [`RequestEpoch`]. Starting a new fetch
//! supersedes any fetch still in flight; when a superseded fetch completes
//! its result is discarded instead of clobbering the newer one.
//!
//! There is no network cancellation: stale results are filtered after the
//! fact.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Monotonic tag for one track fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct RequestEpoch(u64);

impl RequestEpoch {
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RequestEpoch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Issues epochs and tracks which one is authoritative
#[derive(Debug, Default)]
pub struct RequestSequencer {
    current: RequestEpoch,
    in_flight: Option<RequestEpoch>,
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new fetch, superseding any in flight
    pub fn begin(&mut self) -> RequestEpoch {
        self.current = RequestEpoch(self.current.0 + 1);
        self.in_flight = Some(self.current);
        self.current
    }

    /// Most recently issued epoch
    pub fn current(&self) -> RequestEpoch {
        self.current
    }

    /// True while the authoritative fetch has not completed
    pub fn is_pending(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Settle a completed fetch
    ///
    /// Returns `true` only for the authoritative epoch, and only once.
    pub fn complete(&mut self, epoch: RequestEpoch) -> bool {
        if self.in_flight == Some(epoch) {
            self.in_flight = None;
            true
        } else {
            false
        }
    }
}
