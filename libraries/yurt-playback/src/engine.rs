//! Platform-agnostic audio engine trait
//!
//! The engine decodes and plays a source reference; the session only drives
//! it. Engines report lifecycle changes asynchronously by posting
//! [`EngineEvent`](crate::EngineEvent)s through a
//! [`SessionEvents`](crate::SessionEvents) handle they are given at
//! construction. Every event carries the [`SourceTag`] of the source that
//! produced it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies one `load` on the engine
///
/// Events stamped with a tag other than the loaded source's are left over
/// from a replaced source and are dropped by the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct SourceTag(u64);

impl SourceTag {
    /// Tag for the source loaded after this one
    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SourceTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Source handed to the engine on track load
#[derive(Debug, Clone, PartialEq)]
pub struct EngineSource {
    /// Echoed back on every event this source produces
    pub tag: SourceTag,

    /// Stream URL
    pub url: String,

    /// Duration the catalog reported, if known
    ///
    /// Engines that probe the stream themselves may ignore it.
    pub duration_hint: Option<f64>,
}

/// Audio rendering engine
///
/// Commands are requests: the session treats the engine's own `Play`/`Pause`
/// events as the truth about whether audio is playing.
pub trait AudioEngine: Send {
    /// Replace the current source; position resets to zero
    ///
    /// Events from here on must carry `source.tag`.
    fn load(&mut self, source: &EngineSource);

    /// Start or resume playback
    fn play(&mut self);

    /// Pause playback
    fn pause(&mut self);

    /// Current position in seconds
    fn current_time(&self) -> f64;

    /// Jump to `seconds`
    fn seek_to(&mut self, seconds: f64);

    /// Duration in seconds, NaN while unknown
    fn duration(&self) -> f64;

    /// Volume in `[0.0, 1.0]`
    fn set_volume(&mut self, volume: f32);
}
