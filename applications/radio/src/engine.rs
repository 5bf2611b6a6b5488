//! Headless clock engine
//!
//! Models a stream's playback clock without decoding audio: the position
//! advances in real time while playing and the engine reports the same
//! lifecycle events a media element would (`Play`, `Pause`, `TimeUpdate`,
//! `Ended`), each stamped with the loaded source's tag.
//!
//! A source whose duration the catalog does not know never ends on its own;
//! [`ClockEngine::with_fallback_length`] caps how long such a source plays.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, warn};
use yurt_playback::{AudioEngine, EngineEvent, EngineSource, SessionEvents, SourceTag};

#[derive(Debug)]
struct ClockState {
    source: Option<EngineSource>,
    tag: SourceTag,
    position: f64,
    /// NaN until known
    duration: f64,
    /// Where the clock stops: the duration, or the fallback length
    end_at: Option<f64>,
    fallback_length: Option<f64>,
    playing: bool,
    volume: f32,
    last_tick: Instant,
    events: SessionEvents,
}

impl ClockState {
    fn advance(&mut self, now: Instant) {
        let elapsed = now.saturating_duration_since(self.last_tick).as_secs_f64();
        self.last_tick = now;

        if !self.playing {
            return;
        }

        self.position += elapsed;
        self.emit(EngineEvent::TimeUpdate);

        if let Some(end) = self.end_at.filter(|end| self.position >= *end) {
            self.position = end;
            self.playing = false;
            debug!(source = %self.tag, position = self.position, "Source ended");
            self.emit(EngineEvent::Pause);
            self.emit(EngineEvent::Ended);
        }
    }

    fn at_end(&self) -> bool {
        self.end_at.is_some_and(|end| self.position >= end)
    }

    fn emit(&self, event: EngineEvent) {
        self.events.engine(self.tag, event);
    }
}

/// [`AudioEngine`] driven by a tokio interval
///
/// Must be created inside a tokio runtime. The ticker task stops when the
/// engine is dropped.
#[derive(Debug)]
pub struct ClockEngine {
    state: Arc<Mutex<ClockState>>,
    ticker: JoinHandle<()>,
}

impl ClockEngine {
    pub fn new(events: SessionEvents, tick: Duration) -> Self {
        let state = Arc::new(Mutex::new(ClockState {
            source: None,
            tag: SourceTag::default(),
            position: 0.0,
            duration: f64::NAN,
            end_at: None,
            fallback_length: None,
            playing: false,
            volume: 1.0,
            last_tick: Instant::now(),
            events,
        }));

        let tick = tick.max(Duration::from_millis(1));
        let ticker_state = Arc::clone(&state);
        let ticker = tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(Instant::now() + tick, tick);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                interval.tick().await;
                lock(&ticker_state).advance(Instant::now());
            }
        });

        Self { state, ticker }
    }

    /// End sources of unknown duration after `length`
    #[must_use]
    pub fn with_fallback_length(self, length: Duration) -> Self {
        lock(&self.state).fallback_length = Some(length.as_secs_f64());
        self
    }

    pub fn is_playing(&self) -> bool {
        lock(&self.state).playing
    }

    pub fn volume(&self) -> f32 {
        lock(&self.state).volume
    }

    /// URL of the loaded source
    pub fn source_url(&self) -> Option<String> {
        lock(&self.state).source.as_ref().map(|s| s.url.clone())
    }
}

impl AudioEngine for ClockEngine {
    fn load(&mut self, source: &EngineSource) {
        let mut state = lock(&self.state);
        debug!(
            source = %source.tag,
            url = %source.url,
            duration = ?source.duration_hint,
            "Loading source"
        );

        state.end_at = source.duration_hint.or(state.fallback_length);
        if source.duration_hint.is_none() {
            match state.fallback_length {
                Some(length) => {
                    warn!(url = %source.url, length, "Duration unknown, using fallback length");
                }
                None => warn!(url = %source.url, "Duration unknown, source will not end"),
            }
        }

        state.source = Some(source.clone());
        state.tag = source.tag;
        state.position = 0.0;
        state.duration = source.duration_hint.unwrap_or(f64::NAN);
        state.playing = false;
    }

    fn play(&mut self) {
        let mut state = lock(&self.state);

        if state.source.is_none() {
            warn!("Play requested with no source loaded");
            return;
        }
        if state.playing {
            return;
        }

        // Replaying a finished source starts over
        if state.at_end() {
            state.position = 0.0;
        }

        state.last_tick = Instant::now();
        state.playing = true;
        state.emit(EngineEvent::Play);
    }

    fn pause(&mut self) {
        let mut state = lock(&self.state);

        if !state.playing {
            return;
        }

        // Count time up to the pause
        state.advance(Instant::now());
        if state.playing {
            state.playing = false;
            state.emit(EngineEvent::Pause);
        }
    }

    fn current_time(&self) -> f64 {
        lock(&self.state).position
    }

    fn seek_to(&mut self, seconds: f64) {
        let mut state = lock(&self.state);

        let upper = state.end_at.unwrap_or(f64::MAX);
        state.position = seconds.clamp(0.0, upper);
        state.last_tick = Instant::now();
        state.emit(EngineEvent::TimeUpdate);
    }

    fn duration(&self) -> f64 {
        lock(&self.state).duration
    }

    fn set_volume(&mut self, volume: f32) {
        lock(&self.state).volume = volume.clamp(0.0, 1.0);
    }
}

impl Drop for ClockEngine {
    fn drop(&mut self) {
        self.ticker.abort();
    }
}

fn lock(state: &Mutex<ClockState>) -> MutexGuard<'_, ClockState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}
