//! Playback session controller - core orchestration
//!
//! Owns the current track, playback status and status line. Issues catalog
//! fetches and turns engine events and user commands into transitions.
//! Everything runs on one event queue; the only hazards are interleavings,
//! handled with request epochs and generation-tagged timers rather than
//! locks.

use crate::{
    display::{PlayButton, SessionDisplay, STATS_LOADING, STATS_UNAVAILABLE},
    engine::{AudioEngine, EngineSource, SourceTag},
    epoch::{RequestEpoch, RequestSequencer},
    error::SessionError,
    events::{EngineEvent, SessionChannel, SessionEvent, SessionEvents, SessionInbox, UserCommand},
    keys::{InputFocus, KeyBindings},
    progress::{self, known_duration},
    status::StatusLine,
    types::{PlaybackStatus, SessionConfig, StatusKind, StatusMessage},
    volume::Volume,
};
use std::ops::ControlFlow;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, error, info, warn};
use yurt_core::{format_progress, Catalog, CatalogError, Stats, Track};

const LOADING_TRACK: &str = "Loading track...";
const LOADING_NEXT: &str = "Loading next track...";

/// Playback session controller
///
/// One instance per session. Must be driven from within a tokio runtime:
/// fetches and status timers run as spawned tasks that report back through
/// the session's event queue.
pub struct SessionController {
    config: SessionConfig,
    catalog: Arc<dyn Catalog>,
    engine: Box<dyn AudioEngine>,

    status: PlaybackStatus,
    current_track: Option<Track>,
    stats: Option<Stats>,
    requests: RequestSequencer,
    /// Tag of the source the engine is playing
    loaded_source: SourceTag,

    /// Last thing the engine told us (set optimistically on autoplay)
    engine_playing: bool,

    volume: Volume,
    status_line: StatusLine,
    time_readout: String,
    progress_percent: f64,
    stats_text: String,

    display: watch::Sender<SessionDisplay>,
    events: SessionEvents,
    inbox: SessionInbox,
}

impl SessionController {
    /// Create a session over `channel`
    ///
    /// The engine should already hold a sender from the same channel.
    pub fn new(
        config: SessionConfig,
        catalog: Arc<dyn Catalog>,
        engine: Box<dyn AudioEngine>,
        channel: SessionChannel,
    ) -> Self {
        let (events, inbox) = channel.split();
        let volume = Volume::new(config.initial_volume);
        let (display, _) = watch::channel(SessionDisplay::default());

        Self {
            config,
            catalog,
            engine,
            status: PlaybackStatus::Idle,
            current_track: None,
            stats: None,
            requests: RequestSequencer::new(),
            loaded_source: SourceTag::default(),
            engine_playing: false,
            volume,
            status_line: StatusLine::new(),
            time_readout: format_progress(0.0, 0.0),
            progress_percent: 0.0,
            stats_text: STATS_LOADING.to_string(),
            display,
            events,
            inbox,
        }
    }

    /// Apply the initial volume and kick off the stats fetch
    pub fn start(&mut self) {
        info!("Session initializing");

        self.engine.set_volume(self.volume.gain());
        self.fetch_stats();
        self.publish();

        info!(volume = self.volume.level(), "Session ready");
    }

    // ===== Event Loop =====

    /// Handle events until `Shutdown` or a `Quit` command
    pub async fn run(&mut self) {
        while let Some(event) = self.inbox.recv().await {
            if self.dispatch(event).is_break() {
                break;
            }
        }
        info!("Session ended");
    }

    /// Handle every event already queued, without waiting
    pub fn pump(&mut self) -> ControlFlow<()> {
        while let Some(event) = self.inbox.try_recv() {
            if self.dispatch(event).is_break() {
                return ControlFlow::Break(());
            }
        }
        ControlFlow::Continue(())
    }

    /// Event-to-transition table
    pub fn dispatch(&mut self, event: SessionEvent) -> ControlFlow<()> {
        let flow = match event {
            SessionEvent::Command(command) => self.handle_command(command),
            SessionEvent::Engine { source, event } => {
                if source == self.loaded_source {
                    self.handle_engine_event(event);
                } else {
                    debug!(
                        %source,
                        loaded = %self.loaded_source,
                        ?event,
                        "Discarding event from replaced source"
                    );
                }
                ControlFlow::Continue(())
            }
            SessionEvent::TrackFetched { epoch, result } => {
                self.on_track_fetched(epoch, result);
                ControlFlow::Continue(())
            }
            SessionEvent::StatsFetched(result) => {
                self.on_stats_fetched(result);
                ControlFlow::Continue(())
            }
            SessionEvent::StatusExpired { generation } => {
                if self.status_line.expire(generation) {
                    debug!(generation, "Status message cleared");
                }
                ControlFlow::Continue(())
            }
            SessionEvent::Shutdown => ControlFlow::Break(()),
        };

        self.publish();
        flow
    }

    // ===== User Commands =====

    pub fn handle_command(&mut self, command: UserCommand) -> ControlFlow<()> {
        match command {
            UserCommand::TogglePlay => self.toggle_play(),
            UserCommand::Next => self.play_next(),
            UserCommand::Seek(fraction) => self.seek(fraction),
            UserCommand::SetVolume(percent) => self.set_volume(percent),
            UserCommand::Quit => return ControlFlow::Break(()),
        }
        ControlFlow::Continue(())
    }

    /// Run the command bound to `key`, unless focus is in a text input
    pub fn handle_key(&mut self, key: char, focus: InputFocus) -> ControlFlow<()> {
        match self.config.bindings.translate(key, focus) {
            Some(command) => self.handle_command(command),
            None => ControlFlow::Continue(()),
        }
    }

    /// Play/pause, fetching a first track if nothing is loaded
    ///
    /// With no track (or after an error) this starts a fetch; repeated calls
    /// while that fetch is in flight do nothing. Otherwise asks the engine
    /// to flip; the status follows the engine's answer.
    pub fn toggle_play(&mut self) {
        if self.current_track.is_none() || self.status == PlaybackStatus::Error {
            if self.requests.is_pending() {
                debug!(epoch = %self.requests.current(), "Fetch in flight, ignoring play");
            } else {
                self.begin_fetch(LOADING_TRACK);
            }
        } else if self.engine_playing {
            self.engine.pause();
        } else {
            self.engine.play();
        }
        self.publish();
    }

    /// Fetch a new track and autoplay it, whatever the current status
    ///
    /// Supersedes any fetch in flight.
    pub fn play_next(&mut self) {
        self.begin_fetch(LOADING_NEXT);
        self.publish();
    }

    /// Jump to `fraction` (0.0-1.0) of the track; no-op while the duration
    /// is unknown
    pub fn seek(&mut self, fraction: f64) {
        let Some(target) = progress::seek_target(fraction, self.engine.duration()) else {
            debug!(fraction, "Duration unknown, ignoring seek");
            return;
        };

        debug!(fraction, target, "Seeking");
        self.engine.seek_to(target);
    }

    /// Set volume from a percent, clamped to 0-100
    pub fn set_volume(&mut self, percent: i32) {
        self.volume.set_percent(percent);
        self.engine.set_volume(self.volume.gain());
        self.publish();
    }

    // ===== Track Loading =====

    /// Make `track` current and hand its stream to the engine
    ///
    /// The new source gets a fresh tag, so events still queued from the
    /// previous source no longer apply. With `autoplay` the engine is told
    /// to play and the status is set to `Playing` ahead of the engine's own
    /// `Play` event.
    pub fn load_track(&mut self, track: Track, autoplay: bool) {
        self.loaded_source = self.loaded_source.next();
        let source = EngineSource {
            tag: self.loaded_source,
            url: self.catalog.stream_url(&track.id),
            duration_hint: known_duration(track.duration),
        };

        info!(
            track_id = %track.id,
            source = %self.loaded_source,
            title = %track.display_title(),
            author = %track.display_author(),
            autoplay,
            "Loading track"
        );

        self.engine.load(&source);
        self.time_readout = format_progress(0.0, track.duration);
        self.progress_percent = 0.0;
        self.current_track = Some(track);
        self.clear_status();

        if autoplay {
            self.engine.play();
            self.engine_playing = true;
            self.status = PlaybackStatus::Playing;
        } else {
            self.engine_playing = false;
            self.status = PlaybackStatus::Paused;
        }
        self.publish();
    }

    /// Refresh the progress bar and time readout from the engine
    ///
    /// No-op while the duration is unknown.
    pub fn update_progress(&mut self) {
        let Some(progress) = progress::compute(self.engine.current_time(), self.engine.duration())
        else {
            return;
        };

        self.progress_percent = progress.percentage;
        self.time_readout = progress.readout;
        self.publish();
    }

    // ===== Status Line =====

    /// Replace the status message
    ///
    /// Non-error messages clear after the configured delay; a newer message
    /// cancels the older one's timer.
    pub fn show_status(&mut self, text: &str, kind: StatusKind) {
        self.status_line
            .show(text, kind, self.config.status_clear_delay, &self.events);
        self.publish();
    }

    pub fn clear_status(&mut self) {
        self.status_line.clear();
        self.publish();
    }

    // ===== Catalog =====

    /// Fetch collection stats in the background
    ///
    /// Failure degrades the stats line only; playback is unaffected.
    pub fn fetch_stats(&self) {
        let catalog = Arc::clone(&self.catalog);
        let events = self.events.clone();

        tokio::spawn(async move {
            let result = catalog.stats().await;
            events.send(SessionEvent::StatsFetched(result));
        });
    }

    /// Fetch one random track tagged with `epoch`
    ///
    /// Touches no session state; the result comes back as `TrackFetched`.
    fn fetch_random_track(&self, epoch: RequestEpoch) {
        let catalog = Arc::clone(&self.catalog);
        let events = self.events.clone();

        tokio::spawn(async move {
            let result = catalog.random_track().await.map_err(SessionError::from);
            events.send(SessionEvent::TrackFetched { epoch, result });
        });
    }

    fn begin_fetch(&mut self, message: &str) {
        let epoch = self.requests.begin();
        debug!(%epoch, "Requesting track");

        self.status = PlaybackStatus::Loading;
        self.show_status(message, StatusKind::Loading);
        self.fetch_random_track(epoch);
    }

    fn on_track_fetched(&mut self, epoch: RequestEpoch, result: Result<Track, SessionError>) {
        if !self.requests.complete(epoch) {
            debug!(
                %epoch,
                current = %self.requests.current(),
                "Discarding superseded track fetch"
            );
            return;
        }

        match result {
            Ok(track) => self.load_track(track, true),
            Err(err) => self.fail(err),
        }
    }

    fn on_stats_fetched(&mut self, result: Result<Stats, CatalogError>) {
        match result {
            Ok(stats) => {
                info!(total_tracks = stats.total_tracks, "Stats loaded");
                self.stats_text = stats.summary();
                self.stats = Some(stats);
            }
            Err(err) => {
                warn!(error = %err, "Failed to fetch stats");
                self.stats_text = STATS_UNAVAILABLE.to_string();
            }
        }
    }

    // ===== Engine Events =====

    fn handle_engine_event(&mut self, event: EngineEvent) {
        match event {
            EngineEvent::Play => {
                self.engine_playing = true;
                // A pending fetch keeps the session in Loading until it lands
                if self.current_track.is_some() && self.status != PlaybackStatus::Loading {
                    self.status = PlaybackStatus::Playing;
                }
            }
            EngineEvent::Pause => {
                self.engine_playing = false;
                if self.status == PlaybackStatus::Playing {
                    self.status = PlaybackStatus::Paused;
                }
            }
            EngineEvent::Ended => self.on_ended(),
            EngineEvent::TimeUpdate => self.update_progress(),
            EngineEvent::Error(detail) => {
                self.engine_playing = false;
                self.fail(SessionError::Playback(detail));
            }
        }
    }

    /// Auto-advance, at most once per pending fetch
    fn on_ended(&mut self) {
        self.engine_playing = false;

        if self.current_track.is_none() {
            return;
        }
        if self.requests.is_pending() {
            debug!(epoch = %self.requests.current(), "Advance in flight, ignoring ended");
            return;
        }

        info!("Track ended, advancing");
        self.status = PlaybackStatus::Ended;
        self.play_next();
    }

    fn fail(&mut self, err: SessionError) {
        match &err {
            SessionError::Playback(_) => error!(error = %err, "Playback failed"),
            _ => warn!(error = %err, "Track fetch failed"),
        }

        self.status = PlaybackStatus::Error;
        self.show_status(err.user_message(), StatusKind::Error);
    }

    // ===== State Queries =====

    pub fn status(&self) -> PlaybackStatus {
        self.status
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.current_track.as_ref()
    }

    pub fn stats(&self) -> Option<&Stats> {
        self.stats.as_ref()
    }

    /// Tag engine events must carry to be applied
    pub fn loaded_source(&self) -> SourceTag {
        self.loaded_source
    }

    /// Most recently issued fetch epoch
    pub fn current_epoch(&self) -> RequestEpoch {
        self.requests.current()
    }

    pub fn is_fetch_pending(&self) -> bool {
        self.requests.is_pending()
    }

    pub fn status_message(&self) -> &StatusMessage {
        self.status_line.message()
    }

    pub fn volume(&self) -> u8 {
        self.volume.level()
    }

    pub fn bindings(&self) -> &KeyBindings {
        &self.config.bindings
    }

    /// Handle for posting commands and engine events
    pub fn sender(&self) -> SessionEvents {
        self.events.clone()
    }

    /// Current display snapshot
    pub fn display(&self) -> SessionDisplay {
        SessionDisplay {
            status: self.status,
            title: self
                .current_track
                .as_ref()
                .map(|t| t.display_title().to_string())
                .unwrap_or_default(),
            author: self
                .current_track
                .as_ref()
                .map(|t| t.display_author().to_string())
                .unwrap_or_default(),
            time_readout: self.time_readout.clone(),
            progress_percent: self.progress_percent,
            play_button: if self.engine_playing {
                PlayButton::Pause
            } else {
                PlayButton::Play
            },
            volume_readout: self.volume.readout(),
            status_message: self.status_line.message().clone(),
            stats_text: self.stats_text.clone(),
        }
    }

    /// Receive a display snapshot whenever it changes
    pub fn subscribe(&self) -> watch::Receiver<SessionDisplay> {
        self.display.subscribe()
    }

    fn publish(&self) {
        let snapshot = self.display();
        self.display.send_if_modified(|current| {
            if *current == snapshot {
                false
            } else {
                *current = snapshot;
                true
            }
        });
    }
}
