//! End-to-end session over the clock engine
//!
//! A real event loop, a real (headless) engine and an in-memory catalog:
//! tracks play out and the session advances on its own.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use yurt_core::{Catalog, CatalogError, Stats, Track, TrackId};
use yurt_playback::{
    PlaybackStatus, SessionChannel, SessionConfig, SessionController, UserCommand,
};
use yurt_radio::{parse_line, ClockEngine, LineInput};

/// Hands out a fixed playlist, then reports an empty catalog
struct PlaylistCatalog {
    tracks: Mutex<VecDeque<Track>>,
    calls: AtomicUsize,
}

impl PlaylistCatalog {
    fn new(tracks: Vec<Track>) -> Self {
        Self {
            tracks: Mutex::new(tracks.into()),
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl Catalog for PlaylistCatalog {
    async fn random_track(&self) -> yurt_core::Result<Track> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.tracks
            .lock()
            .unwrap()
            .pop_front()
            .ok_or(CatalogError::EmptyCatalog)
    }

    async fn stats(&self) -> yurt_core::Result<Stats> {
        Err(CatalogError::Unreachable("stats offline".into()))
    }

    fn stream_url(&self, id: &TrackId) -> String {
        format!("http://catalog.test/api/stream/{}", id)
    }
}

fn track(id: i64, duration: f64) -> Track {
    Track {
        id: TrackId::from(id),
        file_path: format!("music/{}.mp3", id),
        author: "Artist".to_string(),
        duration,
        title: None,
        stream_url: None,
    }
}

fn session_with(catalog: Arc<PlaylistCatalog>) -> SessionController {
    let channel = SessionChannel::new();
    let engine = ClockEngine::new(channel.sender(), Duration::from_millis(250));
    SessionController::new(SessionConfig::default(), catalog, Box::new(engine), channel)
}

#[tokio::test(start_paused = true)]
async fn test_tracks_advance_automatically() {
    let catalog = Arc::new(PlaylistCatalog::new(vec![track(1, 1.0), track(2, 5.0)]));
    let mut session = session_with(Arc::clone(&catalog));
    let events = session.sender();

    session.start();
    let running = tokio::spawn(async move {
        session.run().await;
        session
    });

    events.command(UserCommand::TogglePlay);
    tokio::time::sleep(Duration::from_millis(1600)).await;
    events.command(UserCommand::Quit);

    let session = running.await.unwrap();

    assert_eq!(catalog.calls.load(Ordering::SeqCst), 2);
    assert_eq!(session.status(), PlaybackStatus::Playing);
    assert_eq!(session.current_track().unwrap().id, TrackId::from(2));

    let display = session.display();
    assert_eq!(display.title, "music/2.mp3");
    assert_eq!(display.stats_text, "Stats unavailable");
    assert!(display.time_readout.ends_with("/ 0:05"));
}

#[tokio::test(start_paused = true)]
async fn test_exhausted_catalog_stops_with_error() {
    let catalog = Arc::new(PlaylistCatalog::new(vec![track(1, 1.0)]));
    let mut session = session_with(Arc::clone(&catalog));
    let events = session.sender();

    session.start();
    let running = tokio::spawn(async move {
        session.run().await;
        session
    });

    events.command(UserCommand::TogglePlay);
    tokio::time::sleep(Duration::from_secs(3)).await;
    events.shutdown();

    let session = running.await.unwrap();

    assert_eq!(catalog.calls.load(Ordering::SeqCst), 2);
    assert_eq!(session.status(), PlaybackStatus::Error);
    assert_eq!(session.status_message().text, "No track available");
}

#[tokio::test(start_paused = true)]
async fn test_typed_lines_drive_session() {
    let catalog = Arc::new(PlaylistCatalog::new(vec![track(1, 100.0)]));
    let mut session = session_with(Arc::clone(&catalog));
    let events = session.sender();
    let bindings = session.bindings().clone();

    session.start();
    let running = tokio::spawn(async move {
        session.run().await;
        session
    });

    for line in [" ", "vol 30", "seek 50%"] {
        match parse_line(line, &bindings) {
            LineInput::Command(command) => events.command(command),
            other => panic!("unexpected input {:?}", other),
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    events.command(UserCommand::Quit);

    let session = running.await.unwrap();

    assert_eq!(session.status(), PlaybackStatus::Playing);
    assert_eq!(session.volume(), 30);
    assert_eq!(session.display().time_readout, "0:50 / 1:40");
}
