//! Yurt Radio - random-track player for a Yurt catalog
use anyhow::Context;
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::watch;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use yurt_core::Catalog;
use yurt_playback::{KeyBindings, SessionChannel, SessionController, SessionDisplay, SessionEvents};
use yurt_radio::{
    config::RadioConfig,
    engine::ClockEngine,
    terminal::{self, LineInput},
    DEFAULT_LOG_FILTER,
};

#[derive(Parser)]
#[command(name = "yurt-radio")]
#[command(about = "Random-track radio player for a Yurt catalog", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Catalog API base URL (overrides config)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Initial volume, 0-100 (overrides config)
    #[arg(long, global = true)]
    volume: Option<u8>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive session (default)
    Play,
    /// Print the collection summary
    Stats,
    /// Print one random track as JSON
    Track,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout is the player display
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = RadioConfig::load(cli.config.as_deref())?;
    if let Some(api_url) = cli.api_url {
        config.catalog.base_url = api_url;
    }
    if let Some(volume) = cli.volume {
        config.session.initial_volume = volume;
    }
    config.validate()?;

    match cli.command.unwrap_or(Commands::Play) {
        Commands::Play => play(config).await,
        Commands::Stats => print_stats(&config).await,
        Commands::Track => print_track(&config).await,
    }
}

async fn play(config: RadioConfig) -> anyhow::Result<()> {
    let client = config.catalog_client()?;
    tracing::info!(url = %client.base_url(), "Starting Yurt Radio");

    match client.health().await {
        Ok(health) if health.is_ok() => tracing::info!("Catalog reachable"),
        Ok(health) => tracing::warn!(status = %health.status, "Catalog reports unhealthy"),
        Err(e) => tracing::warn!(error = %e, "Catalog health check failed"),
    }

    let channel = SessionChannel::new();
    let mut engine = ClockEngine::new(channel.sender(), config.tick());
    if let Some(length) = config.fallback_track_length() {
        engine = engine.with_fallback_length(length);
    }
    let mut session = SessionController::new(
        config.session_config()?,
        Arc::new(client),
        Box::new(engine),
        channel,
    );

    let bindings = session.bindings().clone();
    eprintln!(
        "Keys: {:?} play/pause, {:?} next. Commands: seek 0.5, vol 40, quit",
        bindings.toggle, bindings.advance
    );

    let renderer = tokio::spawn(render_display(session.subscribe()));
    let reader = tokio::spawn(read_commands(session.sender(), bindings));

    session.start();
    session.run().await;

    reader.abort();
    renderer.abort();
    println!();

    Ok(())
}

/// Forward stdin lines to the session; EOF ends the session
async fn read_commands(events: SessionEvents, bindings: KeyBindings) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        match lines.next_line().await {
            Ok(Some(line)) => match terminal::parse_line(&line, &bindings) {
                LineInput::Command(command) => events.command(command),
                LineInput::Blank => {}
                LineInput::Unknown(text) => tracing::warn!(input = %text, "Unknown command"),
            },
            Ok(None) => break,
            Err(e) => {
                tracing::error!(error = %e, "Failed to read stdin");
                break;
            }
        }
    }

    events.shutdown();
}

/// Redraw the player line whenever the display changes
async fn render_display(mut display: watch::Receiver<SessionDisplay>) {
    let mut stats_text = String::new();

    while display.changed().await.is_ok() {
        let snapshot = display.borrow_and_update().clone();
        let mut stdout = std::io::stdout().lock();

        if snapshot.stats_text != stats_text {
            stats_text.clone_from(&snapshot.stats_text);
            let _ = writeln!(stdout, "\r\x1b[2K{}", stats_text);
        }

        let _ = write!(stdout, "\r\x1b[2K{}", terminal::render(&snapshot));
        let _ = stdout.flush();
    }
}

async fn print_stats(config: &RadioConfig) -> anyhow::Result<()> {
    let client = config.catalog_client()?;
    let stats = client.stats().await.context("Failed to fetch stats")?;

    println!("{}", stats.summary());
    Ok(())
}

async fn print_track(config: &RadioConfig) -> anyhow::Result<()> {
    let client = config.catalog_client()?;
    let track = client
        .random_track()
        .await
        .context("Failed to fetch a random track")?;

    tracing::info!(url = %client.stream_url(&track.id), "Stream URL");
    println!("{}", serde_json::to_string_pretty(&track)?);
    Ok(())
}
