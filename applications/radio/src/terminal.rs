//! Line-oriented terminal front-end
//!
//! A line holding a single character is a key press and goes through the
//! session's key bindings. Anything longer is typed text, so bound keys
//! inside it do nothing; it is read as a word command instead:
//!
//! | Input | Command |
//! |---|---|
//! | `play`, `pause`, `p` | play/pause |
//! | `next` | next track |
//! | `seek 0.25`, `seek 25%` | seek |
//! | `vol 40`, `volume 40` | volume |
//! | `q`, `quit`, `exit` | quit |

use yurt_playback::{
    InputFocus, KeyBindings, PlaybackStatus, SessionDisplay, StatusKind, UserCommand,
};

const BAR_WIDTH: usize = 20;

/// One parsed input line
#[derive(Debug, Clone, PartialEq)]
pub enum LineInput {
    Command(UserCommand),
    Blank,
    Unknown(String),
}

pub fn parse_line(line: &str, bindings: &KeyBindings) -> LineInput {
    let raw = line.trim_end_matches(['\r', '\n']);

    let mut chars = raw.chars();
    if let (Some(key), None) = (chars.next(), chars.next()) {
        if let Some(command) = bindings.translate(key, InputFocus::Document) {
            return LineInput::Command(command);
        }
    }

    let text = raw.trim();
    if text.is_empty() {
        return LineInput::Blank;
    }

    let lowered = text.to_ascii_lowercase();
    let mut words = lowered.split_whitespace();
    let command = match (words.next(), words.next(), words.next()) {
        (Some("play" | "pause" | "p"), None, None) => Some(UserCommand::TogglePlay),
        (Some("next"), None, None) => Some(UserCommand::Next),
        (Some("seek"), Some(arg), None) => parse_fraction(arg).map(UserCommand::Seek),
        (Some("vol" | "volume"), Some(arg), None) => {
            arg.parse::<i32>().ok().map(UserCommand::SetVolume)
        }
        (Some("q" | "quit" | "exit"), None, None) => Some(UserCommand::Quit),
        _ => None,
    };

    command.map_or_else(|| LineInput::Unknown(text.to_string()), LineInput::Command)
}

/// `0.25` or `25%`
fn parse_fraction(arg: &str) -> Option<f64> {
    let value = match arg.strip_suffix('%') {
        Some(percent) => percent.parse::<f64>().ok()? / 100.0,
        None => arg.parse::<f64>().ok()?,
    };
    value.is_finite().then_some(value)
}

/// One-line rendering of the display model
pub fn render(display: &SessionDisplay) -> String {
    let title = if display.title.is_empty() {
        "(nothing loaded)".to_string()
    } else {
        format!("{} - {}", display.title, display.author)
    };

    let mut line = format!(
        "{} {:<7} | {} | {} [{}] | vol {}",
        display.play_button.icon(),
        status_label(display.status),
        title,
        display.time_readout,
        progress_bar(display.progress_percent),
        display.volume_readout,
    );

    if !display.status_message.is_empty() {
        let marker = match display.status_message.kind {
            StatusKind::Error => "!",
            StatusKind::Loading | StatusKind::None => "~",
        };
        line.push_str(&format!(" | {} {}", marker, display.status_message.text));
    }

    line
}

pub fn status_label(status: PlaybackStatus) -> &'static str {
    match status {
        PlaybackStatus::Idle => "idle",
        PlaybackStatus::Loading => "loading",
        PlaybackStatus::Playing => "playing",
        PlaybackStatus::Paused => "paused",
        PlaybackStatus::Ended => "ended",
        PlaybackStatus::Error => "error",
    }
}

fn progress_bar(percent: f64) -> String {
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * BAR_WIDTH as f64).round() as usize;
    format!("{}{}", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled))
}
