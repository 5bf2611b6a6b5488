//! Elapsed/total time formatting for the player readout
//!
//! Layout rules:
//! - Truncate to whole seconds
//! - `M:SS` below one hour (minutes unpadded, seconds padded)
//! - `H:MM:SS` from one hour up
//! - Not-a-number or infinite input renders as [`PLACEHOLDER`]

const SECS_PER_HOUR: u64 = 3600;

/// Rendered for unknown times
pub const PLACEHOLDER: &str = "0:00";

/// Format a time in seconds, choosing the layout from the value itself
///
/// ```
/// use yurt_core::format_time;
///
/// assert_eq!(format_time(59.9), "0:59");
/// assert_eq!(format_time(3599.0), "59:59");
/// assert_eq!(format_time(3600.0), "1:00:00");
/// assert_eq!(format_time(f64::NAN), "0:00");
/// ```
pub fn format_time(seconds: f64) -> String {
    match whole_seconds(seconds) {
        Some(secs) => render(secs, secs >= SECS_PER_HOUR),
        None => PLACEHOLDER.to_string(),
    }
}

/// Format `seconds` using the layout of `total`
///
/// When the total runs an hour or more both halves of an `elapsed / total`
/// readout use `H:MM:SS`, so `5:03` of a 62 minute track reads `0:05:03`.
pub fn format_time_for_total(seconds: f64, total: f64) -> String {
    let Some(secs) = whole_seconds(seconds) else {
        return PLACEHOLDER.to_string();
    };

    let long_total = whole_seconds(total).is_some_and(|t| t >= SECS_PER_HOUR);
    render(secs, long_total || secs >= SECS_PER_HOUR)
}

/// `"{elapsed} / {total}"` readout
pub fn format_progress(current: f64, total: f64) -> String {
    format!(
        "{} / {}",
        format_time_for_total(current, total),
        format_time_for_total(total, total)
    )
}

fn whole_seconds(seconds: f64) -> Option<u64> {
    if !seconds.is_finite() {
        return None;
    }
    Some(seconds.max(0.0).trunc() as u64)
}

fn render(secs: u64, with_hours: bool) -> String {
    let hours = secs / SECS_PER_HOUR;
    let mins = (secs % SECS_PER_HOUR) / 60;
    let secs = secs % 60;

    if with_hours {
        format!("{hours}:{mins:02}:{secs:02}")
    } else {
        format!("{mins}:{secs:02}")
    }
}
