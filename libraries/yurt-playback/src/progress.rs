//! Progress readout and seek mapping
//!
//! An engine that has not learned the duration yet reports NaN (or zero, or
//! infinity for live sources); both progress and seek are no-ops until it is
//! known.

use serde::Serialize;
use yurt_core::format_progress;

/// Progress bar and time readout for one position
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Progress {
    /// Width of the progress bar, 0-100
    pub percentage: f64,

    /// `"{elapsed} / {total}"`
    pub readout: String,
}

/// `Some(duration)` if it is usable for progress math
pub fn known_duration(duration: f64) -> Option<f64> {
    (duration.is_finite() && duration > 0.0).then_some(duration)
}

/// Progress at `current_time`, or `None` while the duration is unknown
pub fn compute(current_time: f64, duration: f64) -> Option<Progress> {
    let duration = known_duration(duration)?;
    let current_time = current_time.max(0.0);
    let percentage = (current_time / duration * 100.0).clamp(0.0, 100.0);

    Some(Progress {
        percentage,
        readout: format_progress(current_time, duration),
    })
}

/// Target time for a normalized position along the progress bar
///
/// `fraction` is clamped to `[0, 1]`, so the target always lies in
/// `[0, duration]`.
pub fn seek_target(fraction: f64, duration: f64) -> Option<f64> {
    let duration = known_duration(duration)?;
    if fraction.is_nan() {
        return None;
    }
    Some(fraction.clamp(0.0, 1.0) * duration)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn unknown_duration_is_noop() {
        assert!(compute(10.0, f64::NAN).is_none());
        assert!(compute(10.0, 0.0).is_none());
        assert!(compute(10.0, f64::INFINITY).is_none());
        assert!(seek_target(0.5, f64::NAN).is_none());
        assert!(seek_target(0.5, 0.0).is_none());
    }

    #[test]
    fn halfway() {
        let progress = compute(112.5, 225.0).unwrap();
        assert_eq!(progress.percentage, 50.0);
        assert_eq!(progress.readout, "1:52 / 3:45");
    }

    #[test]
    fn seek_maps_fraction() {
        assert_eq!(seek_target(0.25, 200.0), Some(50.0));
        assert_eq!(seek_target(1.5, 200.0), Some(200.0));
        assert_eq!(seek_target(-0.1, 200.0), Some(0.0));
        assert_eq!(seek_target(f64::NAN, 200.0), None);
    }

    proptest! {
        #[test]
        fn percentage_matches_ratio(duration in 1.0f64..20_000.0, ratio in 0.0f64..=1.0) {
            let current = duration * ratio;
            let progress = compute(current, duration).unwrap();
            prop_assert!((progress.percentage - 100.0 * current / duration).abs() < 1e-9);
        }

        #[test]
        fn percentage_is_monotonic(duration in 1.0f64..20_000.0, a in 0.0f64..=1.0, b in 0.0f64..=1.0) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            let p_lo = compute(lo * duration, duration).unwrap().percentage;
            let p_hi = compute(hi * duration, duration).unwrap().percentage;
            prop_assert!(p_lo <= p_hi);
        }

        #[test]
        fn seek_stays_in_track(duration in 0.001f64..20_000.0, fraction in -2.0f64..3.0) {
            let target = seek_target(fraction, duration).unwrap();
            prop_assert!((0.0..=duration).contains(&target));
        }
    }
}
