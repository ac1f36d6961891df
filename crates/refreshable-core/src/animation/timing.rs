//! L4 Atomic Layer: Time calculation utilities for indicator animations
//!
//! Pure functions over an explicit `now`, so callers can drive animations
//! from a real clock or from a scripted one.

use std::time::{Duration, Instant};

/// Calculate animation progress (0.0 to 1.0) at `now`
///
/// # Arguments
/// * `start` - Animation start time
/// * `duration` - Total animation duration
/// * `now` - Point in time to evaluate
///
/// # Returns
/// Progress value clamped to [0.0, 1.0]
#[inline]
pub fn progress(start: Instant, duration: Duration, now: Instant) -> f64 {
    if duration.is_zero() {
        return 1.0;
    }
    let elapsed = now.saturating_duration_since(start);
    let ratio = elapsed.as_secs_f64() / duration.as_secs_f64();
    ratio.clamp(0.0, 1.0)
}

/// Check if animation is complete at `now`
#[inline]
pub fn is_complete(start: Instant, duration: Duration, now: Instant) -> bool {
    now.saturating_duration_since(start) >= duration
}

/// Linear interpolation between two values
///
/// # Arguments
/// * `from` - Start value
/// * `to` - End value
/// * `t` - Interpolation factor [0.0, 1.0]
#[inline]
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp() {
        assert!((lerp(0.0, 100.0, 0.0) - 0.0).abs() < 0.001);
        assert!((lerp(0.0, 100.0, 0.5) - 50.0).abs() < 0.001);
        assert!((lerp(0.0, 100.0, 1.0) - 100.0).abs() < 0.001);
        assert!((lerp(40.0, -20.0, 0.5) - 10.0).abs() < 0.001);
    }

    #[test]
    fn test_progress_zero_duration() {
        let start = Instant::now();
        assert!((progress(start, Duration::ZERO, start) - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_progress_midway_and_past_end() {
        let start = Instant::now();
        let duration = Duration::from_millis(200);
        let half = progress(start, duration, start + Duration::from_millis(100));
        assert!((half - 0.5).abs() < 0.001);
        assert_eq!(progress(start, duration, start + Duration::from_secs(1)), 1.0);
    }

    #[test]
    fn test_now_before_start_counts_as_zero() {
        let start = Instant::now() + Duration::from_secs(1);
        assert_eq!(progress(start, Duration::from_millis(200), Instant::now()), 0.0);
        assert!(!is_complete(start, Duration::from_millis(200), Instant::now()));
    }
}
