//! L4 Atomic Layer: Pure geometry of a pull gesture
//!
//! Offsets are signed content offsets of the scroll host; negative means the
//! content is pulled past its top edge. Distances compare absolute values
//! because both the drag-start and the current offset are usually negative
//! while over-scrolled.

/// Deadband in logical pixels before the indicator starts tracking a pull
pub const MOVE_THRESHOLD: f64 = 10.0;

/// The content is pulled past its top edge
#[inline]
pub fn is_past_top(offset_y: f64) -> bool {
    offset_y < 0.0
}

/// The pull deepened since the previous scroll event
///
/// "Down" means the over-scroll grew, so the offset became more negative.
#[inline]
pub fn is_pulling_down(last_offset_y: f64, offset_y: f64) -> bool {
    offset_y < last_offset_y
}

/// Net pull since the drag began
#[inline]
pub fn pull_distance(drag_start_y: f64, offset_y: f64) -> f64 {
    offset_y.abs() - drag_start_y.abs()
}

/// The pull left the deadband
#[inline]
pub fn is_absolutely_moved(drag_start_y: f64, offset_y: f64) -> bool {
    pull_distance(drag_start_y, offset_y) > MOVE_THRESHOLD
}

/// The pull is deep enough to commit a refresh
#[inline]
pub fn is_over_threshold(drag_start_y: f64, offset_y: f64, threshold: f64) -> bool {
    pull_distance(drag_start_y, offset_y) > threshold
}

/// The indicator should follow this scroll event
pub fn should_track(drag_start_y: f64, last_offset_y: f64, offset_y: f64) -> bool {
    is_past_top(offset_y)
        && is_pulling_down(last_offset_y, offset_y)
        && is_absolutely_moved(drag_start_y, offset_y)
}

/// Indicator position for the current pull
///
/// Proportional to the pull distance, scaled by `threshold / view_height`
/// and halved. A view without height yields `0`.
pub fn indicator_y(drag_start_y: f64, offset_y: f64, threshold: f64, view_height: f64) -> f64 {
    if view_height <= 0.0 {
        return 0.0;
    }
    pull_distance(drag_start_y, offset_y) * threshold / view_height / 2.0
}
