//! L3 Molecular Layer: Indicator animation controller
//!
//! Combines easing functions and timing utilities to slide the loading
//! indicator between two vertical positions. Call `animate()` to begin an
//! animation, then `update()` each frame to get the interpolated position.

use std::time::{Duration, Instant};

use super::easing::{EasingType, EasingTypeExt};
use super::timing::{is_complete, lerp, progress};

/// Active animation state
#[derive(Debug, Clone)]
struct ActiveAnimation {
    /// Animation start time
    start: Instant,
    /// Starting indicator position
    from: f64,
    /// Target indicator position
    to: f64,
    /// Animation duration
    duration: Duration,
    /// Easing function
    easing: EasingType,
}

/// One step of a running animation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationFrame {
    /// Interpolated indicator position
    pub y: f64,
    /// True on the frame that reaches the target
    pub finished: bool,
}

/// Animation controller for the indicator's vertical position
#[derive(Debug, Clone, Default)]
pub struct IndicatorAnimator {
    animation: Option<ActiveAnimation>,
}

impl IndicatorAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if an animation is currently active
    #[inline]
    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Start an animation from `from` to `to`, replacing any running one
    pub fn animate(
        &mut self,
        from: f64,
        to: f64,
        duration: Duration,
        easing: EasingType,
        now: Instant,
    ) {
        self.animation = Some(ActiveAnimation {
            start: now,
            from,
            to,
            duration,
            easing,
        });
    }

    /// Advance the animation to `now`
    ///
    /// Returns `None` when nothing is animating. The frame that reaches the
    /// target has `finished` set and clears the animation.
    pub fn update(&mut self, now: Instant) -> Option<AnimationFrame> {
        let anim = self.animation.as_ref()?;

        if is_complete(anim.start, anim.duration, now) {
            let frame = AnimationFrame {
                y: anim.to,
                finished: true,
            };
            self.animation = None;
            return Some(frame);
        }

        let t = progress(anim.start, anim.duration, now);
        let eased_t = anim.easing.apply(t);
        Some(AnimationFrame {
            y: lerp(anim.from, anim.to, eased_t),
            finished: false,
        })
    }

    /// Cancel any active animation, leaving the indicator where it is
    pub fn cancel(&mut self) {
        self.animation = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_animator_yields_nothing() {
        let mut animator = IndicatorAnimator::new();
        assert!(!animator.is_animating());
        assert!(animator.update(Instant::now()).is_none());
    }

    #[test]
    fn test_animation_interpolates_and_finishes() {
        let mut animator = IndicatorAnimator::new();
        let start = Instant::now();
        animator.animate(40.0, -20.0, Duration::from_millis(200), EasingType::Linear, start);
        assert!(animator.is_animating());

        let mid = animator.update(start + Duration::from_millis(100)).unwrap();
        assert!(!mid.finished);
        assert!((mid.y - 10.0).abs() < 0.001);

        let end = animator.update(start + Duration::from_millis(200)).unwrap();
        assert!(end.finished);
        assert_eq!(end.y, -20.0);
        assert!(!animator.is_animating());
    }

    #[test]
    fn test_zero_duration_finishes_on_first_update() {
        let mut animator = IndicatorAnimator::new();
        let start = Instant::now();
        animator.animate(10.0, 0.0, Duration::ZERO, EasingType::Cubic, start);

        let frame = animator.update(start).unwrap();
        assert!(frame.finished);
        assert_eq!(frame.y, 0.0);
    }

    #[test]
    fn test_cancel_stops_animation() {
        let mut animator = IndicatorAnimator::new();
        let start = Instant::now();
        animator.animate(10.0, 0.0, Duration::from_millis(500), EasingType::Linear, start);
        animator.cancel();
        assert!(animator.update(start + Duration::from_secs(1)).is_none());
    }
}
