//! L4 Atomic Layer: Configuration types for indicator animations
//!
//! Converts the file-level `AnimationConfig` into the `HideAnimation`
//! parameters carried by `RefreshSettings`.

use std::time::Duration;

pub use crate::config::{AnimationConfig, EasingType};

/// Parameters of the two indicator hide animations
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HideAnimation {
    /// Slide-out after the refresh listener ran
    pub complete_duration: Duration,
    /// Slide-out when the pull was released below the threshold
    pub cancel_duration: Duration,
    pub easing: EasingType,
}

impl Default for HideAnimation {
    fn default() -> Self {
        AnimationConfig::default().hide_animation()
    }
}

/// Extension trait for AnimationConfig with utility methods
pub trait AnimationConfigExt {
    /// Hide duration after a completed refresh
    fn complete_hide_duration(&self) -> Duration;

    /// Hide duration after a released, uncommitted pull
    fn cancel_hide_duration(&self) -> Duration;

    /// Get tick duration for animation FPS
    fn animation_tick_duration(&self) -> Duration;

    /// Bundle the hide parameters for `RefreshSettings`
    fn hide_animation(&self) -> HideAnimation;
}

impl AnimationConfigExt for AnimationConfig {
    #[inline]
    fn complete_hide_duration(&self) -> Duration {
        Duration::from_millis(self.complete_hide_ms)
    }

    #[inline]
    fn cancel_hide_duration(&self) -> Duration {
        Duration::from_millis(self.cancel_hide_ms)
    }

    #[inline]
    fn animation_tick_duration(&self) -> Duration {
        if self.animation_fps == 0 {
            Duration::from_millis(16) // ~60fps fallback
        } else {
            Duration::from_millis(1000 / self.animation_fps as u64)
        }
    }

    fn hide_animation(&self) -> HideAnimation {
        HideAnimation {
            complete_duration: self.complete_hide_duration(),
            cancel_duration: self.cancel_hide_duration(),
            easing: self.easing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_hide_animation() {
        let hide = HideAnimation::default();
        assert_eq!(hide.complete_duration, Duration::from_millis(500));
        assert_eq!(hide.cancel_duration, Duration::from_millis(200));
        assert_eq!(hide.easing, EasingType::EaseInOut);
    }

    #[test]
    fn test_animation_tick_duration() {
        let mut config = AnimationConfig::default();
        assert_eq!(config.animation_tick_duration(), Duration::from_millis(16));

        config.animation_fps = 0;
        assert_eq!(config.animation_tick_duration(), Duration::from_millis(16));

        config.animation_fps = 20;
        assert_eq!(config.animation_tick_duration(), Duration::from_millis(50));
    }
}
