//! Indicator animation system
//!
//! Slides the loading indicator out of view once a pull gesture ends, with
//! configurable easing and duration.
//!
//! # Architecture
//!
//! ## L4 Atomic Layer
//! - `easing` - Pure easing functions (cubic, quintic, exponential, in-out)
//! - `timing` - Time calculation utilities (progress, interpolation)
//! - `config` - Hide animation parameters derived from `AnimationConfig`
//!
//! ## L3 Molecular Layer
//! - `animator` - Animation controller combining atoms
//!
//! # Usage
//!
//! ```
//! use std::time::{Duration, Instant};
//! use refreshable_core::animation::{EasingType, IndicatorAnimator};
//!
//! let mut animator = IndicatorAnimator::new();
//! let start = Instant::now();
//! animator.animate(48.0, -20.0, Duration::from_millis(200), EasingType::Cubic, start);
//!
//! // In the frame loop, advance and apply the position
//! let frame = animator.update(start + Duration::from_millis(250)).unwrap();
//! assert!(frame.finished);
//! assert_eq!(frame.y, -20.0);
//! ```

// L4 Atomic Layer
pub mod config;
pub mod easing;
pub mod timing;

// L3 Molecular Layer
pub mod animator;

// Re-exports for convenient access
pub use animator::{AnimationFrame, IndicatorAnimator};
pub use config::{AnimationConfigExt, HideAnimation};
pub use easing::{EasingType, EasingTypeExt};
