//! Pull gesture recognition
//!
//! ## L4 Atomic Layer
//! - `geometry` - Deadband, threshold and indicator-position math
//!
//! ## L3 Molecular Layer
//! - `controller` - The `Idle -> Dragging -> Refreshing` state machine

pub mod geometry;

pub mod controller;

pub use controller::{GestureState, HideKind, PullToRefreshController};
pub use geometry::MOVE_THRESHOLD;
