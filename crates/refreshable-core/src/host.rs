//! Capabilities the refresh controller expects from its surroundings
//!
//! The scrollable view, the loading indicator and the refresh listener are
//! owned by the embedding application. The controller only reads scroll
//! geometry and issues position/visibility commands.

/// A scrollable view that reports its vertical content offset
///
/// Offsets are signed logical pixels: `0` is the top of the content and
/// negative values mean the content is pulled past its top edge.
pub trait ScrollHost {
    /// Current vertical content offset
    fn content_offset_y(&self) -> f64;

    /// Visible height of the view
    fn view_height(&self) -> f64;
}

/// Notifications a scroll host delivers, in order, on its event loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollEvent {
    /// The user put a finger down and started dragging
    DragBegin,
    /// The content offset changed
    Scrolled,
    /// The user lifted the finger
    DragEnd {
        /// Whether the content keeps moving after release
        will_decelerate: bool,
    },
}

/// Loading indicator widget positioned above the scrollable view
///
/// Handles are shared with the embedding application, so mutation goes
/// through `&self`.
pub trait LoadingIndicator {
    fn set_visible(&self, visible: bool);

    /// Move the indicator's top edge to `y`
    fn set_position_y(&self, y: f64);

    fn height(&self) -> f64;
}

/// Receives the refresh callback once a pull gesture commits
pub trait OnRefreshListener {
    fn on_refresh(&self, view: &dyn ScrollHost);
}
