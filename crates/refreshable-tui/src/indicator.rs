use std::cell::Cell;

use refreshable_core::LoadingIndicator;

const FRAMES: [&str; 8] = ["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"];

/// Braille spinner drawn above the page
///
/// Position and visibility are driven by the refresh controller; the app
/// advances the spinner frame on ticks.
#[derive(Debug)]
pub struct SpinnerIndicator {
    height: f64,
    visible: Cell<bool>,
    position_y: Cell<f64>,
    frame: Cell<usize>,
}

impl SpinnerIndicator {
    pub fn new(height: f64) -> Self {
        Self {
            height,
            visible: Cell::new(false),
            position_y: Cell::new(0.0),
            frame: Cell::new(0),
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible.get()
    }

    pub fn position_y(&self) -> f64 {
        self.position_y.get()
    }

    /// Advance to the next spinner frame
    pub fn tick(&self) {
        self.frame.set((self.frame.get() + 1) % FRAMES.len());
    }

    pub fn glyph(&self) -> &'static str {
        FRAMES[self.frame.get()]
    }
}

impl LoadingIndicator for SpinnerIndicator {
    fn set_visible(&self, visible: bool) {
        self.visible.set(visible);
    }

    fn set_position_y(&self, y: f64) {
        self.position_y.set(y);
    }

    fn height(&self) -> f64 {
        self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_wraps_frames() {
        let spinner = SpinnerIndicator::new(20.0);
        let first = spinner.glyph();
        for _ in 0..FRAMES.len() {
            spinner.tick();
        }
        assert_eq!(spinner.glyph(), first);
    }

    #[test]
    fn test_commands_are_recorded() {
        let spinner = SpinnerIndicator::new(20.0);
        spinner.set_visible(true);
        spinner.set_position_y(-20.0);
        assert!(spinner.is_visible());
        assert_eq!(spinner.position_y(), -20.0);
        assert_eq!(spinner.height(), 20.0);
    }
}
