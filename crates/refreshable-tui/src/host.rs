use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use refreshable_core::animation::IndicatorAnimator;
use refreshable_core::{EasingType, ScrollHost};

use crate::page::Page;

/// Fraction of the pointer movement applied while pulled past the top
pub const OVERSCROLL_RESISTANCE: f64 = 0.6;

/// Duration of the spring back to the top after release
pub const SPRING_BACK_DURATION: Duration = Duration::from_millis(300);

/// Drag in progress, anchored where the button went down
#[derive(Debug, Clone, Copy)]
struct DragAnchor {
    row: u16,
    offset_px: f64,
}

/// Terminal scroll view over a `Page`
///
/// Rows are mapped to logical pixels with `row_height_px`. Dragging past
/// the top produces a negative offset with rubber-band resistance, and
/// releasing springs the content back to zero.
pub struct PageHost {
    page: Rc<RefCell<Page>>,
    row_height_px: f64,
    viewport_rows: u16,
    offset_px: f64,
    drag: Option<DragAnchor>,
    spring: IndicatorAnimator,
}

impl PageHost {
    pub fn new(page: Rc<RefCell<Page>>, row_height_px: f64) -> Self {
        Self {
            page,
            row_height_px: if row_height_px > 0.0 { row_height_px } else { 1.0 },
            viewport_rows: 0,
            offset_px: 0.0,
            drag: None,
            spring: IndicatorAnimator::new(),
        }
    }

    pub fn page(&self) -> &Rc<RefCell<Page>> {
        &self.page
    }

    pub fn row_height_px(&self) -> f64 {
        self.row_height_px
    }

    pub fn viewport_rows(&self) -> u16 {
        self.viewport_rows
    }

    pub fn set_viewport_rows(&mut self, rows: u16) {
        self.viewport_rows = rows;
        self.offset_px = self.offset_px.min(self.max_offset());
    }

    pub fn offset_px(&self) -> f64 {
        self.offset_px
    }

    #[inline]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    #[inline]
    pub fn is_springing(&self) -> bool {
        self.spring.is_animating()
    }

    /// First content line visible at the top of the viewport
    pub fn top_line(&self) -> usize {
        (self.offset_px.max(0.0) / self.row_height_px).floor() as usize
    }

    /// Blank rows revealed above the content while pulled down
    pub fn overscroll_rows(&self) -> u16 {
        let rows = (-self.offset_px).max(0.0) / self.row_height_px;
        (rows.ceil() as u16).min(self.viewport_rows)
    }

    fn max_offset(&self) -> f64 {
        let lines = self.page.borrow().lines().len();
        let hidden = lines.saturating_sub(self.viewport_rows as usize);
        hidden as f64 * self.row_height_px
    }

    /// Start a drag at terminal row `row`
    pub fn begin_drag(&mut self, row: u16) {
        self.spring.cancel();
        self.drag = Some(DragAnchor {
            row,
            offset_px: self.offset_px,
        });
    }

    /// Move the drag to `row`; returns true if the offset changed
    pub fn drag_to(&mut self, row: u16) -> bool {
        let Some(anchor) = self.drag else {
            return false;
        };

        let delta = (row as f64 - anchor.row as f64) * self.row_height_px;
        let mut target = anchor.offset_px - delta;
        if target < 0.0 {
            target *= OVERSCROLL_RESISTANCE;
        }
        target = target.min(self.max_offset());

        let changed = target != self.offset_px;
        self.offset_px = target;
        changed
    }

    /// Release the drag, springing back if pulled past the top
    pub fn end_drag(&mut self, now: Instant) {
        self.drag = None;
        if self.offset_px < 0.0 {
            self.spring.animate(
                self.offset_px,
                0.0,
                SPRING_BACK_DURATION,
                EasingType::EaseOut,
                now,
            );
        }
    }

    /// Scroll by whole rows; negative scrolls up
    pub fn scroll_rows(&mut self, rows: i32) {
        if self.drag.is_some() {
            return;
        }
        self.spring.cancel();
        let target = self.offset_px.max(0.0) + rows as f64 * self.row_height_px;
        self.offset_px = target.clamp(0.0, self.max_offset().max(0.0));
    }

    pub fn scroll_to_top(&mut self) {
        self.spring.cancel();
        self.offset_px = 0.0;
    }

    /// Advance the spring; returns true if the offset moved
    pub fn update(&mut self, now: Instant) -> bool {
        match self.spring.update(now) {
            Some(frame) => {
                self.offset_px = frame.y;
                true
            }
            None => false,
        }
    }
}

impl ScrollHost for PageHost {
    fn content_offset_y(&self) -> f64 {
        self.offset_px
    }

    fn view_height(&self) -> f64 {
        self.viewport_rows as f64 * self.row_height_px
    }
}
