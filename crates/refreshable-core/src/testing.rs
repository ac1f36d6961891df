//! Recording fakes for the host, indicator and listener capabilities

use std::cell::{Cell, RefCell};

use crate::host::{LoadingIndicator, OnRefreshListener, ScrollHost};

#[derive(Debug, Clone)]
pub struct FakeHost {
    pub offset_y: f64,
    pub height: f64,
}

impl FakeHost {
    pub fn new(height: f64) -> Self {
        Self {
            offset_y: 0.0,
            height,
        }
    }
}

impl ScrollHost for FakeHost {
    fn content_offset_y(&self) -> f64 {
        self.offset_y
    }

    fn view_height(&self) -> f64 {
        self.height
    }
}

/// Indicator that remembers every command it received
#[derive(Debug, Default)]
pub struct RecordingIndicator {
    height: f64,
    visible: Cell<bool>,
    visibility: RefCell<Vec<bool>>,
    positions: RefCell<Vec<f64>>,
}

impl RecordingIndicator {
    pub fn new(height: f64) -> Self {
        Self {
            height,
            ..Default::default()
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible.get()
    }

    pub fn visibility_changes(&self) -> Vec<bool> {
        self.visibility.borrow().clone()
    }

    pub fn positions(&self) -> Vec<f64> {
        self.positions.borrow().clone()
    }

    pub fn position_y(&self) -> f64 {
        self.positions.borrow().last().copied().unwrap_or(0.0)
    }
}

impl LoadingIndicator for RecordingIndicator {
    fn set_visible(&self, visible: bool) {
        self.visible.set(visible);
        self.visibility.borrow_mut().push(visible);
    }

    fn set_position_y(&self, y: f64) {
        self.positions.borrow_mut().push(y);
    }

    fn height(&self) -> f64 {
        self.height
    }
}

/// Listener that counts callbacks and records the host offset at each one
#[derive(Debug, Default)]
pub struct CountingListener {
    offsets: RefCell<Vec<f64>>,
}

impl CountingListener {
    pub fn calls(&self) -> usize {
        self.offsets.borrow().len()
    }

    pub fn offsets(&self) -> Vec<f64> {
        self.offsets.borrow().clone()
    }
}

impl OnRefreshListener for CountingListener {
    fn on_refresh(&self, view: &dyn ScrollHost) {
        self.offsets.borrow_mut().push(view.content_offset_y());
    }
}
