//! One-shot delayed tasks for the refresh sequence
//!
//! A scheduler never runs controller code itself. When a timer fires it hands
//! a [`TimerEvent`] back to the owner of the controller, which feeds it to
//! `RefreshableView::handle_timer` on the same thread that delivers scroll
//! events.

mod manual;
mod runtime;

use std::fmt;
use std::time::Duration;

pub use manual::ManualScheduler;
pub use runtime::TokioScheduler;

/// Event delivered when a scheduled timer fires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// The refresh delay of the gesture identified by `generation` elapsed
    RefreshDue { generation: u64 },
}

/// Schedules a [`TimerEvent`] to be delivered after a delay
pub trait Scheduler {
    fn schedule(&self, delay: Duration, event: TimerEvent) -> TimerHandle;
}

/// Cancels its timer when cancelled explicitly or dropped
#[must_use = "dropping a TimerHandle cancels the timer"]
pub struct TimerHandle {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl TimerHandle {
    pub fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// Cancel the timer; a timer that already fired is unaffected
    pub fn cancel(mut self) {
        self.fire_cancel();
    }

    fn fire_cancel(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        self.fire_cancel();
    }
}

impl fmt::Debug for TimerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimerHandle")
            .field("armed", &self.cancel.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_handle_cancels_once_on_drop() {
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let handle = TimerHandle::new(move || counter.set(counter.get() + 1));
        drop(handle);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_explicit_cancel_does_not_repeat_on_drop() {
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        TimerHandle::new(move || counter.set(counter.get() + 1)).cancel();
        assert_eq!(calls.get(), 1);
    }
}
