use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::Duration;

use super::{Scheduler, TimerEvent, TimerHandle};

#[derive(Debug)]
struct PendingTimer {
    id: u64,
    due: Duration,
    event: TimerEvent,
}

#[derive(Debug, Default)]
struct ManualState {
    now: Duration,
    next_id: u64,
    pending: Vec<PendingTimer>,
}

/// Scheduler driven by an explicit virtual clock
///
/// Nothing fires on its own: `advance()` moves the clock forward and returns
/// every event whose deadline has been reached, in deadline order.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    state: Rc<RefCell<ManualState>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Virtual time elapsed since creation
    pub fn elapsed(&self) -> Duration {
        self.state.borrow().now
    }

    /// Number of timers still waiting to fire
    pub fn pending(&self) -> usize {
        self.state.borrow().pending.len()
    }

    /// Time remaining until the earliest pending timer
    pub fn next_due_in(&self) -> Option<Duration> {
        let state = self.state.borrow();
        state
            .pending
            .iter()
            .map(|timer| timer.due.saturating_sub(state.now))
            .min()
    }

    /// Move the clock forward and collect the timers that fired
    pub fn advance(&self, by: Duration) -> Vec<TimerEvent> {
        let mut state = self.state.borrow_mut();
        state.now = state.now.saturating_add(by);
        let now = state.now;

        let (mut fired, waiting): (Vec<_>, Vec<_>) =
            state.pending.drain(..).partition(|timer| timer.due <= now);
        state.pending = waiting;

        fired.sort_by_key(|timer| (timer.due, timer.id));
        fired.into_iter().map(|timer| timer.event).collect()
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, delay: Duration, event: TimerEvent) -> TimerHandle {
        let id = {
            let mut state = self.state.borrow_mut();
            let id = state.next_id;
            state.next_id += 1;
            let due = state.now.saturating_add(delay);
            state.pending.push(PendingTimer { id, due, event });
            id
        };

        let state: Weak<RefCell<ManualState>> = Rc::downgrade(&self.state);
        TimerHandle::new(move || {
            if let Some(state) = state.upgrade() {
                state.borrow_mut().pending.retain(|timer| timer.id != id);
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn due(generation: u64) -> TimerEvent {
        TimerEvent::RefreshDue { generation }
    }

    #[test]
    fn test_fires_only_when_deadline_reached() {
        let scheduler = ManualScheduler::new();
        let _handle = scheduler.schedule(Duration::from_secs(2), due(1));

        assert!(scheduler.advance(Duration::from_millis(1999)).is_empty());
        assert_eq!(scheduler.next_due_in(), Some(Duration::from_millis(1)));
        assert_eq!(scheduler.advance(Duration::from_millis(1)), vec![due(1)]);
        assert_eq!(scheduler.pending(), 0);
        assert_eq!(scheduler.elapsed(), Duration::from_secs(2));
    }

    #[test]
    fn test_events_come_out_in_deadline_order() {
        let scheduler = ManualScheduler::new();
        let _late = scheduler.schedule(Duration::from_secs(3), due(2));
        let _early = scheduler.schedule(Duration::from_secs(1), due(1));

        assert_eq!(scheduler.advance(Duration::from_secs(5)), vec![due(1), due(2)]);
    }

    #[test]
    fn test_dropped_handle_cancels_timer() {
        let scheduler = ManualScheduler::new();
        let handle = scheduler.schedule(Duration::from_secs(1), due(1));
        drop(handle);

        assert_eq!(scheduler.pending(), 0);
        assert!(scheduler.advance(Duration::from_secs(2)).is_empty());
    }
}
