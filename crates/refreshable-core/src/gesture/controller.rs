//! L3 Molecular Layer: Pull-to-refresh state machine
//!
//! Combines the gesture geometry, the indicator animator and a scheduler.
//! The controller is fed by `RefreshableView`, which owns the scroll host and
//! decides whether events are delivered at all.

use std::rc::Rc;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use super::geometry;
use crate::animation::IndicatorAnimator;
use crate::host::{ScrollEvent, ScrollHost};
use crate::scheduler::{Scheduler, TimerEvent, TimerHandle};
use crate::settings::RefreshSettings;

/// Phase of the pull gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureState {
    /// No finger down, no refresh in flight
    Idle,
    /// Finger down; the indicator follows the pull
    Dragging,
    /// Threshold crossed; waiting for the callback or the final hide
    Refreshing,
}

/// Which hide animation is running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HideKind {
    /// After the refresh listener ran
    Complete,
    /// After a release below the threshold
    Cancel,
}

/// Tracks one scroll host's pull gestures and drives its indicator
pub struct PullToRefreshController {
    settings: RefreshSettings,
    scheduler: Rc<dyn Scheduler>,
    state: GestureState,
    drag_start_y: f64,
    last_offset_y: f64,
    indicator_y: f64,
    animator: IndicatorAnimator,
    hide: Option<HideKind>,
    /// Identifies the refresh a timer belongs to
    generation: u64,
    pending_refresh: Option<TimerHandle>,
}

impl PullToRefreshController {
    /// Create a controller and park the indicator just above the top edge
    pub fn new(settings: RefreshSettings, scheduler: Rc<dyn Scheduler>) -> Self {
        Self::with_generation(settings, scheduler, 0)
    }

    /// Like [`new`](Self::new), numbering refreshes after `generation`
    ///
    /// A view that replaces its controller passes the previous controller's
    /// generation so timer events queued for the old one can never match.
    pub fn with_generation(
        settings: RefreshSettings,
        scheduler: Rc<dyn Scheduler>,
        generation: u64,
    ) -> Self {
        let parked_y = -settings.indicator().height();
        settings.indicator().set_position_y(parked_y);

        Self {
            settings,
            scheduler,
            state: GestureState::Idle,
            drag_start_y: 0.0,
            last_offset_y: 0.0,
            indicator_y: parked_y,
            animator: IndicatorAnimator::new(),
            hide: None,
            generation,
            pending_refresh: None,
        }
    }

    pub fn settings(&self) -> &RefreshSettings {
        &self.settings
    }

    /// Swap the settings without disturbing a gesture or refresh in flight
    ///
    /// A different indicator takes over parked at `-height`; the old one is
    /// hidden and moved off-screen, and a running hide completes at once.
    pub fn replace_settings(&mut self, settings: RefreshSettings) {
        if !Rc::ptr_eq(self.settings.indicator(), settings.indicator()) {
            let old = self.settings.indicator();
            old.set_visible(false);
            old.set_position_y(-old.height());

            let parked_y = -settings.indicator().height();
            settings.indicator().set_position_y(parked_y);
            self.indicator_y = parked_y;

            if self.animator.is_animating() {
                self.animator.cancel();
                self.finish_hide();
            }
            debug!(parked_y, "Indicator replaced");
        }
        self.settings = settings;
    }

    /// Generation of the most recently committed refresh
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn state(&self) -> GestureState {
        self.state
    }

    #[inline]
    pub fn is_refreshing(&self) -> bool {
        self.state == GestureState::Refreshing
    }

    pub fn drag_start_y(&self) -> f64 {
        self.drag_start_y
    }

    pub fn last_offset_y(&self) -> f64 {
        self.last_offset_y
    }

    /// Last position the controller gave the indicator
    pub fn indicator_y(&self) -> f64 {
        self.indicator_y
    }

    /// The hide animation currently running, if any
    pub fn active_hide(&self) -> Option<HideKind> {
        self.hide
    }

    /// A refresh timer is armed and has not fired yet
    pub fn has_pending_refresh(&self) -> bool {
        self.pending_refresh.is_some()
    }

    #[inline]
    pub fn is_animating(&self) -> bool {
        self.animator.is_animating()
    }

    pub fn handle_scroll_event(&mut self, event: ScrollEvent, host: &dyn ScrollHost, now: Instant) {
        match event {
            ScrollEvent::DragBegin => self.on_drag_begin(host.content_offset_y()),
            ScrollEvent::Scrolled => self.on_scroll(host),
            ScrollEvent::DragEnd { .. } => self.on_drag_end(host.content_offset_y(), now),
        }
    }

    fn on_drag_begin(&mut self, offset_y: f64) {
        if self.is_refreshing() {
            debug!(offset_y, "Drag ignored while refreshing");
            return;
        }

        // A new pull takes the indicator over from a running cancel-hide
        if self.hide.take().is_some() {
            self.animator.cancel();
        }

        self.drag_start_y = offset_y;
        self.state = GestureState::Dragging;
        debug!(drag_start_y = offset_y, "Drag began");
    }

    fn on_scroll(&mut self, host: &dyn ScrollHost) {
        let offset_y = host.content_offset_y();

        if self.state == GestureState::Dragging
            && geometry::should_track(self.drag_start_y, self.last_offset_y, offset_y)
        {
            let y = geometry::indicator_y(
                self.drag_start_y,
                offset_y,
                self.settings.threshold_distance(),
                host.view_height(),
            );
            let indicator = self.settings.indicator();
            indicator.set_visible(true);
            indicator.set_position_y(y);
            self.indicator_y = y;
        }

        self.last_offset_y = offset_y;
    }

    fn on_drag_end(&mut self, offset_y: f64, now: Instant) {
        if self.state != GestureState::Dragging {
            return;
        }

        let threshold = self.settings.threshold_distance();
        if geometry::is_past_top(offset_y)
            && geometry::is_over_threshold(self.drag_start_y, offset_y, threshold)
        {
            self.generation += 1;
            self.state = GestureState::Refreshing;

            let delay = self.settings.refresh_delay();
            info!(
                pull_distance = geometry::pull_distance(self.drag_start_y, offset_y),
                threshold,
                delay_ms = delay.as_millis(),
                "Pull threshold crossed, refresh scheduled"
            );
            self.pending_refresh = Some(self.scheduler.schedule(
                delay,
                TimerEvent::RefreshDue {
                    generation: self.generation,
                },
            ));
        } else {
            debug!(
                offset_y,
                drag_start_y = self.drag_start_y,
                "Pull released below threshold"
            );
            self.state = GestureState::Idle;
            self.start_hide(HideKind::Cancel, now);
        }
    }

    /// Handle a fired timer; returns true if the listener was invoked
    pub fn handle_timer(&mut self, event: TimerEvent, host: &dyn ScrollHost, now: Instant) -> bool {
        let TimerEvent::RefreshDue { generation } = event;

        if !self.is_refreshing() || generation != self.generation || self.pending_refresh.is_none() {
            debug!(generation, current = self.generation, "Ignoring stale refresh timer");
            return false;
        }
        self.pending_refresh = None;

        let notified = match self.settings.listener() {
            Some(listener) => {
                info!(generation, "Invoking refresh listener");
                listener.on_refresh(host);
                true
            }
            None => {
                warn!("Refresh listener was dropped, skipping callback");
                false
            }
        };

        self.start_hide(HideKind::Complete, now);
        notified
    }

    /// Abandon a drag in progress (refreshing was switched off mid-gesture)
    pub fn abort_drag(&mut self, now: Instant) {
        if self.state == GestureState::Dragging {
            debug!("Drag aborted");
            self.state = GestureState::Idle;
            self.start_hide(HideKind::Cancel, now);
        }
    }

    /// Advance the hide animation; returns true while it is still running
    pub fn tick(&mut self, now: Instant) -> bool {
        if let Some(frame) = self.animator.update(now) {
            self.settings.indicator().set_position_y(frame.y);
            self.indicator_y = frame.y;

            if frame.finished {
                self.finish_hide();
            }
        }

        self.animator.is_animating()
    }

    fn finish_hide(&mut self) {
        if self.hide.take() == Some(HideKind::Complete) {
            self.state = GestureState::Idle;
            info!(generation = self.generation, "Refresh finished");
        }
    }

    fn start_hide(&mut self, kind: HideKind, now: Instant) {
        let hide = self.settings.animation();
        let duration: Duration = match kind {
            HideKind::Complete => hide.complete_duration,
            HideKind::Cancel => hide.cancel_duration,
        };
        let target = -self.settings.indicator().height();

        self.animator
            .animate(self.indicator_y, target, duration, hide.easing, now);
        self.hide = Some(kind);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::ManualScheduler;
    use crate::testing::{CountingListener, FakeHost, RecordingIndicator};

    struct Harness {
        controller: PullToRefreshController,
        scheduler: Rc<ManualScheduler>,
        indicator: Rc<RecordingIndicator>,
        listener: Rc<CountingListener>,
        host: FakeHost,
        t0: Instant,
    }

    impl Harness {
        fn new() -> Self {
            let scheduler = Rc::new(ManualScheduler::new());
            let indicator = Rc::new(RecordingIndicator::new(50.0));
            let listener = Rc::new(CountingListener::default());
            let settings = RefreshSettings::builder()
                .listener(&listener)
                .indicator(Rc::clone(&indicator))
                .build()
                .unwrap();
            let controller = PullToRefreshController::new(settings, scheduler.clone());

            Self {
                controller,
                scheduler,
                indicator,
                listener,
                host: FakeHost::new(800.0),
                t0: Instant::now(),
            }
        }

        fn send(&mut self, event: ScrollEvent) {
            self.controller.handle_scroll_event(event, &self.host, self.t0);
        }

        fn pull(&mut self, offsets: &[f64]) {
            self.send(ScrollEvent::DragBegin);
            for &offset in offsets {
                self.host.offset_y = offset;
                self.send(ScrollEvent::Scrolled);
            }
        }

        fn release(&mut self) {
            self.send(ScrollEvent::DragEnd {
                will_decelerate: true,
            });
        }

        fn fire_timers(&mut self, after: Duration) -> usize {
            let events = self.scheduler.advance(after);
            let now = self.t0 + after;
            events
                .into_iter()
                .filter(|&event| self.controller.handle_timer(event, &self.host, now))
                .count()
        }
    }

    #[test]
    fn test_new_controller_parks_indicator() {
        let h = Harness::new();
        assert_eq!(h.controller.state(), GestureState::Idle);
        assert_eq!(h.indicator.position_y(), -50.0);
        assert!(h.indicator.visibility_changes().is_empty());
    }

    #[test]
    fn test_pull_past_threshold_refreshes_after_delay() {
        let mut h = Harness::new();
        h.pull(&[-5.0, -50.0, -150.0, -210.0]);
        h.release();

        assert_eq!(h.controller.state(), GestureState::Refreshing);
        assert!(h.controller.has_pending_refresh());
        assert_eq!(h.fire_timers(Duration::from_millis(1999)), 0);
        assert_eq!(h.listener.calls(), 0);

        assert_eq!(h.fire_timers(Duration::from_millis(1)), 1);
        assert_eq!(h.listener.calls(), 1);
        assert_eq!(h.listener.offsets(), vec![-210.0]);
        assert_eq!(h.controller.active_hide(), Some(HideKind::Complete));
    }

    #[test]
    fn test_slow_hide_returns_to_idle() {
        let mut h = Harness::new();
        h.pull(&[-5.0, -50.0, -150.0, -210.0]);
        h.release();
        h.fire_timers(Duration::from_secs(2));

        let hide_start = h.t0 + Duration::from_secs(2);
        assert!(h.controller.tick(hide_start + Duration::from_millis(250)));
        assert!(h.controller.is_refreshing());

        assert!(!h.controller.tick(hide_start + Duration::from_millis(500)));
        assert_eq!(h.controller.state(), GestureState::Idle);
        assert_eq!(h.indicator.position_y(), -50.0);
        assert_eq!(h.controller.active_hide(), None);
    }

    #[test]
    fn test_release_below_threshold_hides_fast() {
        let mut h = Harness::new();
        h.pull(&[-5.0, -50.0, -150.0]);
        h.release();

        assert_eq!(h.controller.state(), GestureState::Idle);
        assert_eq!(h.controller.active_hide(), Some(HideKind::Cancel));
        assert_eq!(h.scheduler.pending(), 0);

        assert!(h.controller.tick(h.t0 + Duration::from_millis(199)));
        assert!(!h.controller.tick(h.t0 + Duration::from_millis(200)));
        assert_eq!(h.indicator.position_y(), -50.0);
        assert_eq!(h.fire_timers(Duration::from_secs(10)), 0);
        assert_eq!(h.listener.calls(), 0);
    }

    #[test]
    fn test_release_at_or_below_top_never_refreshes() {
        let mut h = Harness::new();
        h.host.offset_y = -300.0;
        h.send(ScrollEvent::DragBegin);
        h.host.offset_y = 0.0;
        h.send(ScrollEvent::Scrolled);
        h.release();

        assert_eq!(h.controller.state(), GestureState::Idle);
        assert_eq!(h.fire_timers(Duration::from_secs(5)), 0);
    }

    #[test]
    fn test_indicator_tracks_pull_monotonically() {
        let mut h = Harness::new();
        let offsets: Vec<f64> = (1..=30).map(|i| -(i as f64) * 9.0).collect();
        h.pull(&offsets);

        let positions = h.indicator.positions();
        // First entry is the parked position set on construction
        assert!(positions.len() > 2);
        for pair in positions[1..].windows(2) {
            assert!(pair[1] >= pair[0], "indicator moved backwards: {:?}", pair);
        }
        // 270px pull * 200 / 800 / 2
        assert!((h.controller.indicator_y() - 33.75).abs() < 1e-9);
    }

    #[test]
    fn test_deadband_never_shows_indicator() {
        let mut h = Harness::new();
        h.pull(&[-2.0, -4.0, -7.0, -10.0]);
        h.release();

        assert!(h.indicator.visibility_changes().is_empty());
        assert_eq!(h.listener.calls(), 0);
    }

    #[test]
    fn test_moving_back_up_does_not_move_indicator() {
        let mut h = Harness::new();
        h.pull(&[-40.0, -80.0]);
        let shown_at = h.controller.indicator_y();
        h.host.offset_y = -60.0;
        h.send(ScrollEvent::Scrolled);

        assert_eq!(h.controller.indicator_y(), shown_at);
        assert_eq!(h.controller.last_offset_y(), -60.0);
    }

    #[test]
    fn test_scroll_without_drag_is_ignored() {
        let mut h = Harness::new();
        h.host.offset_y = -40.0;
        h.send(ScrollEvent::Scrolled);
        h.host.offset_y = -80.0;
        h.send(ScrollEvent::Scrolled);
        h.release();

        assert!(h.indicator.visibility_changes().is_empty());
        assert_eq!(h.controller.last_offset_y(), -80.0);
        assert_eq!(h.controller.state(), GestureState::Idle);
    }

    #[test]
    fn test_second_gesture_while_refreshing_is_ignored() {
        let mut h = Harness::new();
        h.pull(&[-50.0, -250.0]);
        h.release();

        h.pull(&[-50.0, -260.0]);
        h.release();
        assert_eq!(h.scheduler.pending(), 1);

        assert_eq!(h.fire_timers(Duration::from_secs(3)), 1);
        assert_eq!(h.listener.calls(), 1);
    }

    #[test]
    fn test_new_drag_interrupts_cancel_hide() {
        let mut h = Harness::new();
        h.pull(&[-50.0, -100.0]);
        h.release();
        assert!(h.controller.is_animating());

        h.pull(&[-40.0, -90.0]);
        assert!(!h.controller.is_animating());
        assert_eq!(h.controller.state(), GestureState::Dragging);
        assert_eq!(h.controller.drag_start_y(), -100.0);
    }

    #[test]
    fn test_dropping_controller_cancels_pending_refresh() {
        let mut h = Harness::new();
        h.pull(&[-50.0, -250.0]);
        h.release();
        assert_eq!(h.scheduler.pending(), 1);

        let Harness { controller, scheduler, .. } = h;
        drop(controller);
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn test_dropped_listener_still_hides_indicator() {
        let mut h = Harness::new();
        h.pull(&[-50.0, -250.0]);
        h.release();

        let listener = std::mem::take(&mut h.listener);
        drop(listener);

        assert_eq!(h.fire_timers(Duration::from_secs(2)), 0);
        assert_eq!(h.controller.active_hide(), Some(HideKind::Complete));
    }

    #[test]
    fn test_abort_drag_hides_indicator() {
        let mut h = Harness::new();
        h.pull(&[-50.0, -120.0]);
        h.controller.abort_drag(h.t0);

        assert_eq!(h.controller.state(), GestureState::Idle);
        assert_eq!(h.controller.active_hide(), Some(HideKind::Cancel));
    }
}
