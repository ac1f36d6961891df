use std::rc::Rc;
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::gesture::{GestureState, PullToRefreshController};
use crate::host::{ScrollEvent, ScrollHost};
use crate::scheduler::{Scheduler, TimerEvent};
use crate::settings::RefreshSettings;

/// A scroll host with pull-to-refresh attached
///
/// Owns the host and, once settings are attached, exactly one controller.
/// Every scroll notification, fired timer and frame tick goes through here;
/// nothing reaches the controller while refreshing is disabled or before
/// settings are attached.
pub struct RefreshableView<H: ScrollHost> {
    host: H,
    scheduler: Rc<dyn Scheduler>,
    controller: Option<PullToRefreshController>,
    refresh_enabled: bool,
    /// Last refresh generation handed out, carried across controllers
    generation: u64,
}

impl<H: ScrollHost> RefreshableView<H> {
    pub fn new(host: H, scheduler: Rc<dyn Scheduler>) -> Self {
        Self {
            host,
            scheduler,
            controller: None,
            refresh_enabled: true,
            generation: 0,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Attach settings, or replace the ones already attached
    ///
    /// Replacing keeps the existing controller, so a gesture or refresh in
    /// flight is neither lost nor duplicated.
    pub fn set_refresh_settings(&mut self, settings: RefreshSettings) {
        match self.controller.as_mut() {
            Some(controller) => {
                debug!("Replacing refresh settings");
                controller.replace_settings(settings);
            }
            None => {
                info!(
                    threshold = settings.threshold_distance(),
                    delay_ms = settings.refresh_delay().as_millis(),
                    "Pull-to-refresh attached"
                );
                self.controller = Some(PullToRefreshController::with_generation(
                    settings,
                    Rc::clone(&self.scheduler),
                    self.generation,
                ));
            }
        }
    }

    /// Attach the result of `RefreshSettingsBuilder::build`; absent settings leave the view inert
    pub fn attach(&mut self, settings: Option<RefreshSettings>) -> bool {
        match settings {
            Some(settings) => {
                self.set_refresh_settings(settings);
                true
            }
            None => {
                warn!("Refresh settings missing listener or indicator, pull-to-refresh disabled");
                false
            }
        }
    }

    /// Detach the controller, cancelling any pending refresh
    pub fn detach(&mut self) -> Option<RefreshSettings> {
        self.controller.take().map(|controller| {
            self.generation = controller.generation();
            info!(generation = self.generation, "Pull-to-refresh detached");
            controller.settings().clone()
        })
    }

    #[inline]
    pub fn is_attached(&self) -> bool {
        self.controller.is_some()
    }

    /// Toggle pull-to-refresh at runtime
    pub fn set_refresh_enabled(&mut self, enabled: bool) {
        self.set_refresh_enabled_at(enabled, Instant::now());
    }

    pub fn set_refresh_enabled_at(&mut self, enabled: bool, now: Instant) {
        if self.refresh_enabled == enabled {
            return;
        }
        self.refresh_enabled = enabled;
        debug!(enabled, "Pull-to-refresh toggled");

        if !enabled {
            if let Some(controller) = self.controller.as_mut() {
                controller.abort_drag(now);
            }
        }
    }

    #[inline]
    pub fn is_refresh_enabled(&self) -> bool {
        self.refresh_enabled
    }

    pub fn controller(&self) -> Option<&PullToRefreshController> {
        self.controller.as_ref()
    }

    pub fn gesture_state(&self) -> Option<GestureState> {
        self.controller.as_ref().map(|controller| controller.state())
    }

    pub fn handle_scroll_event(&mut self, event: ScrollEvent) {
        self.handle_scroll_event_at(event, Instant::now());
    }

    pub fn handle_scroll_event_at(&mut self, event: ScrollEvent, now: Instant) {
        if !self.refresh_enabled {
            return;
        }
        if let Some(controller) = self.controller.as_mut() {
            controller.handle_scroll_event(event, &self.host, now);
        }
    }

    /// Deliver a fired timer; returns true if the refresh listener ran
    pub fn handle_timer(&mut self, event: TimerEvent) -> bool {
        self.handle_timer_at(event, Instant::now())
    }

    pub fn handle_timer_at(&mut self, event: TimerEvent, now: Instant) -> bool {
        match self.controller.as_mut() {
            Some(controller) => controller.handle_timer(event, &self.host, now),
            None => false,
        }
    }

    /// Advance indicator animations; returns true while one is running
    pub fn tick(&mut self) -> bool {
        self.tick_at(Instant::now())
    }

    pub fn tick_at(&mut self, now: Instant) -> bool {
        self.controller
            .as_mut()
            .map(|controller| controller.tick(now))
            .unwrap_or(false)
    }

    /// Check if an animation needs frame-rate ticks
    pub fn needs_update(&self) -> bool {
        self.controller
            .as_ref()
            .map(|controller| controller.is_animating())
            .unwrap_or(false)
    }
}
