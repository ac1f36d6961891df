use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use refreshable_core::{
    AppConfig, GestureState, OnRefreshListener, RefreshSettingsBuilder, RefreshableView, ScrollEvent,
    Scheduler, TimerEvent,
};
use tracing::debug;

use crate::host::PageHost;
use crate::indicator::SpinnerIndicator;
use crate::input::Action;
use crate::page::{Page, PageReloader};
use crate::theme::Theme;

/// Rows moved per mouse wheel notch
const WHEEL_ROWS: i32 = 3;

/// Minimum time between spinner frames
const SPINNER_INTERVAL: Duration = Duration::from_millis(80);

/// Application state for the pull-to-refresh demo
pub struct App {
    pub theme: Theme,
    pub status_message: Option<String>,
    pub should_quit: bool,
    view: RefreshableView<PageHost>,
    indicator: Rc<SpinnerIndicator>,
    /// Strong handle; the refresh settings only keep a weak one
    reloader: Rc<PageReloader>,
    last_spin: Instant,
}

impl App {
    pub fn new(config: &AppConfig, scheduler: Rc<dyn Scheduler>) -> Self {
        let page = Rc::new(RefCell::new(Page::load(0)));
        let host = PageHost::new(Rc::clone(&page), config.ui.row_height_px);
        let indicator = Rc::new(SpinnerIndicator::new(
            config.ui.indicator_rows as f64 * host.row_height_px(),
        ));
        let reloader = Rc::new(PageReloader::new(page));

        let mut view = RefreshableView::new(host, scheduler);
        let settings = RefreshSettingsBuilder::from_config(config)
            .listener(&reloader)
            .indicator(Rc::clone(&indicator))
            .build();
        view.attach(settings);
        view.set_refresh_enabled(config.refresh.enabled);

        Self {
            theme: Theme::default(),
            status_message: None,
            should_quit: false,
            view,
            indicator,
            reloader,
            last_spin: Instant::now(),
        }
    }

    pub fn view(&self) -> &RefreshableView<PageHost> {
        &self.view
    }

    pub fn host(&self) -> &PageHost {
        self.view.host()
    }

    pub fn indicator(&self) -> &SpinnerIndicator {
        &self.indicator
    }

    pub fn is_refreshing(&self) -> bool {
        self.view.gesture_state() == Some(GestureState::Refreshing)
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    /// Resize the scroll viewport to the content area height
    pub fn set_viewport_rows(&mut self, rows: u16) {
        self.view.host_mut().set_viewport_rows(rows);
    }

    /// Translate a mouse event into drag and scroll notifications
    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        self.handle_mouse_at(mouse, Instant::now());
    }

    pub fn handle_mouse_at(&mut self, mouse: MouseEvent, now: Instant) {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.view.host_mut().begin_drag(mouse.row);
                self.view.handle_scroll_event_at(ScrollEvent::DragBegin, now);
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                if self.view.host_mut().drag_to(mouse.row) {
                    self.view.handle_scroll_event_at(ScrollEvent::Scrolled, now);
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                if !self.view.host().is_dragging() {
                    return;
                }
                self.view.host_mut().end_drag(now);
                let will_decelerate = self.view.host().is_springing();
                self.view
                    .handle_scroll_event_at(ScrollEvent::DragEnd { will_decelerate }, now);
            }
            MouseEventKind::ScrollDown => self.scroll_rows(WHEEL_ROWS, now),
            MouseEventKind::ScrollUp => self.scroll_rows(-WHEEL_ROWS, now),
            _ => {}
        }
    }

    fn scroll_rows(&mut self, rows: i32, now: Instant) {
        self.view.host_mut().scroll_rows(rows);
        self.view.handle_scroll_event_at(ScrollEvent::Scrolled, now);
    }

    pub fn handle_action(&mut self, action: Action) {
        let now = Instant::now();
        match action {
            Action::Quit => self.should_quit = true,
            Action::ScrollDown => self.scroll_rows(1, now),
            Action::ScrollUp => self.scroll_rows(-1, now),
            Action::JumpToTop => {
                self.view.host_mut().scroll_to_top();
                self.view.handle_scroll_event_at(ScrollEvent::Scrolled, now);
            }
            Action::ToggleRefresh => {
                let enabled = !self.view.is_refresh_enabled();
                self.view.set_refresh_enabled_at(enabled, now);
                self.set_status(if enabled {
                    "Pull-to-refresh enabled"
                } else {
                    "Pull-to-refresh disabled"
                });
            }
            Action::ReloadNow => {
                self.reloader.on_refresh(self.view.host());
                self.set_reloaded_status();
            }
            Action::None => {}
        }
    }

    /// Deliver a fired timer to the view
    pub fn on_timer(&mut self, event: TimerEvent) {
        self.on_timer_at(event, Instant::now());
    }

    pub fn on_timer_at(&mut self, event: TimerEvent, now: Instant) {
        if self.view.handle_timer_at(event, now) {
            self.set_reloaded_status();
        }
    }

    fn set_reloaded_status(&mut self) {
        let message = {
            let page = self.host().page().borrow();
            format!(
                "Reloaded at {} ({} total)",
                page.loaded_at().format("%H:%M:%S"),
                page.reloads()
            )
        };
        debug!(%message, "Status updated");
        self.set_status(message);
    }

    /// Advance the spring-back and the indicator animation
    ///
    /// Returns true while either is still running.
    pub fn update_animations(&mut self) -> bool {
        self.update_animations_at(Instant::now())
    }

    pub fn update_animations_at(&mut self, now: Instant) -> bool {
        if self.view.host_mut().update(now) {
            self.view.handle_scroll_event_at(ScrollEvent::Scrolled, now);
        }
        let hiding = self.view.tick_at(now);
        hiding || self.view.host().is_springing()
    }

    /// Advance the spinner frame while a refresh is pending
    pub fn tick_spinner(&mut self) {
        let now = Instant::now();
        if self.is_refreshing() && now.duration_since(self.last_spin) >= SPINNER_INTERVAL {
            self.indicator.tick();
            self.last_spin = now;
        }
    }

    /// Check if the loop should poll at the animation frame rate
    pub fn needs_fast_update(&self) -> bool {
        self.view.needs_update() || self.view.host().is_springing() || self.is_refreshing()
    }
}
