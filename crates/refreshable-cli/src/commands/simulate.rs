use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Instant;

use anyhow::Result;
use serde::Serialize;

use refreshable_core::{
    AppConfig, GestureState, LoadingIndicator, ManualScheduler, OnRefreshListener,
    RefreshSettingsBuilder, RefreshableView, ScrollEvent, ScrollHost,
};

/// Gesture to replay
#[derive(Debug, Clone)]
pub struct SimulateOptions {
    pub offsets: Vec<f64>,
    pub start: f64,
    pub threshold: Option<f64>,
    pub delay_secs: Option<f64>,
    pub view_height: f64,
}

/// Indicator state after one scroll notification
#[derive(Debug, Clone, Serialize)]
pub struct Step {
    pub offset_y: f64,
    pub indicator_y: f64,
    pub visible: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub threshold: f64,
    pub delay_ms: u64,
    pub steps: Vec<Step>,
    pub state_after_release: String,
    pub refreshed: bool,
    /// Time from release to the refresh callback
    pub refresh_after_ms: Option<u64>,
    pub final_indicator_y: f64,
}

struct SimHost {
    offset_y: f64,
    height: f64,
}

impl ScrollHost for SimHost {
    fn content_offset_y(&self) -> f64 {
        self.offset_y
    }

    fn view_height(&self) -> f64 {
        self.height
    }
}

struct TraceIndicator {
    height: f64,
    visible: Cell<bool>,
    y: Cell<f64>,
}

impl LoadingIndicator for TraceIndicator {
    fn set_visible(&self, visible: bool) {
        self.visible.set(visible);
    }

    fn set_position_y(&self, y: f64) {
        self.y.set(y);
    }

    fn height(&self) -> f64 {
        self.height
    }
}

#[derive(Default)]
struct TraceListener {
    calls: RefCell<Vec<f64>>,
}

impl OnRefreshListener for TraceListener {
    fn on_refresh(&self, view: &dyn ScrollHost) {
        self.calls.borrow_mut().push(view.content_offset_y());
    }
}

/// Replay the gesture on a virtual clock
pub fn simulate(config: &AppConfig, options: &SimulateOptions) -> Result<Report> {
    let scheduler = Rc::new(ManualScheduler::new());
    let indicator = Rc::new(TraceIndicator {
        height: config.ui.indicator_rows as f64 * config.ui.row_height_px,
        visible: Cell::new(false),
        y: Cell::new(0.0),
    });
    let listener = Rc::new(TraceListener::default());

    let mut builder = RefreshSettingsBuilder::from_config(config)
        .listener(&listener)
        .indicator(Rc::clone(&indicator));
    if let Some(threshold) = options.threshold {
        builder = builder.threshold(threshold);
    }
    if let Some(delay) = options.delay_secs {
        builder = builder.refresh_delay_secs(delay);
    }
    let settings = builder.try_build()?;
    let threshold = settings.threshold_distance();
    let delay = settings.refresh_delay();
    let hide = *settings.animation();

    let host = SimHost {
        offset_y: options.start,
        height: options.view_height,
    };
    let mut view = RefreshableView::new(host, scheduler.clone());
    view.set_refresh_settings(settings);

    let t0 = Instant::now();
    view.handle_scroll_event_at(ScrollEvent::DragBegin, t0);

    let mut steps = Vec::with_capacity(options.offsets.len());
    for &offset_y in &options.offsets {
        view.host_mut().offset_y = offset_y;
        view.handle_scroll_event_at(ScrollEvent::Scrolled, t0);
        steps.push(Step {
            offset_y,
            indicator_y: indicator.y.get(),
            visible: indicator.visible.get(),
        });
    }
    view.handle_scroll_event_at(
        ScrollEvent::DragEnd {
            will_decelerate: false,
        },
        t0,
    );

    let state_after_release = view.gesture_state().unwrap_or(GestureState::Idle);
    // The content settles back at the top once released
    view.host_mut().offset_y = 0.0;

    let mut refresh_after_ms = None;
    if let Some(due_in) = scheduler.next_due_in() {
        let events = scheduler.advance(due_in);
        let fired_at = t0 + scheduler.elapsed();
        for event in events {
            if view.handle_timer_at(event, fired_at) {
                refresh_after_ms = Some(scheduler.elapsed().as_millis() as u64);
            }
        }
    }

    let settle = t0 + scheduler.elapsed() + hide.complete_duration.max(hide.cancel_duration);
    view.tick_at(settle);
    let refreshed = !listener.calls.borrow().is_empty();

    Ok(Report {
        threshold,
        delay_ms: delay.as_millis() as u64,
        steps,
        state_after_release: format!("{:?}", state_after_release),
        refreshed,
        refresh_after_ms,
        final_indicator_y: indicator.y.get(),
    })
}

pub fn run(config: &AppConfig, options: SimulateOptions, json: bool) -> Result<()> {
    let report = simulate(config, &options)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "Threshold {:.1}px, delay {}ms, drag from {:.1}\n",
        report.threshold, report.delay_ms, options.start
    );
    println!("  {:>10}  {:>12}  visible", "offset", "indicator_y");
    for step in &report.steps {
        println!(
            "  {:>10.1}  {:>12.2}  {}",
            step.offset_y, step.indicator_y, step.visible
        );
    }
    println!();
    println!("State after release: {}", report.state_after_release);
    match report.refresh_after_ms {
        Some(ms) => println!("Refresh fired {}ms after release", ms),
        None => println!("No refresh"),
    }
    println!("Indicator settled at y = {:.1}", report.final_indicator_y);

    Ok(())
}
