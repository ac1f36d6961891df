use std::io;
use std::rc::Rc;

use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Terminal,
};
use tracing::info;

use refreshable_core::animation::AnimationConfigExt;
use refreshable_core::{AppConfig, TokioScheduler};
use refreshable_tui::{
    app::App,
    event::{AppEvent, EventHandler},
    input::{handle_key_event, Action},
    widgets::{IndicatorWidget, PageWidget, StatusBarWidget},
};

pub async fn run(config: &AppConfig) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, SetTitle("Refreshable"))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, config);

    // Restore the terminal even if the loop failed
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    config: &AppConfig,
) -> Result<()> {
    // Timers fire on the runtime and come back through this channel
    let (scheduler, mut timer_rx) = TokioScheduler::channel();
    let mut app = App::new(config, Rc::new(scheduler));

    let event_handler = EventHandler::with_animation_tick(
        config.ui.tick_rate_ms,
        config.animation.animation_tick_duration(),
    );

    let mut needs_fast_update = false;

    loop {
        while let Ok(event) = timer_rx.try_recv() {
            app.on_timer(event);
        }

        app.update_animations();

        terminal.draw(|frame| {
            let size = frame.area();

            let main_layout = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(1), Constraint::Length(1)])
                .split(size);

            let content = PageWidget::render(frame, main_layout[0], &mut app);
            IndicatorWidget::render(frame, content, &app);
            StatusBarWidget::render(frame, main_layout[1], &app);
        })?;

        let event = if needs_fast_update {
            event_handler.next_animation()?
        } else {
            event_handler.next()?
        };
        if let Some(event) = event {
            match event {
                AppEvent::Key(key) => {
                    let action = handle_key_event(key);
                    if action != Action::None {
                        app.clear_status();
                    }
                    app.handle_action(action);
                }
                AppEvent::Mouse(mouse) => app.handle_mouse(mouse),
                AppEvent::Resize(width, height) => {
                    info!(width, height, "Terminal resized");
                }
                AppEvent::Tick => {}
            }
        }

        app.tick_spinner();
        needs_fast_update = app.needs_fast_update();

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
