use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use refreshable_core::GestureState;

use crate::app::App;

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;

        let state_str = match app.view().gesture_state() {
            Some(GestureState::Idle) => "IDLE",
            Some(GestureState::Dragging) => "PULLING",
            Some(GestureState::Refreshing) => "REFRESHING",
            None => "DETACHED",
        };
        let enabled_str = if app.view().is_refresh_enabled() {
            "on"
        } else {
            "off"
        };

        let status_text = if let Some(msg) = &app.status_message {
            format!(" {} | {}", state_str, msg)
        } else {
            let page = app.host().page().borrow();
            format!(
                " {} | refresh: {} | reloads: {} | offset: {:.0}px",
                state_str,
                enabled_str,
                page.reloads(),
                app.host().offset_px()
            )
        };

        let help_hint = " q:quit j/k:scroll e:toggle r:reload ";
        let padding_len = area
            .width
            .saturating_sub(status_text.chars().count() as u16 + help_hint.len() as u16)
            as usize;

        let state_style = if app.is_refreshing() {
            Style::default().fg(theme.warning).bg(theme.bg2)
        } else {
            Style::default().fg(theme.fg0).bg(theme.bg2)
        };

        let line = Line::from(vec![
            Span::styled(status_text, state_style),
            Span::styled(" ".repeat(padding_len), Style::default().bg(theme.bg2)),
            Span::styled(help_hint, Style::default().fg(theme.grey1).bg(theme.bg2)),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }
}
