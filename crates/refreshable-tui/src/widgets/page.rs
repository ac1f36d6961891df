use ratatui::{
    layout::Rect,
    style::Style,
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;

pub struct PageWidget;

impl PageWidget {
    /// Render the page, resizing the scroll viewport to the inner area
    ///
    /// Returns the inner content area so overlays can be drawn on top.
    pub fn render(frame: &mut Frame, area: Rect, app: &mut App) -> Rect {
        let theme = app.theme.clone();

        let title = if app.view().is_refresh_enabled() {
            " Page "
        } else {
            " Page [refresh off] "
        };
        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.accent))
            .style(Style::default().bg(theme.bg0));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        app.set_viewport_rows(inner.height);

        let host = app.host();
        let blank_rows = host.overscroll_rows() as usize;
        let visible = (inner.height as usize).saturating_sub(blank_rows);

        let mut lines: Vec<Line> = (0..blank_rows)
            .map(|_| Line::styled("", Style::default().bg(theme.overscroll)))
            .collect();
        {
            let page = host.page().borrow();
            lines.extend(
                page.lines()
                    .iter()
                    .skip(host.top_line())
                    .take(visible)
                    .map(|line| Line::styled(line.clone(), Style::default().fg(theme.fg0))),
            );
        }

        frame.render_widget(Paragraph::new(lines), inner);
        inner
    }
}
