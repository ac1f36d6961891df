use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;

pub struct IndicatorWidget;

impl IndicatorWidget {
    /// Overlay the loading indicator on the page content area
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let indicator = app.indicator();
        if !indicator.is_visible() {
            return;
        }

        let Some(row) = Self::row_for(indicator.position_y(), app.host().row_height_px(), area.height)
        else {
            return;
        };

        let label = if app.is_refreshing() {
            "Refreshing"
        } else {
            "Pull to refresh"
        };
        let line = Line::from(vec![
            Span::styled(
                indicator.glyph(),
                Style::default()
                    .fg(app.theme.indicator)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!(" {}", label), Style::default().fg(app.theme.grey2)),
        ]);

        let target = Rect::new(area.x, area.y + row, area.width, 1);
        let paragraph = Paragraph::new(line)
            .alignment(Alignment::Center)
            .style(Style::default().bg(app.theme.bg1));
        frame.render_widget(paragraph, target);
    }

    /// Terminal row for an indicator top edge at `y` logical pixels
    fn row_for(y: f64, row_height_px: f64, rows: u16) -> Option<u16> {
        if y < 0.0 || row_height_px <= 0.0 {
            return None;
        }
        let row = (y / row_height_px).floor() as u16;
        (row < rows).then_some(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parked_indicator_has_no_row() {
        assert_eq!(IndicatorWidget::row_for(-20.0, 20.0, 10), None);
    }

    #[test]
    fn test_row_follows_position() {
        assert_eq!(IndicatorWidget::row_for(0.0, 20.0, 10), Some(0));
        assert_eq!(IndicatorWidget::row_for(55.0, 20.0, 10), Some(2));
        assert_eq!(IndicatorWidget::row_for(400.0, 20.0, 10), None);
    }
}
