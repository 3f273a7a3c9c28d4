use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use crate::app::App;
use crate::widgets::input_box::InputBoxWidget;

use super::helpers::{centered_rect, format_instant, spinner};
use super::theme::{COLOR_ACTIVE, COLOR_BORDER, COLOR_DIM, COLOR_TEXT};

pub fn render_automation(frame: &mut Frame, app: &App, area: Rect) {
    let card = centered_rect(area, 60.min(area.width), 14);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(COLOR_BORDER))
        .title(" Auto-Pilot ");
    let inner = block.inner(card);
    frame.render_widget(block, card);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(3),
            Constraint::Length(2),
            Constraint::Length(2),
            Constraint::Min(0),
        ])
        .split(inner);

    let status = if app.scheduler_busy {
        Line::from(Span::styled(
            format!("System: {} switching...", spinner(app.tick_count)),
            Style::default().fg(COLOR_DIM),
        ))
    } else if app.scheduler.running {
        Line::from(Span::styled(
            "System: ONLINE",
            Style::default().fg(COLOR_ACTIVE).bold(),
        ))
    } else {
        Line::from(Span::styled(
            "System: OFFLINE",
            Style::default().fg(COLOR_DIM).bold(),
        ))
    };
    frame.render_widget(Paragraph::new(status), chunks[0]);

    frame.render_widget(
        InputBoxWidget::new(&app.interval_input, " Post Frequency (minutes) ", true),
        chunks[1],
    );

    frame.render_widget(
        Paragraph::new(format!(
            "Next post: {}",
            format_instant(app.scheduler.next_post_at, "—")
        ))
        .style(Style::default().fg(COLOR_TEXT)),
        chunks[2],
    );
    frame.render_widget(
        Paragraph::new(format!(
            "Last posted: {}",
            format_instant(app.scheduler.last_posted_at, "—")
        ))
        .style(Style::default().fg(COLOR_TEXT)),
        chunks[3],
    );
}
