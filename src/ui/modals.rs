use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::app::{App, BulkField, Modal};
use crate::widgets::input_box::InputBoxWidget;

use super::helpers::{centered_rect, format_instant};
use super::theme::{COLOR_ACCENT, COLOR_DIM, COLOR_TEXT};

pub fn render_modal(frame: &mut Frame, app: &App, modal: &Modal) {
    match modal {
        Modal::SingleSchedule { datetime, .. } => render_single(frame, datetime),
        Modal::BulkSchedule {
            time,
            per_day,
            start_date,
            focus,
        } => render_bulk(frame, app, time, per_day, start_date, *focus),
        Modal::Preview { post } => render_preview(frame, post),
    }
}

fn modal_block(title: String) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(COLOR_ACCENT))
        .title(title)
}

fn render_single(frame: &mut Frame, datetime: &crate::widgets::InputBox) {
    let rect = centered_rect(frame.area(), 48, 8);
    frame.render_widget(Clear, rect);
    let block = modal_block(" Schedule Post ".to_string());
    let inner = block.inner(rect);
    frame.render_widget(block, rect);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Length(2)])
        .split(inner);

    frame.render_widget(
        InputBoxWidget::new(datetime, " Release Date & Time (YYYY-MM-DDTHH:MM) ", true),
        chunks[0],
    );
    frame.render_widget(
        Paragraph::new("Enter to schedule  ·  Esc to cancel")
            .style(Style::default().fg(COLOR_DIM))
            .alignment(Alignment::Center),
        chunks[1],
    );
}

fn render_bulk(
    frame: &mut Frame,
    app: &App,
    time: &crate::widgets::InputBox,
    per_day: &crate::widgets::InputBox,
    start_date: &crate::widgets::InputBox,
    focus: BulkField,
) {
    let rect = centered_rect(frame.area(), 56, 14);
    frame.render_widget(Clear, rect);
    let block = modal_block(format!(" Bulk Schedule ({} posts) ", app.selection.len()));
    let inner = block.inner(rect);
    frame.render_widget(block, rect);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner);

    frame.render_widget(
        InputBoxWidget::new(time, " Preferred Time (HH:MM) ", focus == BulkField::Time),
        chunks[0],
    );
    frame.render_widget(
        InputBoxWidget::new(per_day, " Posts Per Day ", focus == BulkField::PerDay),
        chunks[1],
    );
    frame.render_widget(
        InputBoxWidget::new(
            start_date,
            " Start Date (YYYY-MM-DD, optional) ",
            focus == BulkField::StartDate,
        ),
        chunks[2],
    );
    frame.render_widget(
        Paragraph::new("If left blank, scheduling starts from today.")
            .style(Style::default().fg(COLOR_DIM)),
        chunks[3],
    );
    frame.render_widget(
        Paragraph::new("Enter confirm  ·  Tab next field  ·  Esc cancel")
            .style(Style::default().fg(COLOR_DIM))
            .alignment(Alignment::Center),
        chunks[4],
    );
}

fn render_preview(frame: &mut Frame, post: &crate::models::Post) {
    let area = frame.area();
    let rect = centered_rect(
        area,
        area.width.saturating_sub(10).min(90),
        area.height.saturating_sub(4),
    );
    frame.render_widget(Clear, rect);
    let block = modal_block(format!(" {} ", post.topic));
    let inner = block.inner(rect);
    frame.render_widget(block, rect);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1), Constraint::Length(1)])
        .split(inner);

    frame.render_widget(
        Paragraph::new(format_instant(post.scheduled_at, "Not scheduled"))
            .style(Style::default().fg(COLOR_DIM)),
        chunks[0],
    );
    frame.render_widget(
        Paragraph::new(post.content.as_str())
            .style(Style::default().fg(COLOR_TEXT))
            .wrap(Wrap { trim: false }),
        chunks[1],
    );
    frame.render_widget(
        Paragraph::new("Esc to close")
            .style(Style::default().fg(COLOR_DIM))
            .alignment(Alignment::Center),
        chunks[2],
    );
}
