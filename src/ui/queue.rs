use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::app::{App, QueueView};
use crate::models::Post;
use crate::state::QueueFilter;

use super::helpers::{format_instant, spinner, truncate};
use super::theme::{
    status_color, COLOR_ACCENT, COLOR_BORDER, COLOR_DIM, COLOR_SELECTED, COLOR_TEXT,
};

pub fn render_queue(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(area);

    render_filter_bar(frame, app, chunks[0]);

    let visible = app.queue.visible(&app.posts);
    if visible.is_empty() {
        render_empty(frame, app, chunks[1]);
    } else {
        match app.queue_view {
            QueueView::Grid => render_grid(frame, app, chunks[1], &visible),
            QueueView::List => render_list(frame, app, chunks[1], &visible),
        }
    }

    render_reveal_footer(frame, app, chunks[2], visible.len());
}

fn render_filter_bar(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans: Vec<Span> = Vec::new();
    for filter in QueueFilter::ALL {
        let count = filter.count_in(&app.posts);
        let style = if filter == app.queue.filter() {
            Style::default().fg(COLOR_ACCENT).bold()
        } else {
            Style::default().fg(COLOR_DIM)
        };
        spans.push(Span::styled(format!(" {} {} ", filter.label(), count), style));
    }
    if !app.selection.is_empty() {
        spans.push(Span::styled(
            format!("  [{} selected, b to bulk schedule]", app.selection.len()),
            Style::default().fg(COLOR_SELECTED),
        ));
    }
    if app.posts_loading {
        spans.push(Span::styled(
            format!("  {} refreshing", spinner(app.tick_count)),
            Style::default().fg(COLOR_DIM),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_empty(frame: &mut Frame, app: &App, area: Rect) {
    let label = match app.queue.filter() {
        QueueFilter::All => "No posts found.".to_string(),
        f => format!("No {} posts found.", f.label().to_lowercase()),
    };
    frame.render_widget(
        Paragraph::new(label)
            .style(Style::default().fg(COLOR_DIM))
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(COLOR_BORDER)),
            ),
        area,
    );
}

/// Marker + title line shared by both views.
fn title_line<'a>(app: &App, post: &'a Post, is_cursor: bool, width: usize) -> Line<'a> {
    let marker = if is_cursor { "▸ " } else { "  " };
    let select = if app.selection.contains(&post.id) {
        "[x] "
    } else if post.status.is_selectable() {
        "[ ] "
    } else {
        "    "
    };
    let style = if is_cursor {
        Style::default().fg(COLOR_ACCENT).bold()
    } else {
        Style::default().fg(COLOR_TEXT)
    };
    Line::from(vec![
        Span::styled(marker, Style::default().fg(COLOR_ACCENT)),
        Span::styled(select, Style::default().fg(COLOR_SELECTED)),
        Span::styled(truncate(&post.topic, width.saturating_sub(20)), style),
        Span::raw("  "),
        Span::styled(
            post.status.label().to_uppercase(),
            Style::default().fg(status_color(post.status)).bold(),
        ),
    ])
}

fn detail_line(post: &Post) -> Line<'static> {
    Line::from(Span::styled(
        format!(
            "      {}",
            format_instant(post.scheduled_at, "Pending schedule")
        ),
        Style::default().fg(COLOR_DIM),
    ))
}

fn render_list(frame: &mut Frame, app: &App, area: Rect, visible: &[&Post]) {
    const ROW_HEIGHT: usize = 2;
    let rows_fit = (area.height as usize / ROW_HEIGHT).max(1);
    let start = app.queue_cursor.saturating_sub(rows_fit.saturating_sub(1));

    let mut lines: Vec<Line> = Vec::new();
    for (idx, post) in visible.iter().enumerate().skip(start).take(rows_fit) {
        lines.push(title_line(app, post, idx == app.queue_cursor, area.width as usize));
        lines.push(detail_line(post));
    }
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_grid(frame: &mut Frame, app: &App, area: Rect, visible: &[&Post]) {
    const CARD_HEIGHT: u16 = 6;
    let rows_fit = ((area.height / CARD_HEIGHT) as usize).max(1);
    let cursor_row = app.queue_cursor / 2;
    let start_row = cursor_row.saturating_sub(rows_fit.saturating_sub(1));

    for row in 0..rows_fit {
        let row_idx = start_row + row;
        let left_idx = row_idx * 2;
        if left_idx >= visible.len() {
            break;
        }
        let y = area.y + (row as u16) * CARD_HEIGHT;
        if y + CARD_HEIGHT > area.y + area.height {
            break;
        }
        let half = area.width / 2;
        let left = Rect::new(area.x, y, half, CARD_HEIGHT);
        render_card(frame, app, left, visible[left_idx], left_idx);
        if let Some(post) = visible.get(left_idx + 1) {
            let right = Rect::new(area.x + half, y, area.width - half, CARD_HEIGHT);
            render_card(frame, app, right, post, left_idx + 1);
        }
    }
}

fn render_card(frame: &mut Frame, app: &App, area: Rect, post: &Post, idx: usize) {
    let is_cursor = idx == app.queue_cursor;
    let selected = app.selection.contains(&post.id);
    let border = if is_cursor {
        Style::default().fg(COLOR_ACCENT)
    } else if selected {
        Style::default().fg(COLOR_SELECTED)
    } else {
        Style::default().fg(COLOR_BORDER)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(Span::styled(
            format!(" {} ", post.status.label().to_uppercase()),
            Style::default().fg(status_color(post.status)).bold(),
        ));

    let width = area.width.saturating_sub(2) as usize;
    let lines = vec![
        title_line(app, post, is_cursor, width),
        Line::from(Span::styled(
            truncate(&post.content.replace('\n', " "), width.saturating_sub(2)),
            Style::default().fg(COLOR_TEXT),
        )),
        detail_line(post),
    ];
    frame.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: true }).block(block),
        area,
    );
}

fn render_reveal_footer(frame: &mut Frame, app: &App, area: Rect, shown: usize) {
    let total = app.queue.filtered_len(&app.posts);
    let text = if shown < total {
        format!("{} of {} (scroll down for more)", shown, total)
    } else {
        format!("{} of {}", shown, total)
    };
    frame.render_widget(
        Paragraph::new(text)
            .style(Style::default().fg(COLOR_DIM))
            .alignment(Alignment::Right),
        area,
    );
}
