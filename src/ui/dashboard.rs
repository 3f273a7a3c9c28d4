use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use crate::app::App;

use super::helpers::{format_instant, spinner, truncate};
use super::theme::{COLOR_ACCENT, COLOR_ACTIVE, COLOR_BORDER, COLOR_DIM, COLOR_TEXT};

pub fn render_dashboard(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(1)])
        .split(area);

    render_stat_tiles(frame, app, chunks[0]);
    render_trend_list(frame, app, chunks[1]);
}

fn render_stat_tiles(frame: &mut Frame, app: &App, area: Rect) {
    let tiles = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(34),
            Constraint::Percentage(33),
            Constraint::Percentage(33),
        ])
        .split(area);

    let tile = |title: &'static str| {
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(COLOR_BORDER))
            .title(title)
    };

    frame.render_widget(
        Paragraph::new(app.posts.len().to_string())
            .style(Style::default().fg(COLOR_TEXT).bold())
            .block(tile(" Active Queue ")),
        tiles[0],
    );

    let (pilot, style) = if app.scheduler.running {
        ("ACTIVE", Style::default().fg(COLOR_ACTIVE).bold())
    } else {
        ("READY", Style::default().fg(COLOR_DIM).bold())
    };
    frame.render_widget(
        Paragraph::new(pilot).style(style).block(tile(" Auto-Pilot ")),
        tiles[1],
    );

    frame.render_widget(
        Paragraph::new(format_instant(app.scheduler.next_post_at, "Manual Only"))
            .style(Style::default().fg(COLOR_ACCENT))
            .block(tile(" Next Sync ")),
        tiles[2],
    );
}

fn render_trend_list(frame: &mut Frame, app: &App, area: Rect) {
    let title = if app.trends.loading {
        format!(
            " Top Trending · {} {} ",
            app.trends.industry_label(),
            spinner(app.tick_count)
        )
    } else {
        format!(" Top Trending · {} ", app.trends.industry_label())
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(COLOR_BORDER))
        .title(title);

    let width = area.width.saturating_sub(4) as usize;
    let items: Vec<ListItem> = app
        .trends
        .topics
        .iter()
        .map(|t| {
            let mut spans = vec![Span::styled(
                truncate(&t.topic, width.saturating_sub(14)),
                Style::default().fg(COLOR_TEXT),
            )];
            if app.draft.is_generating(&t.topic) {
                spans.push(Span::styled(
                    format!("  {} drafting", spinner(app.tick_count)),
                    Style::default().fg(COLOR_ACCENT),
                ));
            }
            let source = Line::from(Span::styled(
                format!("  {}", t.source.as_deref().unwrap_or("Verified Trend")),
                Style::default().fg(COLOR_DIM),
            ));
            ListItem::new(vec![Line::from(spans), source])
        })
        .collect();

    if items.is_empty() {
        let msg = if app.trends.loading {
            format!("{} Loading trends...", spinner(app.tick_count))
        } else {
            "No trends for this category. Press r to refresh.".to_string()
        };
        frame.render_widget(
            Paragraph::new(msg)
                .style(Style::default().fg(COLOR_DIM))
                .alignment(Alignment::Center)
                .block(block),
            area,
        );
        return;
    }

    let mut state = ListState::default();
    state.select(Some(app.trends.cursor));
    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().fg(COLOR_ACCENT).bold())
        .highlight_symbol("▸ ");
    frame.render_stateful_widget(list, area, &mut state);
}
