//! Rendering: one function per screen/tab, dispatched from [`render`].

mod automation;
mod dashboard;
pub mod helpers;
mod login;
mod modals;
mod queue;
mod studio;
pub mod theme;

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use crate::app::{App, Screen, Tab};
use theme::{COLOR_ACCENT, COLOR_BORDER, COLOR_DIM, COLOR_HEADER};

/// Top-level render dispatch.
pub fn render(frame: &mut Frame, app: &App) {
    match app.screen {
        Screen::Login => login::render_login_screen(frame, app),
        Screen::Main => render_main_screen(frame, app),
    }

    if let Some(modal) = &app.modal {
        modals::render_modal(frame, app, modal);
    }
    render_toast(frame, app);
}

fn render_main_screen(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(area);

    render_tab_bar(frame, app, chunks[0]);

    match app.tab {
        Tab::Dashboard => dashboard::render_dashboard(frame, app, chunks[1]),
        Tab::Studio => studio::render_studio(frame, app, chunks[1]),
        Tab::Queue => queue::render_queue(frame, app, chunks[1]),
        Tab::Automation => automation::render_automation(frame, app, chunks[1]),
    }

    render_footer(frame, app, chunks[2]);
}

fn render_tab_bar(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![Span::styled(
        " TrendPost ",
        Style::default().fg(COLOR_HEADER).bold(),
    )];
    for tab in Tab::ALL {
        let style = if tab == app.tab {
            Style::default().fg(COLOR_ACCENT).bold()
        } else {
            Style::default().fg(COLOR_DIM)
        };
        spans.push(Span::raw("  "));
        spans.push(Span::styled(tab.label(), style));
    }
    if app.initial_loading {
        spans.push(Span::styled(
            format!("  {} syncing", helpers::spinner(app.tick_count)),
            Style::default().fg(COLOR_DIM),
        ));
    }
    if let Some(user) = &app.session.user {
        spans.push(Span::styled(
            format!("  [{}]", user.name),
            Style::default().fg(COLOR_DIM),
        ));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(COLOR_BORDER));
    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let hints = match app.tab {
        Tab::Dashboard => "←/→ industry  ↑/↓ select  Enter draft post  r refresh  Tab next  ^L logout  ^Q quit",
        Tab::Studio => {
            if app.draft.is_editing() {
                "type to edit  ^S update  Esc back to preview"
            } else {
                "↑/↓ field  Enter generate  ^E edit  ^S update  ^B to queue  ^X discard"
            }
        }
        Tab::Queue => "↑/↓ move  ←/→ filter  Space select  a approve  s schedule  b bulk  d delete  v view  r refresh  Enter preview",
        Tab::Automation => "t toggle auto-pilot  type interval  Enter update",
    };
    frame.render_widget(
        Paragraph::new(hints).style(Style::default().fg(COLOR_DIM)),
        area,
    );
}

/// Bottom-right transient notification.
fn render_toast(frame: &mut Frame, app: &App) {
    let Some(toast) = &app.toast else {
        return;
    };
    let area = frame.area();
    let width = (toast.message.chars().count() as u16 + 4).min(area.width);
    let rect = Rect {
        x: area.x + area.width.saturating_sub(width + 2),
        y: area.y + area.height.saturating_sub(4),
        width,
        height: 3,
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(COLOR_ACCENT));
    frame.render_widget(ratatui::widgets::Clear, rect);
    frame.render_widget(
        Paragraph::new(toast.message.as_str())
            .block(block)
            .alignment(Alignment::Center),
        rect,
    );
}
