use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::app::{App, LoginField};
use crate::widgets::input_box::InputBoxWidget;

use super::helpers::{centered_rect, spinner};
use super::theme::{COLOR_BORDER, COLOR_DIM, COLOR_HEADER};

const LOGO: [&str; 4] = [
    "▄▄▄▄▄ ▄▄▄▄  ▄▄▄▄▄ ▄▄  ▄ ▄▄▄▄  ▄▄▄▄   ▄▄▄▄ ▄▄▄▄▄",
    "  █   █   █ █     █ █ █ █   █ █   █ █       █  ",
    "  █   █▄▄▄▀ █▄▄▄  █  ██ █   █ █▄▄▄▀  ▀▀▀▄   █  ",
    "  █   █  ▀▄ █▄▄▄▄ █   █ █▄▄▄█ █     ▄▄▄▄▀   █  ",
];

pub fn render_login_screen(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let outer = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(COLOR_BORDER));
    frame.render_widget(outer, area);

    let dialog = centered_rect(area, 54, 16);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(2),
        ])
        .split(dialog);

    let logo = Paragraph::new(LOGO.join("\n"))
        .style(Style::default().fg(COLOR_HEADER))
        .alignment(Alignment::Center);
    frame.render_widget(logo, chunks[0]);
    frame.render_widget(
        Paragraph::new("LinkedIn Automation Suite")
            .style(Style::default().fg(COLOR_DIM))
            .alignment(Alignment::Center),
        chunks[1],
    );

    frame.render_widget(
        InputBoxWidget::new(
            &app.login_form.username,
            " Username ",
            app.login_form.focus == LoginField::Username,
        ),
        chunks[2],
    );
    frame.render_widget(
        InputBoxWidget::new(
            &app.login_form.password,
            " Password ",
            app.login_form.focus == LoginField::Password,
        )
        .masked(),
        chunks[3],
    );

    let status = if app.login_form.in_flight {
        format!("{} Signing in...", spinner(app.tick_count))
    } else {
        "Enter to sign in  ·  Tab to switch field  ·  Esc to quit".to_string()
    };
    frame.render_widget(
        Paragraph::new(status)
            .style(Style::default().fg(COLOR_DIM))
            .alignment(Alignment::Center),
        chunks[4],
    );
}
