use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::app::{App, StudioField};
use crate::state::DraftStage;
use crate::widgets::input_box::InputBoxWidget;
use crate::widgets::text_area::TextAreaWidget;

use super::helpers::{spinner, truncate};
use super::theme::{COLOR_ACCENT, COLOR_BORDER, COLOR_DIM, COLOR_ERROR, COLOR_TEXT};

pub fn render_studio(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(1),
        ])
        .split(area);

    frame.render_widget(
        InputBoxWidget::new(
            &app.manual_topic,
            " Manual Topic ",
            !app.draft.is_editing() && app.studio_focus == StudioField::Topic,
        ),
        chunks[0],
    );
    frame.render_widget(
        InputBoxWidget::new(
            &app.image_path,
            " Attach Image (optional file path) ",
            !app.draft.is_editing() && app.studio_focus == StudioField::ImagePath,
        ),
        chunks[1],
    );

    match app.draft.stage() {
        DraftStage::Idle => {
            frame.render_widget(
                Paragraph::new("Generate a draft from a trend or a manual topic.")
                    .style(Style::default().fg(COLOR_DIM))
                    .alignment(Alignment::Center)
                    .block(outer_block(" Studio ")),
                chunks[2],
            );
        }
        DraftStage::Generating => {
            frame.render_widget(
                Paragraph::new(format!("{} Generating draft...", spinner(app.tick_count)))
                    .style(Style::default().fg(COLOR_ACCENT))
                    .alignment(Alignment::Center)
                    .block(outer_block(" Studio ")),
                chunks[2],
            );
        }
        DraftStage::Previewing(draft) => render_preview(frame, app, chunks[2], draft, false),
        DraftStage::Editing(draft) => render_preview(frame, app, chunks[2], draft, true),
    }
}

fn outer_block(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(COLOR_BORDER))
        .title(title.to_string())
}

fn render_preview(
    frame: &mut Frame,
    app: &App,
    area: Rect,
    draft: &crate::state::Draft,
    editing: bool,
) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
        .split(area);

    if editing {
        frame.render_widget(
            TextAreaWidget::new(&app.editor, " Post Copy (editing) ", true),
            cols[0],
        );
    } else {
        let title = if draft.is_dirty() {
            " Post Copy · unsaved changes "
        } else {
            " Post Copy "
        };
        frame.render_widget(
            Paragraph::new(draft.content.as_str())
                .style(Style::default().fg(COLOR_TEXT))
                .wrap(Wrap { trim: false })
                .block(outer_block(title)),
            cols[0],
        );
    }

    let mut lines = vec![
        Line::from(Span::styled("Post Visual", Style::default().fg(COLOR_DIM))),
        Line::from(Span::styled(
            truncate(&draft.image_url, cols[1].width.saturating_sub(4) as usize),
            Style::default().fg(COLOR_ACCENT),
        )),
        Line::default(),
    ];
    if app.draft.is_busy() {
        lines.push(Line::from(Span::styled(
            format!("{} saving...", spinner(app.tick_count)),
            Style::default().fg(COLOR_ACCENT),
        )));
    } else if draft.is_dirty() {
        lines.push(Line::from(Span::styled(
            "Unsaved edits, ^S to update",
            Style::default().fg(COLOR_ERROR),
        )));
    }
    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        "^B  view in schedule queue",
        Style::default().fg(COLOR_TEXT),
    )));
    lines.push(Line::from(Span::styled(
        "^X  clear draft",
        Style::default().fg(COLOR_TEXT),
    )));

    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(outer_block(" Draft ")),
        cols[1],
    );
}
