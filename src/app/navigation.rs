//! Keyboard routing.
//!
//! One entry point, [`App::handle_key`], dispatching by screen, open
//! modal, and tab. Text-entry widgets consume plain keys; actions hang off
//! Ctrl combinations and bare letters on tabs without text inputs.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::{App, BulkField, Modal, Screen, StudioField, Tab};
use crate::models::PostStatus;

fn is_ctrl(key: &KeyEvent, c: char) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char(c)
}

impl App {
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        if is_ctrl(&key, 'c') || is_ctrl(&key, 'q') {
            self.should_quit = true;
            return;
        }

        match self.screen {
            Screen::Login => self.handle_login_key(key),
            Screen::Main => self.handle_main_key(key),
        }
    }

    fn handle_login_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Tab | KeyCode::Up | KeyCode::Down => self.login_form.toggle_focus(),
            KeyCode::Enter => self.submit_login(),
            _ => {
                if !key.modifiers.contains(KeyModifiers::CONTROL) {
                    self.login_form.focused_input().handle_key(&key);
                }
            }
        }
    }

    fn handle_main_key(&mut self, key: KeyEvent) {
        if self.modal.is_some() {
            self.handle_modal_key(key);
            return;
        }
        if self.tab == Tab::Studio && self.draft.is_editing() {
            self.handle_editor_key(key);
            return;
        }

        if is_ctrl(&key, 'l') {
            self.logout();
            return;
        }
        match key.code {
            KeyCode::Tab => {
                self.tab = self.tab.next();
                return;
            }
            KeyCode::BackTab => {
                self.tab = self.tab.prev();
                return;
            }
            _ => {}
        }

        match self.tab {
            Tab::Dashboard => self.handle_dashboard_key(key),
            Tab::Studio => self.handle_studio_key(key),
            Tab::Queue => self.handle_queue_key(key),
            Tab::Automation => self.handle_automation_key(key),
        }
    }

    fn handle_modal_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.modal = None;
                return;
            }
            KeyCode::Enter => {
                if matches!(self.modal, Some(Modal::SingleSchedule { .. })) {
                    self.confirm_single_schedule();
                } else if matches!(self.modal, Some(Modal::BulkSchedule { .. })) {
                    self.confirm_bulk_schedule();
                } else if matches!(self.modal, Some(Modal::Preview { .. })) {
                    self.modal = None;
                }
                return;
            }
            KeyCode::Tab => {
                if let Some(Modal::BulkSchedule { focus, .. }) = &mut self.modal {
                    *focus = focus.next();
                }
                return;
            }
            _ => {}
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return;
        }
        if let Some(modal) = &mut self.modal {
            match modal {
                Modal::SingleSchedule { datetime, .. } => {
                    datetime.handle_key(&key);
                }
                Modal::BulkSchedule {
                    time,
                    per_day,
                    start_date,
                    focus,
                } => {
                    let input = match focus {
                        BulkField::Time => time,
                        BulkField::PerDay => per_day,
                        BulkField::StartDate => start_date,
                    };
                    input.handle_key(&key);
                }
                Modal::Preview { .. } => {}
            }
        }
    }

    /// All keys go to the content editor while editing; Esc returns to
    /// preview, Ctrl+S persists.
    fn handle_editor_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Esc {
            let content = self.editor.content();
            self.draft.set_content(&content);
            self.draft.finish_editing();
            return;
        }
        if is_ctrl(&key, 's') {
            let content = self.editor.content();
            self.draft.set_content(&content);
            self.persist_draft_content();
            return;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return;
        }
        if self.editor.handle_key(&key) {
            let content = self.editor.content();
            self.draft.set_content(&content);
        }
    }

    fn handle_dashboard_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Left => {
                self.trends.cycle_industry(false);
                self.load_trends(false);
            }
            KeyCode::Right => {
                self.trends.cycle_industry(true);
                self.load_trends(false);
            }
            KeyCode::Up => self.trends.cursor_up(),
            KeyCode::Down => self.trends.cursor_down(),
            KeyCode::Enter => {
                let selected = self
                    .trends
                    .selected()
                    .map(|t| (t.topic.clone(), t.image.clone()));
                if let Some((topic, image)) = selected {
                    self.start_generation(&topic, image);
                }
            }
            KeyCode::Char('r') => self.load_trends(true),
            _ => {}
        }
    }

    fn handle_studio_key(&mut self, key: KeyEvent) {
        if is_ctrl(&key, 'e') {
            let content = self.draft.draft().map(|d| d.content.clone());
            if let Some(content) = content {
                if self.draft.start_editing() {
                    self.editor.set_content(&content);
                }
            }
            return;
        }
        if is_ctrl(&key, 's') {
            self.persist_draft_content();
            return;
        }
        if is_ctrl(&key, 'x') {
            self.discard_draft();
            return;
        }
        if is_ctrl(&key, 'b') {
            self.commit_draft_to_queue();
            return;
        }

        match key.code {
            KeyCode::Up | KeyCode::Down => {
                self.studio_focus = match self.studio_focus {
                    StudioField::Topic => StudioField::ImagePath,
                    StudioField::ImagePath => StudioField::Topic,
                };
            }
            KeyCode::Enter => {
                let topic = self.manual_topic.content().to_string();
                self.start_generation(&topic, None);
            }
            _ => {
                if !key.modifiers.contains(KeyModifiers::CONTROL) {
                    let input = match self.studio_focus {
                        StudioField::Topic => &mut self.manual_topic,
                        StudioField::ImagePath => &mut self.image_path,
                    };
                    input.handle_key(&key);
                }
            }
        }
    }

    fn handle_queue_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up => self.queue_cursor = self.queue_cursor.saturating_sub(1),
            KeyCode::Down => self.queue_cursor_down(),
            KeyCode::Left => {
                self.queue.cycle_filter(false);
                self.queue_cursor = 0;
            }
            KeyCode::Right => {
                self.queue.cycle_filter(true);
                self.queue_cursor = 0;
            }
            KeyCode::Char(' ') => {
                let target = self.post_under_cursor().cloned();
                if let Some(post) = target {
                    self.selection.toggle(&post);
                }
            }
            KeyCode::Enter => {
                let target = self.post_under_cursor().cloned();
                if let Some(post) = target {
                    self.modal = Some(Modal::Preview { post });
                }
            }
            KeyCode::Char('a') => {
                let target = self.post_under_cursor().map(|p| (p.id.clone(), p.status));
                if let Some((id, status)) = target {
                    if status.is_reviewable() {
                        self.approve_post(id);
                    }
                }
            }
            KeyCode::Char('d') => {
                let target = self.post_under_cursor().map(|p| (p.id.clone(), p.status));
                if let Some((id, status)) = target {
                    if matches!(
                        status,
                        PostStatus::Pending | PostStatus::Approved | PostStatus::Failed
                    ) {
                        self.delete_post(id);
                    }
                }
            }
            KeyCode::Char('s') => {
                let target = self.post_under_cursor().map(|p| (p.id.clone(), p.status));
                if let Some((id, status)) = target {
                    if status.is_schedulable() {
                        self.modal = Some(Modal::single_schedule(id));
                    }
                }
            }
            KeyCode::Char('b') => {
                if self.selection.is_empty() {
                    self.show_toast("Select approved posts first.");
                } else {
                    self.modal = Some(Modal::bulk_schedule());
                }
            }
            KeyCode::Char('v') => self.queue_view = self.queue_view.toggled(),
            KeyCode::Char('r') => self.refresh_posts(),
            _ => {}
        }
    }

    fn handle_automation_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('t') | KeyCode::Char(' ') => self.toggle_automation(),
            KeyCode::Enter => self.submit_interval_update(),
            _ => {
                if !key.modifiers.contains(KeyModifiers::CONTROL) {
                    self.interval_input.handle_key(&key);
                }
            }
        }
    }

    /// Moving past the last visible row is the infinite-scroll sentinel:
    /// grow the reveal window when more filtered posts remain and no post
    /// load is in flight.
    fn queue_cursor_down(&mut self) {
        let visible_len = self.queue.visible(&self.posts).len();
        if visible_len == 0 {
            return;
        }
        if self.queue_cursor + 1 < visible_len {
            self.queue_cursor += 1;
        } else if self.queue.reveal_more(&self.posts, self.posts_loading) {
            self.queue_cursor += 1;
        }
    }
}
