//! Application state and logic for the TUI.
//!
//! [`App`] is the single source of truth: fetched collections, session,
//! and every transient UI flag. Async work is spawned in `actions`,
//! completes via [`AppMessage`], and is applied by `handlers`.

mod actions;
mod handlers;
mod messages;
mod navigation;
mod types;

pub use messages::{AppMessage, PostAction};
pub use types::{
    BulkField, LoginField, LoginForm, Modal, QueueView, Screen, StudioField, Tab, Toast,
    TOAST_TICKS,
};

use std::path::PathBuf;
use std::sync::Arc;

use color_eyre::Result;
use tokio::sync::mpsc;

use crate::api::ApiClient;
use crate::models::{Post, SchedulerStatus};
use crate::session::{Session, SessionManager};
use crate::state::{DraftWorkflow, QueueState, SelectionState, TrendsState};
use crate::widgets::{InputBox, TextArea};

/// Main application state.
pub struct App {
    /// Flag to track if the app should quit.
    pub should_quit: bool,
    pub screen: Screen,
    pub tab: Tab,

    // --- Session ---
    pub session: Session,
    pub session_manager: Option<SessionManager>,
    /// Bumped on login/logout; in-flight responses from an older epoch are
    /// discarded.
    pub session_epoch: u64,

    // --- Collections (owned here, never by the gateway) ---
    pub posts: Vec<Post>,
    /// True while a post-collection fetch is outstanding.
    pub posts_loading: bool,
    pub trends: TrendsState,
    /// Mirror of the backend loop state.
    pub scheduler: SchedulerStatus,
    /// Critical section of one around start/stop.
    pub scheduler_busy: bool,
    /// True during the combined post-login load.
    pub initial_loading: bool,

    // --- Derived view state ---
    pub queue: QueueState,
    pub queue_view: QueueView,
    /// Cursor into the visible queue slice.
    pub queue_cursor: usize,
    pub selection: SelectionState,
    pub draft: DraftWorkflow,

    // --- Inputs ---
    pub login_form: LoginForm,
    pub studio_focus: StudioField,
    pub manual_topic: InputBox,
    /// Local file to attach to the next generation (multipart path).
    pub image_path: InputBox,
    pub editor: TextArea,
    pub interval_input: InputBox,
    pub modal: Option<Modal>,

    // --- Feedback ---
    pub toast: Option<Toast>,
    pub tick_count: u64,

    // --- Plumbing ---
    pub client: Arc<ApiClient>,
    pub message_rx: Option<mpsc::UnboundedReceiver<AppMessage>>,
    pub message_tx: mpsc::UnboundedSender<AppMessage>,
}

impl App {
    /// Create a new App, reading any stored session from disk.
    pub fn new() -> Result<Self> {
        Self::with_parts(SessionManager::new(), crate::api::DEFAULT_API_URL.to_string())
    }

    /// Create an App with explicit session storage and backend URL (tests).
    pub fn with_parts(session_manager: Option<SessionManager>, base_url: String) -> Result<Self> {
        let session = session_manager
            .as_ref()
            .map(|m| m.load())
            .unwrap_or_default();

        let mut client = ApiClient::with_base_url(base_url);
        client.set_auth_token(session.token.clone());

        let (message_tx, message_rx) = mpsc::unbounded_channel();

        let screen = if session.is_authenticated() {
            Screen::Main
        } else {
            Screen::Login
        };

        Ok(Self {
            should_quit: false,
            screen,
            tab: Tab::default(),
            session,
            session_manager,
            session_epoch: 0,
            posts: Vec::new(),
            posts_loading: false,
            trends: TrendsState::new(),
            scheduler: SchedulerStatus::default(),
            scheduler_busy: false,
            initial_loading: false,
            queue: QueueState::new(),
            queue_view: QueueView::default(),
            queue_cursor: 0,
            selection: SelectionState::new(),
            draft: DraftWorkflow::new(),
            login_form: LoginForm::default(),
            studio_focus: StudioField::default(),
            manual_topic: InputBox::new(),
            image_path: InputBox::new(),
            editor: TextArea::new(),
            interval_input: InputBox::with_content("60"),
            modal: None,
            toast: None,
            tick_count: 0,
            client: Arc::new(client),
            message_rx: Some(message_rx),
            message_tx,
        })
    }

    /// Timer tick: advances animations and expires the toast.
    pub fn tick(&mut self) {
        self.tick_count += 1;
        if let Some(toast) = &self.toast {
            if self.tick_count >= toast.expires_at_tick {
                self.toast = None;
            }
        }
    }

    /// Show a transient notification (success and error alike).
    pub fn show_toast(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast {
            message: message.into(),
            expires_at_tick: self.tick_count + TOAST_TICKS,
        });
    }

    /// The local file to attach to the next generation, if the operator
    /// entered one.
    pub fn pre_attached_image(&self) -> Option<PathBuf> {
        let raw = self.image_path.content().trim();
        if raw.is_empty() {
            None
        } else {
            Some(PathBuf::from(raw))
        }
    }

    /// Rebuild the shared client so spawned tasks pick up the new token.
    fn rebuild_client(&mut self) {
        let mut client = ApiClient::with_base_url(self.client.base_url.clone());
        client.set_auth_token(self.session.token.clone());
        self.client = Arc::new(client);
    }

    /// Install an authenticated session (login success) and persist it.
    pub fn install_session(&mut self, session: Session) {
        if let Some(manager) = &self.session_manager {
            manager.save(&session);
        }
        self.session = session;
        self.rebuild_client();
        self.screen = Screen::Main;
    }

    /// Clear the session everywhere: disk, memory, client, view state.
    /// Bumps the epoch so stale responses are discarded.
    pub fn logout(&mut self) {
        if let Some(manager) = &self.session_manager {
            manager.clear();
        }
        self.session = Session::default();
        self.session_epoch += 1;
        self.rebuild_client();

        self.posts.clear();
        self.posts_loading = false;
        self.trends.reset();
        self.scheduler = SchedulerStatus::default();
        self.scheduler_busy = false;
        self.initial_loading = false;
        self.queue = QueueState::new();
        self.queue_cursor = 0;
        self.selection.clear();
        self.draft.reset();
        self.modal = None;
        self.manual_topic.clear();
        self.image_path.clear();
        self.login_form = LoginForm::default();

        self.screen = Screen::Login;
        self.tab = Tab::default();
    }

    /// Session failure: surface the message, then tear the session down.
    pub fn force_logout(&mut self, message: impl Into<String>) {
        self.logout();
        self.show_toast(message);
    }

    /// Replace the post collection and re-derive everything that hangs off
    /// it: reveal watermark, cursor, and selection validity.
    pub fn replace_posts(&mut self, posts: Vec<Post>) {
        self.posts = posts;
        self.queue.reset_window();
        self.queue_cursor = 0;
        self.selection.retain_approved(&self.posts);
    }

    /// The post under the queue cursor, if any.
    pub fn post_under_cursor(&self) -> Option<&Post> {
        self.queue.visible(&self.posts).get(self.queue_cursor).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PostStatus;

    fn test_app() -> App {
        App::with_parts(None, "http://localhost:0".to_string()).unwrap()
    }

    fn post(id: &str, status: PostStatus) -> Post {
        Post {
            id: id.to_string(),
            topic: String::new(),
            content: String::new(),
            images: Vec::new(),
            status,
            scheduled_at: None,
            created_at: None,
        }
    }

    #[test]
    fn fresh_app_starts_on_login() {
        let app = test_app();
        assert_eq!(app.screen, Screen::Login);
        assert!(!app.session.is_authenticated());
    }

    #[test]
    fn toast_expires_on_tick() {
        let mut app = test_app();
        app.show_toast("hello");
        assert!(app.toast.is_some());
        for _ in 0..TOAST_TICKS {
            app.tick();
        }
        assert!(app.toast.is_none());
    }

    #[test]
    fn logout_bumps_epoch_and_clears_state() {
        let mut app = test_app();
        app.session = Session {
            token: Some("t".into()),
            user: None,
        };
        app.posts.push(post("1", PostStatus::Approved));
        app.selection.toggle(&app.posts[0].clone());
        let epoch = app.session_epoch;

        app.logout();
        assert_eq!(app.session_epoch, epoch + 1);
        assert!(app.posts.is_empty());
        assert!(app.selection.is_empty());
        assert_eq!(app.screen, Screen::Login);
        assert!(app.client.auth_token().is_none());
    }

    #[test]
    fn replace_posts_resets_window_and_selection() {
        let mut app = test_app();
        let approved = post("1", PostStatus::Approved);
        app.posts.push(approved.clone());
        app.selection.toggle(&approved);
        assert_eq!(app.selection.len(), 1);

        // "1" left approved in the reload.
        app.replace_posts(vec![post("1", PostStatus::Scheduled)]);
        assert!(app.selection.is_empty());
        assert_eq!(app.queue_cursor, 0);
    }

    #[test]
    fn pre_attached_image_requires_nonempty_path() {
        let mut app = test_app();
        assert!(app.pre_attached_image().is_none());
        app.image_path.set_content("/tmp/pic.png");
        assert_eq!(app.pre_attached_image(), Some(PathBuf::from("/tmp/pic.png")));
    }
}
