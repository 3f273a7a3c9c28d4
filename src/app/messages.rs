//! AppMessage enum for async completion reporting.
//!
//! Every spawned operation captures the session epoch at launch and echoes
//! it back; the handler drops messages from a previous epoch so responses
//! that raced a logout cannot touch fresh state.

use crate::models::{Post, SchedulerStatus, Trend, User};

/// A mutating backend action, for shared completion/failure plumbing.
#[derive(Debug, Clone, PartialEq)]
pub enum PostAction {
    Approve,
    Delete,
    /// Single-post schedule (also the failed-post retry).
    Schedule,
    BulkSchedule { count: usize },
    /// Persist edited draft content.
    UpdateDraft,
    /// Delete the previewed draft.
    DiscardDraft,
    /// Start or stop the auto-posting loop.
    ToggleAutomation { start: bool },
    UpdateInterval { minutes: u32 },
}

/// Messages received from spawned async operations.
#[derive(Debug, Clone)]
pub enum AppMessage {
    LoginCompleted {
        epoch: u64,
        user: User,
        token: Option<String>,
    },
    LoginFailed {
        epoch: u64,
        error: String,
    },
    /// The post-login combined load (posts + forced trends + status).
    InitialLoadCompleted {
        epoch: u64,
        posts: Vec<Post>,
        industry: String,
        topics: Vec<Trend>,
        status: SchedulerStatus,
    },
    /// Any sub-load failing fails the whole combined load: session failure.
    InitialLoadFailed {
        epoch: u64,
        error: String,
    },
    PostsLoaded {
        epoch: u64,
        posts: Vec<Post>,
    },
    PostsLoadFailed {
        epoch: u64,
        error: String,
        /// Toast the failure (user-initiated refresh) or stay silent.
        announce: bool,
        unauthorized: bool,
    },
    TrendsLoaded {
        epoch: u64,
        industry: String,
        topics: Vec<Trend>,
    },
    TrendsLoadFailed {
        epoch: u64,
        industry: String,
        error: String,
        unauthorized: bool,
    },
    SchedulerStatusLoaded {
        epoch: u64,
        status: SchedulerStatus,
    },
    /// Status fetch failed; displayed state is kept (silent, per design).
    SchedulerStatusUnavailable {
        epoch: u64,
    },
    GenerationCompleted {
        epoch: u64,
        topic: String,
        post: Post,
    },
    GenerationFailed {
        epoch: u64,
        topic: String,
        error: String,
        unauthorized: bool,
    },
    ActionCompleted {
        epoch: u64,
        action: PostAction,
    },
    ActionFailed {
        epoch: u64,
        action: PostAction,
        error: String,
        unauthorized: bool,
    },
}

impl AppMessage {
    /// The epoch this message was launched under.
    pub fn epoch(&self) -> u64 {
        match self {
            AppMessage::LoginCompleted { epoch, .. }
            | AppMessage::LoginFailed { epoch, .. }
            | AppMessage::InitialLoadCompleted { epoch, .. }
            | AppMessage::InitialLoadFailed { epoch, .. }
            | AppMessage::PostsLoaded { epoch, .. }
            | AppMessage::PostsLoadFailed { epoch, .. }
            | AppMessage::TrendsLoaded { epoch, .. }
            | AppMessage::TrendsLoadFailed { epoch, .. }
            | AppMessage::SchedulerStatusLoaded { epoch, .. }
            | AppMessage::SchedulerStatusUnavailable { epoch }
            | AppMessage::GenerationCompleted { epoch, .. }
            | AppMessage::GenerationFailed { epoch, .. }
            | AppMessage::ActionCompleted { epoch, .. }
            | AppMessage::ActionFailed { epoch, .. } => *epoch,
        }
    }
}
