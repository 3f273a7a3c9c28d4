//! Filter and reveal-window bookkeeping for the post queue.
//!
//! The visible slice is always a pure derivation:
//! `take(visible_count, filter(posts, filter))`. The reveal window is a
//! monotonic watermark within one filter; changing the filter or reloading
//! the collection restarts it. Growth happens when the cursor consumes the
//! current window, is clamped to the filtered total, and is a no-op while a
//! post load is in flight.

use crate::models::{Post, PostStatus};

/// Reveal window size right after a filter change or reload.
pub const INITIAL_WINDOW: usize = 10;

/// How many more posts each growth step reveals.
pub const WINDOW_INCREMENT: usize = 10;

/// Which slice of the queue is being viewed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QueueFilter {
    #[default]
    All,
    Pending,
    Approved,
    Scheduled,
    Posted,
    Failed,
}

impl QueueFilter {
    /// Display order of the filter bar.
    pub const ALL: [QueueFilter; 6] = [
        QueueFilter::All,
        QueueFilter::Pending,
        QueueFilter::Approved,
        QueueFilter::Scheduled,
        QueueFilter::Posted,
        QueueFilter::Failed,
    ];

    pub fn label(self) -> &'static str {
        match self {
            QueueFilter::All => "All",
            QueueFilter::Pending => "Pending",
            QueueFilter::Approved => "Approved",
            QueueFilter::Scheduled => "Scheduled",
            QueueFilter::Posted => "Posted",
            QueueFilter::Failed => "Failed",
        }
    }

    /// `All` is the identity filter; the rest match exact status equality.
    pub fn matches(self, status: PostStatus) -> bool {
        match self {
            QueueFilter::All => true,
            QueueFilter::Pending => status == PostStatus::Pending,
            QueueFilter::Approved => status == PostStatus::Approved,
            QueueFilter::Scheduled => status == PostStatus::Scheduled,
            QueueFilter::Posted => status == PostStatus::Posted,
            QueueFilter::Failed => status == PostStatus::Failed,
        }
    }

    /// Badge count for this filter over the full collection.
    pub fn count_in(self, posts: &[Post]) -> usize {
        posts.iter().filter(|p| self.matches(p.status)).count()
    }
}

/// Active filter plus the reveal watermark.
#[derive(Debug, Clone)]
pub struct QueueState {
    filter: QueueFilter,
    visible_count: usize,
}

impl Default for QueueState {
    fn default() -> Self {
        Self::new()
    }
}

impl QueueState {
    pub fn new() -> Self {
        Self {
            filter: QueueFilter::All,
            visible_count: INITIAL_WINDOW,
        }
    }

    pub fn filter(&self) -> QueueFilter {
        self.filter
    }

    pub fn visible_count(&self) -> usize {
        self.visible_count
    }

    /// Switch filters. Moving to a different filter restarts the reveal
    /// window at the initial size; re-selecting the current filter keeps it.
    pub fn set_filter(&mut self, filter: QueueFilter) {
        if filter != self.filter {
            self.filter = filter;
            self.visible_count = INITIAL_WINDOW;
        }
    }

    /// Step through the filter bar, wrapping at the ends.
    pub fn cycle_filter(&mut self, forward: bool) {
        let idx = QueueFilter::ALL
            .iter()
            .position(|f| *f == self.filter)
            .unwrap_or(0);
        let len = QueueFilter::ALL.len();
        let next = if forward {
            (idx + 1) % len
        } else {
            (idx + len - 1) % len
        };
        self.set_filter(QueueFilter::ALL[next]);
    }

    /// Restart the watermark; called when the post collection is replaced.
    pub fn reset_window(&mut self) {
        self.visible_count = INITIAL_WINDOW;
    }

    /// The visible slice: a prefix of the filtered sequence, so items are
    /// never skipped or duplicated.
    pub fn visible<'a>(&self, posts: &'a [Post]) -> Vec<&'a Post> {
        posts
            .iter()
            .filter(|p| self.filter.matches(p.status))
            .take(self.visible_count)
            .collect()
    }

    /// Total posts matching the active filter.
    pub fn filtered_len(&self, posts: &[Post]) -> usize {
        self.filter.count_in(posts)
    }

    /// True when every filtered post is already revealed.
    pub fn is_exhausted(&self, posts: &[Post]) -> bool {
        self.visible_count >= self.filtered_len(posts)
    }

    /// Grow the reveal window by one increment, clamped to the filtered
    /// total. No-op while a post load is in flight, and idempotent once the
    /// window covers everything. Returns whether the window grew.
    pub fn reveal_more(&mut self, posts: &[Post], load_in_flight: bool) -> bool {
        if load_in_flight {
            return false;
        }
        let total = self.filtered_len(posts);
        if self.visible_count >= total {
            return false;
        }
        self.visible_count = (self.visible_count + WINDOW_INCREMENT).min(total);
        true
    }
}
