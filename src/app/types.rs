//! Screen, tab, focus, modal, and toast types for the App.

use crate::models::Post;
use crate::widgets::InputBox;

/// Which screen is currently displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Login,
    Main,
}

/// Top-level tabs of the main screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Dashboard,
    Studio,
    Queue,
    Automation,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Dashboard, Tab::Studio, Tab::Queue, Tab::Automation];

    pub fn label(self) -> &'static str {
        match self {
            Tab::Dashboard => "Dashboard",
            Tab::Studio => "Studio",
            Tab::Queue => "Queue",
            Tab::Automation => "Automation",
        }
    }

    pub fn next(self) -> Tab {
        let idx = Tab::ALL.iter().position(|t| *t == self).unwrap_or(0);
        Tab::ALL[(idx + 1) % Tab::ALL.len()]
    }

    pub fn prev(self) -> Tab {
        let idx = Tab::ALL.iter().position(|t| *t == self).unwrap_or(0);
        Tab::ALL[(idx + Tab::ALL.len() - 1) % Tab::ALL.len()]
    }
}

/// How the queue renders its cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QueueView {
    #[default]
    Grid,
    List,
}

impl QueueView {
    pub fn toggled(self) -> QueueView {
        match self {
            QueueView::Grid => QueueView::List,
            QueueView::List => QueueView::Grid,
        }
    }
}

/// Which login field has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginField {
    #[default]
    Username,
    Password,
}

/// Login form state.
#[derive(Debug, Default)]
pub struct LoginForm {
    pub username: InputBox,
    pub password: InputBox,
    pub focus: LoginField,
    /// True while a login request is outstanding.
    pub in_flight: bool,
}

impl LoginForm {
    pub fn focused_input(&mut self) -> &mut InputBox {
        match self.focus {
            LoginField::Username => &mut self.username,
            LoginField::Password => &mut self.password,
        }
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            LoginField::Username => LoginField::Password,
            LoginField::Password => LoginField::Username,
        };
    }
}

/// Which studio input has focus while not editing content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StudioField {
    #[default]
    Topic,
    ImagePath,
}

/// Fields of the bulk-schedule modal, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BulkField {
    #[default]
    Time,
    PerDay,
    StartDate,
}

impl BulkField {
    pub fn next(self) -> BulkField {
        match self {
            BulkField::Time => BulkField::PerDay,
            BulkField::PerDay => BulkField::StartDate,
            BulkField::StartDate => BulkField::Time,
        }
    }
}

/// Modal dialogs layered over the main screen.
#[derive(Debug)]
pub enum Modal {
    /// Pick a release date/time for one post (also the failed-post retry).
    SingleSchedule {
        post_id: String,
        /// `YYYY-MM-DDTHH:MM`, local wall clock.
        datetime: InputBox,
    },
    /// Cadence inputs for scheduling the whole selection.
    BulkSchedule {
        /// `HH:MM`, local wall clock.
        time: InputBox,
        per_day: InputBox,
        /// `YYYY-MM-DD`, optional; empty means today.
        start_date: InputBox,
        focus: BulkField,
    },
    /// Read-only full view of a queued post.
    Preview { post: Post },
}

impl Modal {
    pub fn single_schedule(post_id: String) -> Self {
        Modal::SingleSchedule {
            post_id,
            datetime: InputBox::new(),
        }
    }

    pub fn bulk_schedule() -> Self {
        Modal::BulkSchedule {
            time: InputBox::with_content("09:00"),
            per_day: InputBox::with_content("1"),
            start_date: InputBox::new(),
            focus: BulkField::default(),
        }
    }
}

/// How many ticks a toast stays on screen (ticks are 250ms; ~5s).
pub const TOAST_TICKS: u64 = 20;

/// A transient, auto-dismissing notification.
#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub expires_at_tick: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tab_cycle_wraps() {
        assert_eq!(Tab::Dashboard.next(), Tab::Studio);
        assert_eq!(Tab::Automation.next(), Tab::Dashboard);
        assert_eq!(Tab::Dashboard.prev(), Tab::Automation);
    }

    #[test]
    fn queue_view_toggles() {
        assert_eq!(QueueView::Grid.toggled(), QueueView::List);
        assert_eq!(QueueView::List.toggled(), QueueView::Grid);
    }

    #[test]
    fn bulk_modal_defaults() {
        if let Modal::BulkSchedule { time, per_day, start_date, focus } = Modal::bulk_schedule() {
            assert_eq!(time.content(), "09:00");
            assert_eq!(per_day.content(), "1");
            assert!(start_date.is_empty());
            assert_eq!(focus, BulkField::Time);
        } else {
            panic!("expected bulk modal");
        }
    }

    #[test]
    fn bulk_field_order() {
        assert_eq!(BulkField::Time.next(), BulkField::PerDay);
        assert_eq!(BulkField::PerDay.next(), BulkField::StartDate);
        assert_eq!(BulkField::StartDate.next(), BulkField::Time);
    }
}
