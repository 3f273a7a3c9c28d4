//! Applies [`AppMessage`]s to the App.
//!
//! Messages from a previous session epoch are discarded: a response that
//! raced a logout must not touch fresh state.

use tracing::{debug, warn};

use crate::app::{App, AppMessage, PostAction};
use crate::session::Session;
use crate::state::Draft;

/// Toast for auth failures that end the session.
const SESSION_EXPIRED: &str = "Session expired. Please login again.";

impl App {
    pub fn handle_message(&mut self, msg: AppMessage) {
        if msg.epoch() != self.session_epoch {
            debug!(epoch = msg.epoch(), current = self.session_epoch, "discarding stale message");
            return;
        }

        match msg {
            AppMessage::LoginCompleted { user, token, .. } => {
                self.login_form.in_flight = false;
                self.install_session(Session {
                    token,
                    user: Some(user),
                });
                self.show_toast("Login successful!");
                self.start_initial_load();
            }
            AppMessage::LoginFailed { error, .. } => {
                self.login_form.in_flight = false;
                self.show_toast(error);
            }

            AppMessage::InitialLoadCompleted {
                posts,
                industry,
                topics,
                status,
                ..
            } => {
                self.initial_loading = false;
                self.replace_posts(posts);
                self.trends.store(&industry, topics);
                self.interval_input
                    .set_content(status.interval_minutes.to_string());
                self.scheduler = status;
            }
            AppMessage::InitialLoadFailed { error, .. } => {
                warn!(%error, "combined initial load failed");
                self.initial_loading = false;
                self.force_logout(error);
            }

            AppMessage::PostsLoaded { posts, .. } => {
                self.posts_loading = false;
                self.replace_posts(posts);
            }
            AppMessage::PostsLoadFailed {
                error,
                announce,
                unauthorized,
                ..
            } => {
                self.posts_loading = false;
                self.replace_posts(Vec::new());
                if unauthorized {
                    self.force_logout(SESSION_EXPIRED);
                } else if announce {
                    self.show_toast(error);
                }
            }

            AppMessage::TrendsLoaded {
                industry, topics, ..
            } => {
                // Cached either way; displayed only if the operator is
                // still on that industry.
                self.trends.store(&industry, topics);
            }
            AppMessage::TrendsLoadFailed {
                industry,
                error,
                unauthorized,
                ..
            } => {
                self.trends.store_failure(&industry);
                if unauthorized {
                    self.force_logout(SESSION_EXPIRED);
                } else {
                    self.show_toast(error);
                }
            }

            AppMessage::SchedulerStatusLoaded { status, .. } => {
                self.interval_input
                    .set_content(status.interval_minutes.to_string());
                self.scheduler = status;
            }
            AppMessage::SchedulerStatusUnavailable { .. } => {}

            AppMessage::GenerationCompleted { topic, post, .. } => {
                let image_url = self.client.resolve_image_url(post.primary_image());
                self.draft
                    .complete_generation(&topic, Draft::new(post.id, post.content, image_url));
                // Pre-attached image clears on success only.
                self.image_path.clear();
                self.tab = crate::app::Tab::Studio;
                self.reload_posts_silent();
            }
            AppMessage::GenerationFailed {
                topic,
                error,
                unauthorized,
                ..
            } => {
                self.draft.fail_generation(&topic);
                if unauthorized {
                    self.force_logout(SESSION_EXPIRED);
                } else {
                    self.show_toast(error);
                }
            }

            AppMessage::ActionCompleted { action, .. } => self.handle_action_completed(action),
            AppMessage::ActionFailed {
                action,
                error,
                unauthorized,
                ..
            } => self.handle_action_failed(action, error, unauthorized),
        }
    }

    fn handle_action_completed(&mut self, action: PostAction) {
        match action {
            PostAction::Approve => {
                self.show_toast("Post approved!");
                self.reload_posts_silent();
            }
            PostAction::Delete => {
                self.show_toast("Post deleted!");
                self.reload_posts_silent();
            }
            PostAction::Schedule => {
                self.modal = None;
                self.show_toast("Post scheduled successfully!");
                self.reload_posts_silent();
            }
            PostAction::BulkSchedule { count } => {
                self.modal = None;
                self.selection.clear();
                self.show_toast(format!("Bulk scheduled {} posts!", count));
                self.reload_posts_silent();
            }
            PostAction::UpdateDraft => {
                self.draft.content_persisted();
                self.show_toast("Post updated!");
                self.reload_posts_silent();
            }
            PostAction::DiscardDraft => {
                self.draft.discarded();
                self.reload_posts_silent();
            }
            PostAction::ToggleAutomation { start } => {
                self.scheduler_busy = false;
                self.show_toast(if start {
                    "Auto-Pilot Started"
                } else {
                    "Auto-Pilot Stopped"
                });
                self.refresh_scheduler_status();
            }
            PostAction::UpdateInterval { .. } => {
                self.show_toast("Posting frequency updated.");
                self.refresh_scheduler_status();
            }
        }
    }

    fn handle_action_failed(&mut self, action: PostAction, error: String, unauthorized: bool) {
        // Undo the action's critical-section flag before any teardown.
        match &action {
            PostAction::ToggleAutomation { .. } => {
                self.scheduler_busy = false;
                // Displayed state must not drift: refetch even after failure.
                self.refresh_scheduler_status();
            }
            PostAction::UpdateDraft | PostAction::DiscardDraft => {
                self.draft.set_busy(false);
            }
            _ => {}
        }

        if unauthorized {
            self.force_logout(SESSION_EXPIRED);
        } else {
            self.show_toast(error);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::Screen;
    use crate::models::{Post, PostStatus, SchedulerStatus, Trend, User};

    fn test_app() -> App {
        let mut app = App::with_parts(None, "http://localhost:0".to_string()).unwrap();
        app.session = Session {
            token: Some("tok".into()),
            user: Some(User::from_username("op")),
        };
        app.screen = Screen::Main;
        app
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
    fn stale_epoch_messages_are_dropped() {
        let mut app = test_app();
        app.session_epoch = 2;
        app.handle_message(AppMessage::PostsLoaded {
            epoch: 1,
            posts: vec![post("1", PostStatus::Pending)],
        });
        assert!(app.posts.is_empty());
    }

    #[test]
    fn initial_load_failure_forces_logout() {
        let mut app = test_app();
        app.initial_loading = true;
        let epoch = app.session_epoch;
        app.handle_message(AppMessage::InitialLoadFailed {
            epoch,
            error: "Session expired or sync error. Please login again.".into(),
        });
        assert_eq!(app.screen, Screen::Login);
        assert!(!app.session.is_authenticated());
        assert_eq!(app.session_epoch, epoch + 1);
        assert!(app.toast.is_some());
    }

    #[test]
    fn initial_load_success_populates_everything() {
        let mut app = test_app();
        app.initial_loading = true;
        app.handle_message(AppMessage::InitialLoadCompleted {
            epoch: app.session_epoch,
            posts: vec![post("1", PostStatus::Pending)],
            industry: "top".into(),
            topics: vec![Trend {
                topic: "AI".into(),
                image: None,
                source: None,
            }],
            status: SchedulerStatus {
                running: true,
                interval_minutes: 30,
                next_post_at: None,
                last_posted_at: None,
            },
        });
        assert!(!app.initial_loading);
        assert_eq!(app.posts.len(), 1);
        assert_eq!(app.trends.topics.len(), 1);
        assert!(app.scheduler.running);
        assert_eq!(app.interval_input.content(), "30");
    }

    #[test]
    fn trends_for_departed_industry_cache_without_display() {
        let mut app = test_app();
        app.handle_message(AppMessage::TrendsLoaded {
            epoch: app.session_epoch,
            industry: "health".into(),
            topics: vec![Trend {
                topic: "x".into(),
                image: None,
                source: None,
            }],
        });
        // Still displaying the current industry (nothing), but "health" is
        // now cached for when the operator cycles to it.
        assert!(app.trends.topics.is_empty());
        assert!(!app.trends.needs_fetch("health", false));
    }

    #[tokio::test]
    async fn bulk_schedule_completion_clears_selection_and_modal() {
        let mut app = test_app();
        let p = post("2", PostStatus::Approved);
        app.posts.push(p.clone());
        app.selection.toggle(&p);
        app.modal = Some(crate::app::Modal::bulk_schedule());

        app.handle_message(AppMessage::ActionCompleted {
            epoch: app.session_epoch,
            action: PostAction::BulkSchedule { count: 1 },
        });
        assert!(app.selection.is_empty());
        assert!(app.modal.is_none());
        assert_eq!(app.toast.as_ref().unwrap().message, "Bulk scheduled 1 posts!");
    }

    #[tokio::test]
    async fn toggle_failure_clears_busy_flag() {
        let mut app = test_app();
        app.scheduler_busy = true;
        app.handle_message(AppMessage::ActionFailed {
            epoch: app.session_epoch,
            action: PostAction::ToggleAutomation { start: true },
            error: "Failed to toggle scheduler.".into(),
            unauthorized: false,
        });
        assert!(!app.scheduler_busy);
        assert!(app.toast.is_some());
    }

    #[test]
    fn unauthorized_action_failure_ends_session() {
        let mut app = test_app();
        app.handle_message(AppMessage::ActionFailed {
            epoch: app.session_epoch,
            action: PostAction::Approve,
            error: "expired".into(),
            unauthorized: true,
        });
        assert_eq!(app.screen, Screen::Login);
        assert_eq!(app.toast.as_ref().unwrap().message, SESSION_EXPIRED);
    }

    #[tokio::test]
    async fn generation_completion_lands_in_studio_preview() {
        let mut app = test_app();
        app.image_path.set_content("/tmp/pic.png");
        app.draft.begin_generation("AI in finance");

        let mut generated = post("p9", PostStatus::Pending);
        generated.content = "Generated copy".into();
        generated.images = vec!["/uploads/x.png".into()];

        app.handle_message(AppMessage::GenerationCompleted {
            epoch: app.session_epoch,
            topic: "AI in finance".into(),
            post: generated,
        });

        assert_eq!(app.tab, crate::app::Tab::Studio);
        let draft = app.draft.draft().unwrap();
        assert_eq!(draft.content, "Generated copy");
        assert_eq!(draft.original_content(), "Generated copy");
        assert!(draft.image_url.ends_with("/uploads/x.png"));
        // Pre-attached image cleared on success.
        assert!(app.pre_attached_image().is_none());
        assert!(!app.draft.is_generating("AI in finance"));
    }

    #[test]
    fn generation_failure_keeps_preattached_image() {
        let mut app = test_app();
        app.image_path.set_content("/tmp/pic.png");
        app.draft.begin_generation("AI");
        app.handle_message(AppMessage::GenerationFailed {
            epoch: app.session_epoch,
            topic: "AI".into(),
            error: "AI generation failed.".into(),
            unauthorized: false,
        });
        assert!(app.pre_attached_image().is_some());
        assert!(app.toast.is_some());
        assert!(matches!(app.draft.stage(), crate::state::DraftStage::Idle));
    }

    #[test]
    fn posts_load_failure_announces_only_when_asked() {
        let mut app = test_app();
        app.handle_message(AppMessage::PostsLoadFailed {
            epoch: app.session_epoch,
            error: "Failed to load posts.".into(),
            announce: false,
            unauthorized: false,
        });
        assert!(app.toast.is_none());

        app.handle_message(AppMessage::PostsLoadFailed {
            epoch: app.session_epoch,
            error: "Failed to load posts.".into(),
            announce: true,
            unauthorized: false,
        });
        assert!(app.toast.is_some());
    }
}
