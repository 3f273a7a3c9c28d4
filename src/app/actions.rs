//! Async operations: every backend call is spawned here and reports back
//! through the message channel. No retries; failures carry a
//! human-readable message and an unauthorized flag for the session-failure
//! path.

use std::sync::Arc;

use tracing::{debug, info};

use crate::api::ApiError;
use crate::app::{App, AppMessage, Modal, PostAction};
use crate::models::User;
use crate::state::TRENDS_PAGE_SIZE;
use crate::time_convert;

/// Failure payload shared by most action messages.
fn describe(err: &ApiError, fallback: &str) -> (String, bool) {
    (err.user_message(fallback), err.is_unauthorized())
}

impl App {
    /// Authenticate with the backend. Guarded against re-entry while a
    /// login is outstanding.
    pub fn submit_login(&mut self) {
        if self.login_form.in_flight {
            return;
        }
        let username = self.login_form.username.content().trim().to_string();
        let password = self.login_form.password.content().to_string();
        if username.is_empty() || password.is_empty() {
            self.show_toast("Username and password are required.");
            return;
        }
        self.login_form.in_flight = true;

        let client = Arc::clone(&self.client);
        let tx = self.message_tx.clone();
        let epoch = self.session_epoch;
        tokio::spawn(async move {
            let msg = match client.login(&username, &password).await {
                Ok(resp) => AppMessage::LoginCompleted {
                    epoch,
                    user: resp.user.unwrap_or_else(|| User::from_username(&username)),
                    token: resp.token,
                },
                Err(e) => AppMessage::LoginFailed {
                    epoch,
                    error: e.user_message("Login failed. Check credentials."),
                },
            };
            let _ = tx.send(msg);
        });
    }

    /// The combined post-login load: posts, trends (forced), and scheduler
    /// status run concurrently; completion is the join of all three and any
    /// failure fails the whole load.
    pub fn start_initial_load(&mut self) {
        self.initial_loading = true;
        let industry = self.trends.industry_key().to_string();
        self.trends.loading = true;

        let client = Arc::clone(&self.client);
        let tx = self.message_tx.clone();
        let epoch = self.session_epoch;
        tokio::spawn(async move {
            let result = tokio::try_join!(
                client.fetch_posts(),
                client.trending_topics(&industry, 1, TRENDS_PAGE_SIZE),
                client.scheduler_status(),
            );
            let msg = match result {
                Ok((posts, topics, status)) => {
                    info!(posts = posts.len(), topics = topics.len(), "initial load complete");
                    AppMessage::InitialLoadCompleted {
                        epoch,
                        posts,
                        industry,
                        topics,
                        status,
                    }
                }
                Err(e) => AppMessage::InitialLoadFailed {
                    epoch,
                    error: e.user_message("Session expired or sync error. Please login again."),
                },
            };
            let _ = tx.send(msg);
        });
    }

    /// User-initiated post refresh: guarded by the loading flag and
    /// announced on failure.
    pub fn refresh_posts(&mut self) {
        if self.posts_loading {
            return;
        }
        self.posts_loading = true;
        self.spawn_posts_load(true);
    }

    /// Background reload after a mutation; silent on failure.
    pub fn reload_posts_silent(&mut self) {
        self.spawn_posts_load(false);
    }

    fn spawn_posts_load(&self, announce: bool) {
        let client = Arc::clone(&self.client);
        let tx = self.message_tx.clone();
        let epoch = self.session_epoch;
        tokio::spawn(async move {
            let msg = match client.fetch_posts().await {
                Ok(posts) => AppMessage::PostsLoaded { epoch, posts },
                Err(e) => {
                    let (error, unauthorized) = describe(&e, "Failed to load posts.");
                    AppMessage::PostsLoadFailed {
                        epoch,
                        error,
                        announce,
                        unauthorized,
                    }
                }
            };
            let _ = tx.send(msg);
        });
    }

    /// Fetch trends for the current industry, honoring the per-industry
    /// session cache unless forced.
    pub fn load_trends(&mut self, force: bool) {
        let industry = self.trends.industry_key().to_string();
        if !self.trends.needs_fetch(&industry, force) {
            return;
        }
        self.trends.loading = true;

        let client = Arc::clone(&self.client);
        let tx = self.message_tx.clone();
        let epoch = self.session_epoch;
        tokio::spawn(async move {
            let msg = match client.trending_topics(&industry, 1, TRENDS_PAGE_SIZE).await {
                Ok(topics) => AppMessage::TrendsLoaded {
                    epoch,
                    industry,
                    topics,
                },
                Err(e) => {
                    let (error, unauthorized) = describe(&e, "Failed to load trending topics.");
                    AppMessage::TrendsLoadFailed {
                        epoch,
                        industry,
                        error,
                        unauthorized,
                    }
                }
            };
            let _ = tx.send(msg);
        });
    }

    /// Re-mirror the auto-posting loop state. Silent on failure.
    pub fn refresh_scheduler_status(&mut self) {
        let client = Arc::clone(&self.client);
        let tx = self.message_tx.clone();
        let epoch = self.session_epoch;
        tokio::spawn(async move {
            let msg = match client.scheduler_status().await {
                Ok(status) => AppMessage::SchedulerStatusLoaded { epoch, status },
                Err(e) => {
                    debug!(error = %e, "scheduler status fetch failed");
                    AppMessage::SchedulerStatusUnavailable { epoch }
                }
            };
            let _ = tx.send(msg);
        });
    }

    /// Kick off generation for a topic, optionally seeded with a trend's
    /// image URL. A locally attached image switches the request to
    /// multipart. Per-topic re-entry is refused; other topics are free to
    /// generate concurrently.
    pub fn start_generation(&mut self, topic: &str, trend_image: Option<String>) {
        let topic = topic.trim().to_string();
        if topic.is_empty() {
            self.show_toast("Enter a topic first.");
            return;
        }
        if !self.draft.begin_generation(&topic) {
            return;
        }
        let pre_image = self.pre_attached_image();

        let client = Arc::clone(&self.client);
        let tx = self.message_tx.clone();
        let epoch = self.session_epoch;
        tokio::spawn(async move {
            let result = match &pre_image {
                Some(path) => client.generate_post_with_image(&topic, false, path).await,
                None => {
                    client
                        .generate_post(&topic, trend_image.as_deref().unwrap_or(""), false)
                        .await
                }
            };
            let msg = match result {
                Ok(post) => AppMessage::GenerationCompleted { epoch, topic, post },
                Err(e) => {
                    let (error, unauthorized) = describe(&e, "AI generation failed.");
                    AppMessage::GenerationFailed {
                        epoch,
                        topic,
                        error,
                        unauthorized,
                    }
                }
            };
            let _ = tx.send(msg);
        });
    }

    /// Approve the pending post with this id.
    pub fn approve_post(&mut self, id: String) {
        self.spawn_action(PostAction::Approve, "Approval failed.", move |client| async move {
            client.approve_post(&id).await
        });
    }

    /// Delete the post with this id.
    pub fn delete_post(&mut self, id: String) {
        self.spawn_action(PostAction::Delete, "Delete failed.", move |client| async move {
            client.delete_post(&id).await
        });
    }

    /// Persist edited draft content. Critical section of one via the
    /// workflow busy flag; requires a dirty draft.
    pub fn persist_draft_content(&mut self) {
        if self.draft.is_busy() || !self.draft.is_dirty() {
            return;
        }
        let Some(draft) = self.draft.draft() else {
            return;
        };
        let id = draft.id.clone();
        let content = draft.content.clone();
        self.draft.set_busy(true);
        self.spawn_action(
            PostAction::UpdateDraft,
            "Failed to update post.",
            move |client| async move { client.update_post_content(&id, &content).await },
        );
    }

    /// Delete the previewed draft. The preview stays until the backend
    /// confirms, so a failed delete leaves it intact.
    pub fn discard_draft(&mut self) {
        if self.draft.is_busy() {
            return;
        }
        let Some(id) = self.draft.discard_target().map(str::to_string) else {
            return;
        };
        self.draft.set_busy(true);
        self.spawn_action(
            PostAction::DiscardDraft,
            "Failed to discard draft.",
            move |client| async move { client.delete_post(&id).await },
        );
    }

    /// Commit the previewed draft into the queue: no mutation, just
    /// navigation. Approval/scheduling happen from the queue.
    pub fn commit_draft_to_queue(&mut self) {
        if self.draft.commit_to_queue().is_some() {
            self.tab = crate::app::Tab::Queue;
        }
    }

    /// Confirm the single-schedule modal: convert the local wall-clock
    /// input to UTC and issue the call.
    pub fn confirm_single_schedule(&mut self) {
        let (id, raw) = match &self.modal {
            Some(Modal::SingleSchedule { post_id, datetime }) => {
                (post_id.clone(), datetime.content().trim().to_string())
            }
            _ => return,
        };
        let Some(instant) = time_convert::datetime_local_to_utc(&raw) else {
            self.show_toast("Enter a valid date/time (YYYY-MM-DDTHH:MM).");
            return;
        };
        let at = time_convert::utc_iso(instant);
        self.spawn_action(
            PostAction::Schedule,
            "Scheduling failed.",
            move |client| async move { client.schedule_post(&id, &at, false).await },
        );
    }

    /// Confirm the bulk-schedule modal. Client-side validation only:
    /// non-empty (still approved) selection and a parseable time; the
    /// backend does the fan-out.
    pub fn confirm_bulk_schedule(&mut self) {
        let (time_raw, per_day_raw, date_raw) = match &self.modal {
            Some(Modal::BulkSchedule {
                time,
                per_day,
                start_date,
                ..
            }) => (
                time.content().trim().to_string(),
                per_day.content().trim().to_string(),
                start_date.content().trim().to_string(),
            ),
            _ => return,
        };

        let ids = self.selection.ids_for_request(&self.posts);
        if ids.is_empty() {
            self.show_toast("Select approved posts first.");
            return;
        }
        let Some(start) = time_convert::time_today_to_utc(&time_raw) else {
            self.show_toast("Enter a valid time (HH:MM).");
            return;
        };
        let manual_date = if date_raw.is_empty() {
            None
        } else {
            match time_convert::date_to_utc(&date_raw) {
                Some(d) => Some(time_convert::utc_iso(d)),
                None => {
                    self.show_toast("Enter a valid start date (YYYY-MM-DD).");
                    return;
                }
            }
        };
        let per_day = per_day_raw.parse::<u32>().unwrap_or(1).max(1);
        let start = time_convert::utc_iso(start);
        let count = ids.len();

        self.spawn_action(
            PostAction::BulkSchedule { count },
            "Bulk scheduling failed.",
            move |client| async move {
                client
                    .bulk_schedule(&ids, &start, per_day, manual_date.as_deref())
                    .await
            },
        );
    }

    /// Start or stop the auto-posting loop. Critical section of one: the
    /// busy flag refuses re-entrant toggles until the in-flight call
    /// resolves, and the status is refetched afterwards either way.
    pub fn toggle_automation(&mut self) {
        if self.scheduler_busy {
            return;
        }
        self.scheduler_busy = true;
        let start = !self.scheduler.running;
        self.spawn_action(
            PostAction::ToggleAutomation { start },
            "Failed to toggle scheduler.",
            move |client| async move {
                if start {
                    client.start_auto_posting().await
                } else {
                    client.stop_auto_posting().await
                }
            },
        );
    }

    /// Push the interval input to the backend, then re-mirror status.
    pub fn submit_interval_update(&mut self) {
        let minutes = match self.interval_input.content().trim().parse::<u32>() {
            Ok(m) if m > 0 => m,
            _ => {
                self.show_toast("Enter a valid number of minutes.");
                return;
            }
        };
        self.spawn_action(
            PostAction::UpdateInterval { minutes },
            "Failed to update frequency.",
            move |client| async move { client.update_schedule_interval(minutes).await },
        );
    }

    /// Shared spawn plumbing for mutating calls.
    fn spawn_action<F, Fut>(&self, action: PostAction, fallback: &'static str, op: F)
    where
        F: FnOnce(Arc<crate::api::ApiClient>) -> Fut + Send + 'static,
        Fut: std::future::Future<Output = Result<(), ApiError>> + Send + 'static,
    {
        let client = Arc::clone(&self.client);
        let tx = self.message_tx.clone();
        let epoch = self.session_epoch;
        tokio::spawn(async move {
            let msg = match op(client).await {
                Ok(()) => AppMessage::ActionCompleted { epoch, action },
                Err(e) => {
                    let (error, unauthorized) = describe(&e, fallback);
                    AppMessage::ActionFailed {
                        epoch,
                        action,
                        error,
                        unauthorized,
                    }
                }
            };
            let _ = tx.send(msg);
        });
    }
}
