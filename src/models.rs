//! Data models for the TrendPost backend API.
//!
//! These mirror the wire format the backend speaks: camelCase fields,
//! Mongo-style `_id` aliases, and a couple of envelope quirks
//! (`{"topics": [...]}` for trends, an optional `{"data": ...}` wrapper
//! around the scheduler status).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status of a post in the queue.
///
/// `pending → approved → scheduled → posted`, with `failed` reachable from
/// `scheduled` (or from the posting attempt itself).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    #[default]
    Pending,
    Approved,
    Scheduled,
    Posted,
    Failed,
}

impl PostStatus {
    /// Only approved posts may be multi-selected for bulk scheduling.
    pub fn is_selectable(self) -> bool {
        matches!(self, PostStatus::Approved)
    }

    /// Approved and failed posts expose a schedule (retry) action.
    pub fn is_schedulable(self) -> bool {
        matches!(self, PostStatus::Approved | PostStatus::Failed)
    }

    /// Pending posts may be approved or rejected.
    pub fn is_reviewable(self) -> bool {
        matches!(self, PostStatus::Pending)
    }

    pub fn label(self) -> &'static str {
        match self {
            PostStatus::Pending => "pending",
            PostStatus::Approved => "approved",
            PostStatus::Scheduled => "scheduled",
            PostStatus::Posted => "posted",
            PostStatus::Failed => "failed",
        }
    }
}

impl std::fmt::Display for PostStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A generated post, as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Backend sends Mongo-style `_id`.
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub topic: String,
    #[serde(default)]
    pub content: String,
    /// Backend-relative paths or absolute URLs; first entry is the visual.
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub status: PostStatus,
    #[serde(default)]
    pub scheduled_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Post {
    /// First attached image path, if any.
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}

/// A trending topic for one industry category.
///
/// Ephemeral: never mutated, only replaced wholesale on refresh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trend {
    pub topic: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
}

/// Wrapper for `GET /posts/trending-topics`: the API returns
/// `{"topics": [...]}`, not a bare array.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TrendingTopicsResponse {
    #[serde(default)]
    pub topics: Vec<Trend>,
}

/// The authenticated operator's profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    pub email: String,
}

impl User {
    /// Fallback profile when the login response carries no user object.
    pub fn from_username(username: &str) -> Self {
        Self {
            id: None,
            name: username.to_string(),
            email: format!("{}@trendpost.local", username),
        }
    }
}

/// Response from `POST /login`.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub token: Option<String>,
}

/// State of the backend auto-posting loop.
///
/// Process-wide singleton mirrored from the backend; refetched after every
/// toggle or interval update so displayed state never drifts for more than
/// one round trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchedulerStatus {
    #[serde(default)]
    pub running: bool,
    #[serde(default = "default_interval_minutes")]
    pub interval_minutes: u32,
    #[serde(default)]
    pub next_post_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_posted_at: Option<DateTime<Utc>>,
}

fn default_interval_minutes() -> u32 {
    60
}

impl Default for SchedulerStatus {
    fn default() -> Self {
        Self {
            running: false,
            interval_minutes: 60,
            next_post_at: None,
            last_posted_at: None,
        }
    }
}

impl SchedulerStatus {
    /// `GET /posts/status` sometimes wraps the payload in `{"data": ...}`.
    /// Accept both shapes.
    pub fn from_response_value(value: serde_json::Value) -> Result<Self, serde_json::Error> {
        let inner = match value.get("data") {
            Some(data) if data.is_object() => data.clone(),
            _ => value,
        };
        serde_json::from_value(inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_status_roundtrips_lowercase() {
        for (status, s) in [
            (PostStatus::Pending, "\"pending\""),
            (PostStatus::Approved, "\"approved\""),
            (PostStatus::Scheduled, "\"scheduled\""),
            (PostStatus::Posted, "\"posted\""),
            (PostStatus::Failed, "\"failed\""),
        ] {
            assert_eq!(serde_json::to_string(&status).unwrap(), s);
            let back: PostStatus = serde_json::from_str(s).unwrap();
            assert_eq!(back, status);
        }
    }

    #[test]
    fn post_status_action_gates() {
        assert!(PostStatus::Approved.is_selectable());
        assert!(!PostStatus::Pending.is_selectable());
        assert!(!PostStatus::Failed.is_selectable());

        assert!(PostStatus::Approved.is_schedulable());
        assert!(PostStatus::Failed.is_schedulable());
        assert!(!PostStatus::Posted.is_schedulable());

        assert!(PostStatus::Pending.is_reviewable());
        assert!(!PostStatus::Scheduled.is_reviewable());
    }

    #[test]
    fn post_deserializes_mongo_id_and_camel_case() {
        let json = r#"{
            "_id": "abc123",
            "topic": "AI in finance",
            "content": "Some copy",
            "images": ["/uploads/img.png"],
            "status": "approved",
            "scheduledAt": "2026-01-15T09:00:00.000Z"
        }"#;
        let post: Post = serde_json::from_str(json).unwrap();
        assert_eq!(post.id, "abc123");
        assert_eq!(post.status, PostStatus::Approved);
        assert_eq!(post.primary_image(), Some("/uploads/img.png"));
        assert!(post.scheduled_at.is_some());
    }

    #[test]
    fn post_tolerates_missing_optional_fields() {
        let post: Post = serde_json::from_str(r#"{"id": "p1"}"#).unwrap();
        assert_eq!(post.status, PostStatus::Pending);
        assert!(post.images.is_empty());
        assert!(post.scheduled_at.is_none());
    }

    #[test]
    fn scheduler_status_accepts_bare_and_enveloped() {
        let bare = serde_json::json!({
            "running": true,
            "intervalMinutes": 30
        });
        let status = SchedulerStatus::from_response_value(bare).unwrap();
        assert!(status.running);
        assert_eq!(status.interval_minutes, 30);

        let wrapped = serde_json::json!({
            "data": { "running": false, "intervalMinutes": 15 }
        });
        let status = SchedulerStatus::from_response_value(wrapped).unwrap();
        assert!(!status.running);
        assert_eq!(status.interval_minutes, 15);
    }

    #[test]
    fn scheduler_status_defaults_interval() {
        let status = SchedulerStatus::from_response_value(serde_json::json!({})).unwrap();
        assert!(!status.running);
        assert_eq!(status.interval_minutes, 60);
    }

    #[test]
    fn user_fallback_from_username() {
        let user = User::from_username("operator");
        assert_eq!(user.name, "operator");
        assert_eq!(user.email, "operator@trendpost.local");
        assert!(user.id.is_none());
    }

    #[test]
    fn trending_response_defaults_to_empty() {
        let resp: TrendingTopicsResponse = serde_json::from_str("{}").unwrap();
        assert!(resp.topics.is_empty());
    }
}
