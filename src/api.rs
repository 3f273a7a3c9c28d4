//! HTTP client for the TrendPost backend.
//!
//! One method per backend capability: auth, post CRUD, trend queries, and
//! auto-posting loop control. Every method is async, performs no retries,
//! and attaches the bearer token when one is set. Failures surface a
//! human-readable message via [`ApiError::user_message`].

use std::path::Path;
use std::time::Duration;

use reqwest::multipart;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::models::{
    LoginResponse, Post, SchedulerStatus, TrendingTopicsResponse,
};

/// Default URL for the TrendPost backend.
pub const DEFAULT_API_URL: &str = "https://aipostbe.bastionex.net";

/// Stock visual shown for posts and trends without an image.
pub const FALLBACK_IMAGE_URL: &str =
    "https://images.unsplash.com/photo-1460925895917-afdab827c52f";

/// Per-request timeout. The backend's generate endpoint can take a while;
/// everything else is quick.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Error type for backend API operations.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Transport-level failure (connect, timeout, TLS).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    /// Response body did not parse.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// Server returned a non-2xx status.
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },
    /// A local file attached to a request could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ApiError {
    /// The message to show the operator: the server-supplied one when the
    /// server sent one, otherwise the caller's generic fallback.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Server { message, .. } if !message.is_empty() => message.clone(),
            _ => fallback.to_string(),
        }
    }

    /// True for auth failures that should end the session.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Server { status: 401, .. })
    }
}

/// Server error bodies carry the message under `{"message": ...}`.
#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

fn build_client() -> Client {
    Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .unwrap_or_else(|_| Client::new())
}

/// Client for the TrendPost backend API.
pub struct ApiClient {
    /// Base URL for the backend.
    pub base_url: String,
    /// Reusable HTTP client.
    client: Client,
    /// Bearer token attached to every call when present.
    auth_token: Option<String>,
}

impl ApiClient {
    /// Create a client pointed at the default backend.
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_API_URL.to_string())
    }

    /// Create a client with a custom base URL (tests point this at a mock).
    pub fn with_base_url(base_url: String) -> Self {
        Self {
            base_url,
            client: build_client(),
            auth_token: None,
        }
    }

    /// Set the bearer token on construction.
    pub fn with_auth(mut self, token: &str) -> Self {
        self.auth_token = Some(token.to_string());
        self
    }

    /// Set or clear the bearer token on an existing client.
    pub fn set_auth_token(&mut self, token: Option<String>) {
        self.auth_token = token;
    }

    /// The current bearer token, if set.
    pub fn auth_token(&self) -> Option<&str> {
        self.auth_token.as_deref()
    }

    /// Map a backend-relative image path to an absolute URL.
    ///
    /// `data:` URIs and absolute URLs pass through; missing paths get the
    /// stock fallback visual.
    pub fn resolve_image_url(&self, path: Option<&str>) -> String {
        match path {
            None | Some("") => FALLBACK_IMAGE_URL.to_string(),
            Some(p) if p.starts_with("data:image") => p.to_string(),
            Some(p) if p.starts_with("http") => p.to_string(),
            Some(p) => {
                if p.starts_with('/') {
                    format!("{}{}", self.base_url, p)
                } else {
                    format!("{}/{}", self.base_url, p)
                }
            }
        }
    }

    fn add_auth_header(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        if let Some(ref token) = self.auth_token {
            builder.header("Authorization", format!("Bearer {}", token))
        } else {
            builder
        }
    }

    /// Turn a non-2xx response into `ApiError::Server`, pulling the message
    /// out of the body when the server sent one.
    async fn error_from_response(response: reqwest::Response) -> ApiError {
        let status = response.status().as_u16();
        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&text)
            .ok()
            .and_then(|b| b.message)
            .unwrap_or(text);
        let message = if message.is_empty() {
            "Unknown error".to_string()
        } else {
            message
        };
        ApiError::Server { status, message }
    }

    // --- Auth ---

    /// Authenticate the operator.
    ///
    /// `POST /login`
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let url = format!("{}/login", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&serde_json::json!({ "username": username, "password": password }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }

        let data: LoginResponse = response.json().await?;
        Ok(data)
    }

    // --- Posts ---

    /// Fetch the full post collection.
    ///
    /// `GET /posts`; a null body counts as an empty collection.
    pub async fn fetch_posts(&self) -> Result<Vec<Post>, ApiError> {
        let url = format!("{}/posts", self.base_url);
        let builder = self.client.get(&url);
        let response = self.add_auth_header(builder).send().await?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }

        let text = response.text().await?;
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }
        let posts: Option<Vec<Post>> = serde_json::from_str(&text)?;
        Ok(posts.unwrap_or_default())
    }

    /// Generate a post from a topic, referencing an existing image URL
    /// (or none, as an empty string).
    ///
    /// `POST /posts/generate` (JSON)
    pub async fn generate_post(
        &self,
        topic: &str,
        image_url: &str,
        auto_approve: bool,
    ) -> Result<Post, ApiError> {
        let url = format!("{}/posts/generate", self.base_url);
        debug!(topic, "requesting post generation");
        let builder = self.client.post(&url).json(&serde_json::json!({
            "topic": topic,
            "image": image_url,
            "autoApprove": auto_approve,
        }));
        let response = self.add_auth_header(builder).send().await?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }

        let post: Post = response.json().await?;
        Ok(post)
    }

    /// Generate a post with a locally attached image file.
    ///
    /// `POST /posts/generate` (multipart: topic, autoApprove, image)
    pub async fn generate_post_with_image(
        &self,
        topic: &str,
        auto_approve: bool,
        image_path: &Path,
    ) -> Result<Post, ApiError> {
        let url = format!("{}/posts/generate", self.base_url);
        let bytes = tokio::fs::read(image_path).await?;
        let file_name = image_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "image".to_string());
        let part = multipart::Part::bytes(bytes).file_name(file_name);
        let form = multipart::Form::new()
            .text("topic", topic.to_string())
            .text("autoApprove", auto_approve.to_string())
            .part("image", part);

        debug!(topic, path = %image_path.display(), "requesting post generation (multipart)");
        let builder = self.client.post(&url).multipart(form);
        let response = self.add_auth_header(builder).send().await?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }

        let post: Post = response.json().await?;
        Ok(post)
    }

    /// Fetch trending topics for an industry category.
    ///
    /// `GET /posts/trending-topics?industry&page&limit`
    pub async fn trending_topics(
        &self,
        industry: &str,
        page: u32,
        limit: u32,
    ) -> Result<Vec<crate::models::Trend>, ApiError> {
        let url = format!(
            "{}/posts/trending-topics?industry={}&page={}&limit={}",
            self.base_url, industry, page, limit
        );
        let builder = self.client.get(&url);
        let response = self.add_auth_header(builder).send().await?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }

        let wrapper: TrendingTopicsResponse = response.json().await?;
        Ok(wrapper.topics)
    }

    /// Approve a pending post.
    ///
    /// `POST /posts/approve/{id}`
    pub async fn approve_post(&self, id: &str) -> Result<(), ApiError> {
        let url = format!("{}/posts/approve/{}", self.base_url, id);
        let builder = self.client.post(&url);
        let response = self.add_auth_header(builder).send().await?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }
        Ok(())
    }

    /// Replace a post's content.
    ///
    /// `PUT /posts/update/{id}`
    pub async fn update_post_content(&self, id: &str, content: &str) -> Result<(), ApiError> {
        let url = format!("{}/posts/update/{}", self.base_url, id);
        let builder = self
            .client
            .put(&url)
            .json(&serde_json::json!({ "content": content }));
        let response = self.add_auth_header(builder).send().await?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }
        Ok(())
    }

    /// Delete a post.
    ///
    /// `DELETE /posts/delete/{id}`
    pub async fn delete_post(&self, id: &str) -> Result<(), ApiError> {
        let url = format!("{}/posts/delete/{}", self.base_url, id);
        let builder = self.client.delete(&url);
        let response = self.add_auth_header(builder).send().await?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }
        Ok(())
    }

    /// Schedule a single post for a UTC instant.
    ///
    /// `POST /posts/schedule/{id}`
    pub async fn schedule_post(
        &self,
        id: &str,
        scheduled_at_utc: &str,
        auto_approve: bool,
    ) -> Result<(), ApiError> {
        let url = format!("{}/posts/schedule/{}", self.base_url, id);
        let builder = self.client.post(&url).json(&serde_json::json!({
            "scheduledAt": scheduled_at_utc,
            "autoApprove": auto_approve,
        }));
        let response = self.add_auth_header(builder).send().await?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }
        Ok(())
    }

    /// Distribute a set of posts across future slots, `per_day` per day.
    ///
    /// `POST /posts/bulk-schedule`; the backend does the fan-out; the
    /// client only supplies the cadence inputs.
    pub async fn bulk_schedule(
        &self,
        ids: &[String],
        start_time_utc: &str,
        per_day: u32,
        manual_date_utc: Option<&str>,
    ) -> Result<(), ApiError> {
        let url = format!("{}/posts/bulk-schedule", self.base_url);
        let builder = self.client.post(&url).json(&serde_json::json!({
            "ids": ids,
            "startTime": start_time_utc,
            "perDay": per_day,
            "manualDate": manual_date_utc,
        }));
        let response = self.add_auth_header(builder).send().await?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }
        Ok(())
    }

    // --- Auto-posting loop ---

    /// Start the backend's autonomous posting loop.
    ///
    /// `POST /posts/start`
    pub async fn start_auto_posting(&self) -> Result<(), ApiError> {
        let url = format!("{}/posts/start", self.base_url);
        let builder = self.client.post(&url);
        let response = self.add_auth_header(builder).send().await?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }
        Ok(())
    }

    /// Stop the backend's autonomous posting loop.
    ///
    /// `POST /posts/stop`
    pub async fn stop_auto_posting(&self) -> Result<(), ApiError> {
        let url = format!("{}/posts/stop", self.base_url);
        let builder = self.client.post(&url);
        let response = self.add_auth_header(builder).send().await?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }
        Ok(())
    }

    /// Query the auto-posting loop state.
    ///
    /// `GET /posts/status`; tolerates the `{"data": ...}` envelope.
    pub async fn scheduler_status(&self) -> Result<SchedulerStatus, ApiError> {
        let url = format!("{}/posts/status", self.base_url);
        let builder = self.client.get(&url);
        let response = self.add_auth_header(builder).send().await?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }

        let value: serde_json::Value = response.json().await?;
        Ok(SchedulerStatus::from_response_value(value)?)
    }

    /// Change the posting cadence of the loop.
    ///
    /// `POST /posts/update`
    pub async fn update_schedule_interval(&self, interval_minutes: u32) -> Result<(), ApiError> {
        let url = format!("{}/posts/update", self.base_url);
        let builder = self
            .client
            .post(&url)
            .json(&serde_json::json!({ "intervalMinutes": interval_minutes }));
        let response = self.add_auth_header(builder).send().await?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }
        Ok(())
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}
