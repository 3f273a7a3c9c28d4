//! Integration tests for the backend API client, against a wiremock server.
//!
//! Covers every endpoint the client speaks, the bearer-token side effect,
//! and server-message extraction on failure.

use trendpost::api::{ApiClient, ApiError};
use trendpost::models::PostStatus;

use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn sample_post_json(id: &str, status: &str) -> serde_json::Value {
    serde_json::json!({
        "_id": id,
        "topic": "AI in finance",
        "content": "Generated copy",
        "images": ["/uploads/img.png"],
        "status": status
    })
}

// ============================================================================
// Auth
// ============================================================================

#[tokio::test]
async fn login_returns_user_and_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .and(body_json(serde_json::json!({
            "username": "op",
            "password": "secret"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "user": { "id": "u1", "name": "op", "email": "op@example.com" },
            "token": "bearer-token"
        })))
        .mount(&server)
        .await;

    let client = ApiClient::with_base_url(server.uri());
    let resp = client.login("op", "secret").await.unwrap();
    assert_eq!(resp.token.as_deref(), Some("bearer-token"));
    assert_eq!(resp.user.unwrap().name, "op");
}

#[tokio::test]
async fn login_tolerates_missing_user_object() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "token": "bearer-token" })),
        )
        .mount(&server)
        .await;

    let client = ApiClient::with_base_url(server.uri());
    let resp = client.login("op", "secret").await.unwrap();
    assert!(resp.user.is_none());
    assert_eq!(resp.token.as_deref(), Some("bearer-token"));
}

#[tokio::test]
async fn login_failure_surfaces_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(serde_json::json!({ "message": "Bad credentials" })),
        )
        .mount(&server)
        .await;

    let client = ApiClient::with_base_url(server.uri());
    let err = client.login("op", "wrong").await.unwrap_err();
    match &err {
        ApiError::Server { status, message } => {
            assert_eq!(*status, 401);
            assert_eq!(message, "Bad credentials");
        }
        other => panic!("expected server error, got {:?}", other),
    }
    assert_eq!(
        err.user_message("Login failed. Check credentials."),
        "Bad credentials"
    );
    assert!(err.is_unauthorized());
}

// ============================================================================
// Posts
// ============================================================================

#[tokio::test]
async fn fetch_posts_attaches_bearer_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/posts"))
        .and(header("Authorization", "Bearer tok-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            sample_post_json("1", "pending"),
            sample_post_json("2", "approved"),
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::with_base_url(server.uri()).with_auth("tok-123");
    let posts = client.fetch_posts().await.unwrap();
    assert_eq!(posts.len(), 2);
    assert_eq!(posts[0].id, "1");
    assert_eq!(posts[1].status, PostStatus::Approved);
}

#[tokio::test]
async fn fetch_posts_without_token_goes_unauthenticated() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/posts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&server)
        .await;

    let client = ApiClient::with_base_url(server.uri());
    let posts = client.fetch_posts().await.unwrap();
    assert!(posts.is_empty());

    let requests = server.received_requests().await.unwrap();
    assert!(requests[0].headers.get("Authorization").is_none());
}

#[tokio::test]
async fn fetch_posts_null_body_is_empty_collection() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/posts"))
        .respond_with(ResponseTemplate::new(200).set_body_string("null"))
        .mount(&server)
        .await;

    let client = ApiClient::with_base_url(server.uri());
    let posts = client.fetch_posts().await.unwrap();
    assert!(posts.is_empty());
}

#[tokio::test]
async fn generate_post_sends_structured_request() {
    let server = MockServer::start().await;
    // The no-pre-attached-image flow: empty image string, autoApprove false.
    Mock::given(method("POST"))
        .and(path("/posts/generate"))
        .and(body_json(serde_json::json!({
            "topic": "AI in finance",
            "image": "",
            "autoApprove": false
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(sample_post_json("p9", "pending")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::with_base_url(server.uri());
    let post = client
        .generate_post("AI in finance", "", false)
        .await
        .unwrap();
    assert_eq!(post.id, "p9");
    assert_eq!(post.content, "Generated copy");
}

#[tokio::test]
async fn generate_post_with_image_sends_multipart() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/posts/generate"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(sample_post_json("p1", "pending")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let image = dir.path().join("visual.png");
    std::fs::write(&image, b"fake-png-bytes").unwrap();

    let client = ApiClient::with_base_url(server.uri()).with_auth("tok");
    let post = client
        .generate_post_with_image("Green energy", false, &image)
        .await
        .unwrap();
    assert_eq!(post.id, "p1");

    let requests = server.received_requests().await.unwrap();
    let content_type = requests[0]
        .headers
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap();
    assert!(content_type.starts_with("multipart/form-data"));
    let body = String::from_utf8_lossy(&requests[0].body);
    assert!(body.contains("name=\"topic\""));
    assert!(body.contains("Green energy"));
    assert!(body.contains("name=\"autoApprove\""));
    assert!(body.contains("name=\"image\""));
    assert!(body.contains("filename=\"visual.png\""));
}

#[tokio::test]
async fn generate_post_missing_image_file_is_io_error() {
    let server = MockServer::start().await;
    let client = ApiClient::with_base_url(server.uri());
    let err = client
        .generate_post_with_image("Topic", false, std::path::Path::new("/nonexistent/img.png"))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Io(_)));
}

#[tokio::test]
async fn trending_topics_passes_query_params() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/posts/trending-topics"))
        .and(query_param("industry", "technology"))
        .and(query_param("page", "1"))
        .and(query_param("limit", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "topics": [
                { "topic": "Quantum computing", "image": "/t/q.png", "source": "google" },
                { "topic": "Edge AI" }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::with_base_url(server.uri());
    let topics = client.trending_topics("technology", 1, 10).await.unwrap();
    assert_eq!(topics.len(), 2);
    assert_eq!(topics[0].topic, "Quantum computing");
    assert_eq!(topics[1].image, None);
}

#[tokio::test]
async fn approve_update_delete_hit_expected_paths() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/posts/approve/p1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/posts/update/p1"))
        .and(body_json(serde_json::json!({ "content": "New copy" })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/posts/delete/p1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::with_base_url(server.uri());
    client.approve_post("p1").await.unwrap();
    client.update_post_content("p1", "New copy").await.unwrap();
    client.delete_post("p1").await.unwrap();
}

#[tokio::test]
async fn schedule_post_sends_utc_instant() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/posts/schedule/p2"))
        .and(body_json(serde_json::json!({
            "scheduledAt": "2026-01-15T09:00:00.000Z",
            "autoApprove": false
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::with_base_url(server.uri());
    client
        .schedule_post("p2", "2026-01-15T09:00:00.000Z", false)
        .await
        .unwrap();
}

#[tokio::test]
async fn bulk_schedule_sends_cadence_inputs() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/posts/bulk-schedule"))
        .and(body_json(serde_json::json!({
            "ids": ["2", "5"],
            "startTime": "2026-01-15T03:30:00.000Z",
            "perDay": 2,
            "manualDate": null
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::with_base_url(server.uri());
    client
        .bulk_schedule(
            &["2".to_string(), "5".to_string()],
            "2026-01-15T03:30:00.000Z",
            2,
            None,
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn bulk_schedule_failure_carries_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/posts/bulk-schedule"))
        .respond_with(
            ResponseTemplate::new(422)
                .set_body_json(serde_json::json!({ "message": "No posts selected" })),
        )
        .mount(&server)
        .await;

    let client = ApiClient::with_base_url(server.uri());
    let err = client
        .bulk_schedule(&[], "2026-01-15T03:30:00.000Z", 1, None)
        .await
        .unwrap_err();
    assert_eq!(err.user_message("Bulk scheduling failed."), "No posts selected");
}

// ============================================================================
// Auto-posting loop
// ============================================================================

#[tokio::test]
async fn scheduler_control_roundtrip() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/posts/start"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/posts/stop"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/posts/update"))
        .and(body_json(serde_json::json!({ "intervalMinutes": 45 })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::with_base_url(server.uri());
    client.start_auto_posting().await.unwrap();
    client.stop_auto_posting().await.unwrap();
    client.update_schedule_interval(45).await.unwrap();
}

#[tokio::test]
async fn scheduler_status_accepts_bare_payload() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/posts/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "running": true,
            "intervalMinutes": 30,
            "nextPostAt": "2026-01-15T10:00:00.000Z"
        })))
        .mount(&server)
        .await;

    let client = ApiClient::with_base_url(server.uri());
    let status = client.scheduler_status().await.unwrap();
    assert!(status.running);
    assert_eq!(status.interval_minutes, 30);
    assert!(status.next_post_at.is_some());
}

#[tokio::test]
async fn scheduler_status_accepts_data_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/posts/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": { "running": false, "intervalMinutes": 90 }
        })))
        .mount(&server)
        .await;

    let client = ApiClient::with_base_url(server.uri());
    let status = client.scheduler_status().await.unwrap();
    assert!(!status.running);
    assert_eq!(status.interval_minutes, 90);
}

// ============================================================================
// Failure shapes
// ============================================================================

#[tokio::test]
async fn non_json_error_body_is_passed_through() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/posts"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .mount(&server)
        .await;

    let client = ApiClient::with_base_url(server.uri());
    let err = client.fetch_posts().await.unwrap_err();
    match err {
        ApiError::Server { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "upstream exploded");
        }
        other => panic!("expected server error, got {:?}", other),
    }
}

#[tokio::test]
async fn empty_error_body_falls_back_to_generic() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/posts"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = ApiClient::with_base_url(server.uri());
    let err = client.fetch_posts().await.unwrap_err();
    match err {
        ApiError::Server { status, message } => {
            assert_eq!(status, 503);
            assert_eq!(message, "Unknown error");
        }
        other => panic!("expected server error, got {:?}", other),
    }
}

#[tokio::test]
async fn connection_refused_is_transport_error() {
    // Port 1 is never listening.
    let client = ApiClient::with_base_url("http://127.0.0.1:1".to_string());
    let err = client.fetch_posts().await.unwrap_err();
    assert!(matches!(err, ApiError::Http(_)));
    assert_eq!(err.user_message("Failed to load posts."), "Failed to load posts.");
}
