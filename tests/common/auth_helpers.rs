//! Authentication test helpers
//!
//! Provides a deterministic test configuration, direct token minting, and
//! HTTP helpers that register and log in users through the API.

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{json, Value};
use sqlx::PgPool;
use uuid::Uuid;
use vidtube::backend::auth::sessions::{TokenKeys, TokenSubject};
use vidtube::backend::server::build_app;
use vidtube::shared::AppConfig;

pub const TEST_PASSWORD: &str = "correct-horse-battery";

/// Configuration with fixed secrets and non-secure cookies
pub fn test_config() -> AppConfig {
    AppConfig::builder()
        .access_token_secret("test-access-secret")
        .refresh_token_secret("test-refresh-secret")
        .cookie_secure(false)
        .build()
        .expect("test config is valid")
}

/// Test server over the real router
pub fn test_server(pool: Option<PgPool>) -> TestServer {
    TestServer::new(build_app(test_config(), pool)).expect("Failed to start test server")
}

/// Mint an access token for an arbitrary user id
pub fn access_token_for(user_id: Uuid, username: &str) -> String {
    let keys = TokenKeys::from_config(&test_config());
    keys.create_access_token(TokenSubject {
        user_id,
        email: &format!("{username}@example.com"),
        username,
        full_name: username,
    })
    .expect("Failed to create test token")
}

/// Create authorization header value
pub fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}

/// A user registered and logged in through the API
#[derive(Debug, Clone)]
pub struct TestUser {
    pub id: String,
    pub username: String,
    pub access_token: String,
    pub refresh_token: String,
}

impl TestUser {
    pub fn auth(&self) -> String {
        bearer(&self.access_token)
    }
}

/// Register `username` and log in
pub async fn register_and_login(server: &TestServer, username: &str) -> TestUser {
    let register = server
        .post("/api/v1/users/register")
        .json(&json!({
            "fullName": format!("{username} Test"),
            "email": format!("{username}@example.com"),
            "username": username,
            "password": TEST_PASSWORD,
            "avatar": format!("https://cdn.example.com/{username}.png"),
        }))
        .await;
    register.assert_status(StatusCode::CREATED);

    let login = server
        .post("/api/v1/users/login")
        .json(&json!({ "username": username, "password": TEST_PASSWORD }))
        .await;
    login.assert_status_ok();
    let body: Value = login.json();

    TestUser {
        id: body["data"]["user"]["_id"].as_str().expect("user id").to_string(),
        username: username.to_string(),
        access_token: body["data"]["accessToken"]
            .as_str()
            .expect("access token")
            .to_string(),
        refresh_token: body["data"]["refreshToken"]
            .as_str()
            .expect("refresh token")
            .to_string(),
    }
}

/// Flip a video of `user` to published
pub async fn publish_video(server: &TestServer, user: &TestUser, video_id: &str) {
    let response = server
        .patch(&format!("/api/v1/videos/toggle/publish/{video_id}"))
        .add_header("Authorization", user.auth())
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["data"]["isPublished"], json!(true));
}

/// Upload a video as `user` and return its id
pub async fn upload_video(server: &TestServer, user: &TestUser, title: &str) -> String {
    let response = server
        .post("/api/v1/videos")
        .add_header("Authorization", user.auth())
        .json(&json!({
            "title": title,
            "description": format!("{title} description"),
            "videoFile": format!("https://cdn.example.com/{title}.mp4"),
            "thumbnail": format!("https://cdn.example.com/{title}.jpg"),
            "duration": 42.5,
        }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    body["data"]["_id"].as_str().expect("video id").to_string()
}
