//! Router tests that need no database
//!
//! The app is built without a pool, so these cover routing, the auth
//! middleware, the JSON fallback and the 503 path of data endpoints.

#[macro_use]
mod common;

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;
use uuid::Uuid;

use common::{access_token_for, bearer, test_server};

#[tokio::test]
async fn healthcheck_reports_missing_database() {
    let server = test_server(None);

    let data = assert_api_ok!(server.get("/api/v1/healthcheck").await, StatusCode::OK);

    assert_eq!(data, json!({ "status": "OK", "database": "not configured" }));
}

#[tokio::test]
async fn unknown_route_returns_json_404() {
    let server = test_server(None);

    let body = assert_api_error!(
        server.get("/api/v1/nope").await,
        StatusCode::NOT_FOUND,
        "Route not found"
    );
    assert_eq!(body["errors"], json!([]));
}

#[tokio::test]
async fn public_videos_need_a_database() {
    let server = test_server(None);

    assert_api_error!(
        server.get("/api/v1/videos/public").await,
        StatusCode::SERVICE_UNAVAILABLE,
        "Database not configured"
    );
}

#[tokio::test]
async fn protected_routes_require_a_token() {
    let server = test_server(None);

    for path in [
        "/api/v1/users/current-user",
        "/api/v1/videos",
        "/api/v1/dashboard/stats",
        "/api/v1/likes/videos",
    ] {
        assert_api_error!(server.get(path).await, StatusCode::UNAUTHORIZED, "Unauthorized request");
    }

    assert_api_error!(
        server.post("/api/v1/tweets").json(&json!({ "content": "hi" })).await,
        StatusCode::UNAUTHORIZED,
        "Unauthorized request"
    );
}

#[tokio::test]
async fn garbage_token_is_rejected() {
    let server = test_server(None);

    assert_api_error!(
        server
            .get("/api/v1/dashboard/stats")
            .add_header("Authorization", bearer("not.a.jwt"))
            .await,
        StatusCode::UNAUTHORIZED,
        "Invalid Access Token"
    );
}

#[tokio::test]
async fn valid_token_reaches_handler() {
    let server = test_server(None);
    let token = access_token_for(Uuid::new_v4(), "ferris");

    // Past the middleware, the handler reports the missing pool
    assert_api_error!(
        server
            .get("/api/v1/dashboard/stats")
            .add_header("Authorization", bearer(&token))
            .await,
        StatusCode::SERVICE_UNAVAILABLE,
        "Database not configured"
    );
}

#[tokio::test]
async fn access_token_cookie_is_accepted() {
    let server = test_server(None);
    let token = access_token_for(Uuid::new_v4(), "ferris");

    assert_api_error!(
        server
            .get("/api/v1/users/history")
            .add_header("Cookie", format!("accessToken={token}"))
            .await,
        StatusCode::SERVICE_UNAVAILABLE,
        "Database not configured"
    );
}
