/**
 * Refresh Token Handler
 *
 * Implements `POST /api/v1/users/refresh-token`. The refresh token comes
 * from the `refreshToken` cookie or a `{ "refreshToken": ... }` body. It
 * must verify and match the token stored for the user; both tokens are
 * then rotated.
 */

use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;

use crate::backend::auth::cookies::{cookie_value, session_cookies, SessionCookies, REFRESH_TOKEN_COOKIE};
use crate::backend::auth::handlers::types::{RefreshRequest, TokenResponse};
use crate::backend::auth::sessions::{subject_id, TokenSubject};
use crate::backend::auth::users::{get_user_by_id, set_refresh_token};
use crate::backend::error::BackendError;
use crate::backend::server::state::{require_pool, AppState};
use crate::shared::ApiResponse;

/// Refresh handler
///
/// # Errors
///
/// * `401 Unauthorized` - token missing, invalid, expired, or superseded
/// * `503 Service Unavailable` - database not configured
pub async fn refresh_access_token(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(SessionCookies, ApiResponse<TokenResponse>), BackendError> {
    let pool = require_pool(&state.db_pool)?;

    let incoming = cookie_value(&headers, REFRESH_TOKEN_COOKIE)
        .or_else(|| {
            serde_json::from_slice::<RefreshRequest>(&body)
                .ok()
                .and_then(|r| r.refresh_token)
                .filter(|t| !t.trim().is_empty())
        })
        .ok_or_else(|| BackendError::unauthorized("Invalid authorization"))?;

    let claims = state.tokens.verify_refresh_token(&incoming).map_err(|e| {
        tracing::warn!("Invalid refresh token: {:?}", e);
        BackendError::unauthorized("Invalid refresh token")
    })?;

    let user_id = subject_id(&claims.sub)
        .ok_or_else(|| BackendError::unauthorized("Invalid refresh token"))?;

    let user = get_user_by_id(pool, user_id)
        .await?
        .ok_or_else(|| BackendError::unauthorized("Invalid refresh token"))?;

    if user.refresh_token.as_deref() != Some(incoming.as_str()) {
        tracing::warn!("Superseded refresh token presented for {}", user.username);
        return Err(BackendError::unauthorized("Invalid or expired token"));
    }

    let pair = state.tokens.issue_pair(TokenSubject {
        user_id: user.id,
        email: &user.email,
        username: &user.username,
        full_name: &user.full_name,
    })?;
    set_refresh_token(pool, user.id, Some(&pair.refresh_token)).await?;

    let cookies = session_cookies(&pair, &state.tokens, state.config.cookie_secure);
    Ok((
        cookies,
        ApiResponse::ok(
            TokenResponse {
                access_token: pair.access_token,
                refresh_token: pair.refresh_token,
            },
            "Access token refreshed",
        ),
    ))
}
