/**
 * Login and Logout Handlers
 *
 * `POST /api/v1/users/login` verifies a username-or-email plus password,
 * issues an access/refresh pair, stores the refresh token and sets both
 * tokens as cookies. `POST /api/v1/users/logout` forgets the stored
 * refresh token and clears the cookies.
 */

use axum::extract::{rejection::JsonRejection, State};
use axum::Json;

use crate::backend::auth::cookies::{cleared_session_cookies, session_cookies, SessionCookies};
use crate::backend::auth::handlers::types::{AuthResponse, LoginRequest, UserResponse};
use crate::backend::auth::sessions::TokenSubject;
use crate::backend::auth::users::{get_user_by_login, set_refresh_token};
use crate::backend::error::BackendError;
use crate::backend::middleware::AuthUser;
use crate::backend::server::state::{require_pool, AppState};
use crate::shared::validation::non_blank;
use crate::shared::{ApiResponse, Empty};

/// Login handler
///
/// # Errors
///
/// * `400 Bad Request` - missing identifier or password, unknown user, wrong password
/// * `503 Service Unavailable` - database not configured
pub async fn login(
    State(state): State<AppState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<(SessionCookies, ApiResponse<AuthResponse>), BackendError> {
    let pool = require_pool(&state.db_pool)?;
    let Json(request) = body?;

    let identifier = non_blank(request.username.as_deref())
        .or_else(|| non_blank(request.email.as_deref()))
        .ok_or_else(|| BackendError::bad_request("username or email is required"))?;

    let password = request
        .password
        .as_deref()
        .filter(|p| !p.is_empty())
        .ok_or_else(|| BackendError::bad_request("password is required"))?;

    let user = get_user_by_login(pool, identifier).await?.ok_or_else(|| {
        tracing::warn!("User not found: {}", identifier);
        BackendError::bad_request("user with this username does not exist")
    })?;

    if !bcrypt::verify(password, &user.password_hash)? {
        tracing::warn!("Invalid password for user: {}", user.username);
        return Err(BackendError::bad_request("incorrect password"));
    }

    let pair = state.tokens.issue_pair(TokenSubject {
        user_id: user.id,
        email: &user.email,
        username: &user.username,
        full_name: &user.full_name,
    })?;
    set_refresh_token(pool, user.id, Some(&pair.refresh_token)).await?;

    tracing::info!("User logged in: {} ({})", user.username, user.email);

    let cookies = session_cookies(&pair, &state.tokens, state.config.cookie_secure);
    Ok((
        cookies,
        ApiResponse::ok(
            AuthResponse {
                user: UserResponse::from(user),
                access_token: pair.access_token,
                refresh_token: pair.refresh_token,
            },
            "User logged in successfully",
        ),
    ))
}

/// Logout handler
pub async fn logout(
    State(state): State<AppState>,
    AuthUser(auth): AuthUser,
) -> Result<(SessionCookies, ApiResponse<Empty>), BackendError> {
    let pool = require_pool(&state.db_pool)?;

    set_refresh_token(pool, auth.user_id, None).await?;
    tracing::info!("User logged out: {}", auth.username);

    Ok((
        cleared_session_cookies(state.config.cookie_secure),
        ApiResponse::ok(Empty {}, "User logged out"),
    ))
}
