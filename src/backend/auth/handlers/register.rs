/**
 * Register Handler
 *
 * Implements `POST /api/v1/users/register`.
 *
 * # Registration Process
 *
 * 1. Require full name, email, username, password and avatar URL
 * 2. Validate username length and email format
 * 3. Reject an already used username or email
 * 4. Hash the password with bcrypt and create the user
 * 5. Return the new user (201) without signing in
 */

use axum::extract::{rejection::JsonRejection, State};
use axum::Json;
use sqlx::PgPool;

use crate::backend::auth::handlers::types::{RegisterRequest, UserResponse};
use crate::backend::auth::users::{create_user, username_or_email_taken, NewUser};
use crate::backend::error::{ApiResult, BackendError};
use crate::backend::server::state::require_pool;
use crate::shared::validation::{is_valid_email, is_valid_username, non_blank, MIN_USERNAME_LEN};
use crate::shared::ApiResponse;

/// bcrypt work factor
pub const BCRYPT_COST: u32 = 10;

const USER_EXISTS: &str = "User with email or username already exists";

/// Register handler
///
/// # Errors
///
/// * `400 Bad Request` - missing fields, short username, malformed email
/// * `409 Conflict` - username or email already registered
/// * `503 Service Unavailable` - database not configured
pub async fn register(
    State(pool): State<Option<PgPool>>,
    body: Result<Json<RegisterRequest>, JsonRejection>,
) -> ApiResult<UserResponse> {
    let pool = require_pool(&pool)?;
    let Json(request) = body?;

    let (Some(full_name), Some(email), Some(username), Some(password)) = (
        non_blank(request.full_name.as_deref()),
        non_blank(request.email.as_deref()),
        non_blank(request.username.as_deref()),
        non_blank(request.password.as_deref()),
    ) else {
        tracing::warn!("Registration with missing fields");
        return Err(BackendError::bad_request("All fields are required"));
    };

    let avatar = non_blank(request.avatar.as_deref())
        .ok_or_else(|| BackendError::bad_request("Avatar is required"))?;

    let username = username.to_lowercase();
    let email = email.to_lowercase();

    if !is_valid_username(&username) {
        tracing::warn!("Invalid username format: {}", username);
        return Err(BackendError::bad_request(format!(
            "Username must be at least {MIN_USERNAME_LEN} characters"
        )));
    }

    if !is_valid_email(&email) {
        tracing::warn!("Invalid email format: {}", email);
        return Err(BackendError::bad_request("Invalid email format"));
    }

    if username_or_email_taken(pool, &username, &email).await? {
        tracing::warn!("Username or email already exists: {} / {}", username, email);
        return Err(BackendError::conflict(USER_EXISTS));
    }

    let password_hash = bcrypt::hash(password, BCRYPT_COST)?;

    let new_user = NewUser {
        username,
        full_name: full_name.to_string(),
        email,
        password_hash,
        avatar: avatar.to_string(),
        avatar_id: request.avatar_id.filter(|s| !s.trim().is_empty()),
        cover_image: non_blank(request.cover_image.as_deref()).map(str::to_string),
        cover_image_id: request.cover_image_id.filter(|s| !s.trim().is_empty()),
    };

    let user = create_user(pool, &new_user).await.map_err(|e| {
        let err = BackendError::from(e);
        if err.is_unique_violation() {
            BackendError::conflict(USER_EXISTS)
        } else {
            err
        }
    })?;

    tracing::info!("User registered: {} ({})", user.username, user.email);

    Ok(ApiResponse::created(
        UserResponse::from(user),
        "User registered successfully",
    ))
}
