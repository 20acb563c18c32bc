/**
 * Get Current User Handler
 *
 * Implements `GET /api/v1/users/current-user` for the authenticated caller.
 */

use axum::extract::State;
use sqlx::PgPool;

use crate::backend::auth::handlers::types::UserResponse;
use crate::backend::auth::users::get_user_by_id;
use crate::backend::error::{ApiResult, BackendError};
use crate::backend::middleware::AuthUser;
use crate::backend::server::state::require_pool;
use crate::shared::ApiResponse;

/// Get current user handler
pub async fn current_user(
    State(pool): State<Option<PgPool>>,
    AuthUser(auth): AuthUser,
) -> ApiResult<UserResponse> {
    let pool = require_pool(&pool)?;

    let user = get_user_by_id(pool, auth.user_id).await?.ok_or_else(|| {
        tracing::warn!("User not found: {}", auth.user_id);
        BackendError::not_found("User not found")
    })?;

    Ok(ApiResponse::ok(
        UserResponse::from(user),
        "Current user fetched successfully",
    ))
}
