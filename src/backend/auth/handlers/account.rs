/**
 * Account Update Handlers
 *
 * Password change, profile fields and the avatar / cover image URLs of the
 * authenticated caller.
 */

use axum::extract::{rejection::JsonRejection, State};
use axum::Json;
use sqlx::PgPool;

use crate::backend::auth::handlers::register::BCRYPT_COST;
use crate::backend::auth::handlers::types::{
    ChangePasswordRequest, UpdateAvatarRequest, UpdateCoverRequest, UpdateProfileRequest,
    UserResponse,
};
use crate::backend::auth::users::{
    get_user_by_id, update_avatar, update_cover_image, update_password, update_profile,
    ProfileUpdate,
};
use crate::backend::error::{ApiResult, BackendError};
use crate::backend::middleware::AuthUser;
use crate::backend::server::state::require_pool;
use crate::shared::validation::{is_valid_email, non_blank};
use crate::shared::{ApiResponse, Empty};

/// `POST /change-password`
pub async fn change_password(
    State(pool): State<Option<PgPool>>,
    AuthUser(auth): AuthUser,
    body: Result<Json<ChangePasswordRequest>, JsonRejection>,
) -> ApiResult<Empty> {
    let pool = require_pool(&pool)?;
    let Json(request) = body?;

    let old_password = request.old_password.unwrap_or_default();
    let new_password = request
        .new_password
        .filter(|p| !p.is_empty())
        .ok_or_else(|| BackendError::bad_request("New password is required"))?;

    if request.confirm_password.as_deref() != Some(new_password.as_str()) {
        return Err(BackendError::bad_request(
            "New password and confirm password not matching",
        ));
    }

    let user = get_user_by_id(pool, auth.user_id)
        .await?
        .ok_or_else(|| BackendError::not_found("User not found"))?;

    if !bcrypt::verify(&old_password, &user.password_hash)? {
        tracing::warn!("Incorrect old password for {}", user.username);
        return Err(BackendError::bad_request("Incorrect old password"));
    }

    let password_hash = bcrypt::hash(&new_password, BCRYPT_COST)?;
    update_password(pool, user.id, &password_hash).await?;
    tracing::info!("Password changed for {}", user.username);

    Ok(ApiResponse::ok(Empty {}, "Password changed successfully"))
}

/// `PATCH /update-profile`
pub async fn update_account_details(
    State(pool): State<Option<PgPool>>,
    AuthUser(auth): AuthUser,
    body: Result<Json<UpdateProfileRequest>, JsonRejection>,
) -> ApiResult<UserResponse> {
    let pool = require_pool(&pool)?;
    let Json(request) = body?;

    let update = ProfileUpdate {
        full_name: non_blank(request.full_name.as_deref()).map(str::to_string),
        email: non_blank(request.email.as_deref()).map(str::to_lowercase),
        description: non_blank(request.description.as_deref()).map(str::to_string),
    };

    if update.full_name.is_none() && update.email.is_none() && update.description.is_none() {
        return Err(BackendError::bad_request("Provide at least one field"));
    }

    if let Some(email) = &update.email {
        if !is_valid_email(email) {
            return Err(BackendError::bad_request("Invalid email format"));
        }
    }

    let user = update_profile(pool, auth.user_id, &update).await.map_err(|e| {
        let err = BackendError::from(e);
        if err.is_unique_violation() {
            BackendError::conflict("Email is already in use")
        } else {
            err
        }
    })?;

    Ok(ApiResponse::ok(
        UserResponse::from(user),
        "Account details updated successfully",
    ))
}

/// `PATCH /update-avatar`
pub async fn update_user_avatar(
    State(pool): State<Option<PgPool>>,
    AuthUser(auth): AuthUser,
    body: Result<Json<UpdateAvatarRequest>, JsonRejection>,
) -> ApiResult<UserResponse> {
    let pool = require_pool(&pool)?;
    let Json(request) = body?;

    let avatar = non_blank(request.avatar.as_deref())
        .ok_or_else(|| BackendError::bad_request("Avatar file missing"))?;

    let user = update_avatar(
        pool,
        auth.user_id,
        avatar,
        non_blank(request.avatar_id.as_deref()),
    )
    .await?;

    Ok(ApiResponse::ok(
        UserResponse::from(user),
        "Avatar updated successfully",
    ))
}

/// `PATCH /update-cover`
pub async fn update_user_cover_image(
    State(pool): State<Option<PgPool>>,
    AuthUser(auth): AuthUser,
    body: Result<Json<UpdateCoverRequest>, JsonRejection>,
) -> ApiResult<UserResponse> {
    let pool = require_pool(&pool)?;
    let Json(request) = body?;

    let cover_image = non_blank(request.cover_image.as_deref())
        .ok_or_else(|| BackendError::bad_request("cover image file missing"))?;

    let user = update_cover_image(
        pool,
        auth.user_id,
        cover_image,
        non_blank(request.cover_image_id.as_deref()),
    )
    .await?;

    Ok(ApiResponse::ok(
        UserResponse::from(user),
        "Cover image updated successfully",
    ))
}
