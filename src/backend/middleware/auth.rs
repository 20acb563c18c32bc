/**
 * Authentication Middleware
 *
 * This module protects routes that require a signed-in user. The access
 * token is read from the `accessToken` cookie, falling back to an
 * `Authorization: Bearer <token>` header, and the resulting identity is
 * attached to the request extensions for the [`AuthUser`] extractor.
 */

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, Extensions, HeaderMap},
    middleware::Next,
    response::Response,
};
use sqlx::PgPool;
use uuid::Uuid;

use crate::backend::auth::cookies::{cookie_value, ACCESS_TOKEN_COOKIE};
use crate::backend::auth::sessions::subject_id;
use crate::backend::auth::users::user_exists;
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;

/// Authenticated user data extracted from the access token
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub email: String,
    pub username: String,
}

/// Pull the access token from the cookie or the bearer header
pub fn extract_token(headers: &HeaderMap) -> Option<String> {
    cookie_value(headers, ACCESS_TOKEN_COOKIE).or_else(|| {
        headers
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .and_then(|h| h.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
    })
}

/// Authentication middleware
///
/// This middleware:
/// 1. Extracts the access token (cookie, then bearer header)
/// 2. Verifies the token
/// 3. Confirms the user still exists when a database is configured
/// 4. Attaches [`AuthenticatedUser`] to the request extensions
///
/// Returns 401 `Unauthorized request` when no token is present and 401
/// `Invalid Access Token` when it does not verify.
pub async fn auth_middleware(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, BackendError> {
    let token = extract_token(request.headers()).ok_or_else(|| {
        tracing::warn!("Missing access token");
        BackendError::unauthorized("Unauthorized request")
    })?;

    let claims = app_state.tokens.verify_access_token(&token).map_err(|e| {
        tracing::warn!("Invalid access token: {:?}", e);
        BackendError::unauthorized("Invalid Access Token")
    })?;

    let user_id = subject_id(&claims.sub).ok_or_else(|| {
        tracing::warn!("Invalid user ID in token: {}", claims.sub);
        BackendError::unauthorized("Invalid Access Token")
    })?;

    if let Some(pool) = &app_state.db_pool {
        verify_user_exists(pool, user_id).await?;
    }

    request.extensions_mut().insert(AuthenticatedUser {
        user_id,
        email: claims.email,
        username: claims.username,
    });

    Ok(next.run(request).await)
}

/// Verify the token's user still exists
async fn verify_user_exists(pool: &PgPool, user_id: Uuid) -> Result<(), BackendError> {
    if user_exists(pool, user_id).await? {
        Ok(())
    } else {
        tracing::warn!("User not found in database: {}", user_id);
        Err(BackendError::unauthorized("Invalid Access Token"))
    }
}

/// Authenticated user stored by [`auth_middleware`]
fn authenticated_user(extensions: &Extensions) -> Result<AuthenticatedUser, BackendError> {
    extensions.get::<AuthenticatedUser>().cloned().ok_or_else(|| {
        tracing::warn!("AuthenticatedUser not found in request extensions");
        BackendError::unauthorized("Unauthorized request")
    })
}

/// Axum extractor for authenticated user
///
/// Only valid on routes behind [`auth_middleware`].
#[derive(Clone, Debug)]
pub struct AuthUser(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        authenticated_user(&parts.extensions).map(AuthUser)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderValue, StatusCode};

    #[test]
    fn test_authenticated_user_from_extensions() {
        let mut request = Request::builder()
            .uri("http://example.com")
            .body(axum::body::Body::empty())
            .unwrap();

        let user = AuthenticatedUser {
            user_id: Uuid::new_v4(),
            email: "test@example.com".to_string(),
            username: "tester".to_string(),
        };
        request.extensions_mut().insert(user.clone());

        assert_eq!(authenticated_user(request.extensions()).unwrap(), user);
    }

    #[test]
    fn test_authenticated_user_missing() {
        let request = Request::builder()
            .uri("http://example.com")
            .body(axum::body::Body::empty())
            .unwrap();

        let err = authenticated_user(request.extensions()).unwrap_err();
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_cookie_token_preferred_over_bearer() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer from-header"));
        assert_eq!(extract_token(&headers).as_deref(), Some("from-header"));

        headers.insert("cookie", HeaderValue::from_static("accessToken=from-cookie"));
        assert_eq!(extract_token(&headers).as_deref(), Some("from-cookie"));
    }

    #[test]
    fn test_malformed_authorization_header_ignored() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic dXNlcjpwYXNz"));
        assert_eq!(extract_token(&headers), None);

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer "));
        assert_eq!(extract_token(&headers), None);
    }
}
