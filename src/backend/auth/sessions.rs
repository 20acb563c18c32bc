/**
 * Session Management and JWT Tokens
 *
 * Access and refresh tokens are HS256 JWTs signed with separate secrets.
 * The access token carries enough identity for the auth middleware; the
 * refresh token only carries the user id and a unique `jti`, and the
 * latest one issued is stored on the user row so it can be rotated and
 * revoked.
 */

use std::time::Duration;

use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::AppConfig;

/// Access token claims
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessClaims {
    /// User ID
    pub sub: String,
    pub email: String,
    pub username: String,
    pub full_name: String,
    /// Expiration time (Unix timestamp)
    pub exp: u64,
    /// Issued at time (Unix timestamp)
    pub iat: u64,
}

/// Refresh token claims
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshClaims {
    /// User ID
    pub sub: String,
    /// Unique token id, so two tokens issued in the same second still differ
    pub jti: String,
    pub exp: u64,
    pub iat: u64,
}

/// Identity placed into an access token
#[derive(Debug, Clone, Copy)]
pub struct TokenSubject<'a> {
    pub user_id: Uuid,
    pub email: &'a str,
    pub username: &'a str,
    pub full_name: &'a str,
}

/// Freshly issued access/refresh pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Signing keys and lifetimes for both token kinds
#[derive(Clone)]
pub struct TokenKeys {
    access_encoding: EncodingKey,
    access_decoding: DecodingKey,
    access_ttl: Duration,
    refresh_encoding: EncodingKey,
    refresh_decoding: DecodingKey,
    refresh_ttl: Duration,
}

impl std::fmt::Debug for TokenKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenKeys")
            .field("access_ttl", &self.access_ttl)
            .field("refresh_ttl", &self.refresh_ttl)
            .finish_non_exhaustive()
    }
}

fn now_secs() -> u64 {
    Utc::now().timestamp().max(0) as u64
}

impl TokenKeys {
    pub fn new(
        access_secret: &str,
        access_ttl: Duration,
        refresh_secret: &str,
        refresh_ttl: Duration,
    ) -> Self {
        Self {
            access_encoding: EncodingKey::from_secret(access_secret.as_bytes()),
            access_decoding: DecodingKey::from_secret(access_secret.as_bytes()),
            access_ttl,
            refresh_encoding: EncodingKey::from_secret(refresh_secret.as_bytes()),
            refresh_decoding: DecodingKey::from_secret(refresh_secret.as_bytes()),
            refresh_ttl,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            &config.access_token_secret,
            config.access_token_expiry,
            &config.refresh_token_secret,
            config.refresh_token_expiry,
        )
    }

    pub fn access_ttl(&self) -> Duration {
        self.access_ttl
    }

    pub fn refresh_ttl(&self) -> Duration {
        self.refresh_ttl
    }

    /// Create an access token for a user
    pub fn create_access_token(
        &self,
        subject: TokenSubject<'_>,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let now = now_secs();
        let claims = AccessClaims {
            sub: subject.user_id.to_string(),
            email: subject.email.to_string(),
            username: subject.username.to_string(),
            full_name: subject.full_name.to_string(),
            exp: now.saturating_add(self.access_ttl.as_secs()),
            iat: now,
        };
        encode(&Header::default(), &claims, &self.access_encoding)
    }

    /// Create a refresh token for a user
    pub fn create_refresh_token(&self, user_id: Uuid) -> Result<String, jsonwebtoken::errors::Error> {
        let now = now_secs();
        let claims = RefreshClaims {
            sub: user_id.to_string(),
            jti: Uuid::new_v4().to_string(),
            exp: now.saturating_add(self.refresh_ttl.as_secs()),
            iat: now,
        };
        encode(&Header::default(), &claims, &self.refresh_encoding)
    }

    /// Issue both tokens
    pub fn issue_pair(&self, subject: TokenSubject<'_>) -> Result<TokenPair, jsonwebtoken::errors::Error> {
        Ok(TokenPair {
            access_token: self.create_access_token(subject)?,
            refresh_token: self.create_refresh_token(subject.user_id)?,
        })
    }

    /// Verify and decode an access token
    pub fn verify_access_token(&self, token: &str) -> Result<AccessClaims, jsonwebtoken::errors::Error> {
        let data = decode::<AccessClaims>(token, &self.access_decoding, &Validation::default())?;
        Ok(data.claims)
    }

    /// Verify and decode a refresh token
    pub fn verify_refresh_token(&self, token: &str) -> Result<RefreshClaims, jsonwebtoken::errors::Error> {
        let data = decode::<RefreshClaims>(token, &self.refresh_decoding, &Validation::default())?;
        Ok(data.claims)
    }
}

/// Parse the `sub` claim back into a user id
pub fn subject_id(sub: &str) -> Option<Uuid> {
    Uuid::parse_str(sub).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys() -> TokenKeys {
        TokenKeys::new(
            "access-secret",
            Duration::from_secs(900),
            "refresh-secret",
            Duration::from_secs(3600),
        )
    }

    fn subject(user_id: Uuid) -> TokenSubject<'static> {
        TokenSubject {
            user_id,
            email: "test@example.com",
            username: "tester",
            full_name: "Test User",
        }
    }

    #[test]
    fn test_access_token_round_trip() {
        let keys = keys();
        let user_id = Uuid::new_v4();
        let token = keys.create_access_token(subject(user_id)).unwrap();

        let claims = keys.verify_access_token(&token).unwrap();
        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.username, "tester");
        assert_eq!(claims.exp - claims.iat, 900);
        assert_eq!(subject_id(&claims.sub), Some(user_id));
    }

    #[test]
    fn test_tokens_are_not_interchangeable() {
        let keys = keys();
        let user_id = Uuid::new_v4();
        let pair = keys.issue_pair(subject(user_id)).unwrap();

        assert!(keys.verify_access_token(&pair.refresh_token).is_err());
        assert!(keys.verify_refresh_token(&pair.access_token).is_err());
        assert_eq!(
            keys.verify_refresh_token(&pair.refresh_token).unwrap().sub,
            user_id.to_string()
        );
    }

    #[test]
    fn test_refresh_tokens_are_unique() {
        let keys = keys();
        let user_id = Uuid::new_v4();
        let first = keys.create_refresh_token(user_id).unwrap();
        let second = keys.create_refresh_token(user_id).unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_huge_ttl_saturates_expiry() {
        let keys = TokenKeys::new(
            "access-secret",
            Duration::MAX,
            "refresh-secret",
            Duration::MAX,
        );
        assert!(keys.create_access_token(subject(Uuid::new_v4())).is_ok());
        assert!(keys.create_refresh_token(Uuid::new_v4()).is_ok());
    }

    #[test]
    fn test_verify_invalid_token() {
        assert!(keys().verify_access_token("invalid.token.here").is_err());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = keys().create_access_token(subject(Uuid::new_v4())).unwrap();
        let other = TokenKeys::new(
            "another-secret",
            Duration::from_secs(900),
            "refresh-secret",
            Duration::from_secs(3600),
        );
        assert!(other.verify_access_token(&token).is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        let keys = keys();
        let claims = AccessClaims {
            sub: Uuid::new_v4().to_string(),
            email: "old@example.com".to_string(),
            username: "old".to_string(),
            full_name: "Old".to_string(),
            exp: now_secs() - 3600,
            iat: now_secs() - 7200,
        };
        let token = encode(&Header::default(), &claims, &keys.access_encoding).unwrap();
        assert!(keys.verify_access_token(&token).is_err());
    }
}
