/**
 * Auth Cookies
 *
 * Both tokens are also delivered as `HttpOnly` cookies named `accessToken`
 * and `refreshToken`. When `cookie_secure` is set they carry
 * `Secure; SameSite=None` so a separately hosted frontend can send them;
 * otherwise `SameSite=Lax` for local development over plain HTTP.
 */

use std::time::Duration;

use axum::http::{
    header::{COOKIE, SET_COOKIE},
    HeaderMap, HeaderName,
};
use axum::response::AppendHeaders;

use crate::backend::auth::sessions::{TokenKeys, TokenPair};

pub const ACCESS_TOKEN_COOKIE: &str = "accessToken";
pub const REFRESH_TOKEN_COOKIE: &str = "refreshToken";

/// `Set-Cookie` headers for both auth cookies
pub type SessionCookies = AppendHeaders<[(HeaderName, String); 2]>;

/// Cookies carrying a freshly issued token pair
pub fn session_cookies(pair: &TokenPair, keys: &TokenKeys, secure: bool) -> SessionCookies {
    AppendHeaders([
        (
            SET_COOKIE,
            token_cookie(ACCESS_TOKEN_COOKIE, &pair.access_token, keys.access_ttl(), secure),
        ),
        (
            SET_COOKIE,
            token_cookie(REFRESH_TOKEN_COOKIE, &pair.refresh_token, keys.refresh_ttl(), secure),
        ),
    ])
}

/// Cookies that remove both tokens
pub fn cleared_session_cookies(secure: bool) -> SessionCookies {
    AppendHeaders([
        (SET_COOKIE, clear_cookie(ACCESS_TOKEN_COOKIE, secure)),
        (SET_COOKIE, clear_cookie(REFRESH_TOKEN_COOKIE, secure)),
    ])
}

/// `Set-Cookie` value for a token cookie
pub fn token_cookie(name: &str, value: &str, max_age: Duration, secure: bool) -> String {
    format!(
        "{name}={value}; HttpOnly; Path=/; Max-Age={}; {}",
        max_age.as_secs(),
        same_site(secure)
    )
}

/// `Set-Cookie` value that removes a cookie
pub fn clear_cookie(name: &str, secure: bool) -> String {
    format!("{name}=; HttpOnly; Path=/; Max-Age=0; {}", same_site(secure))
}

fn same_site(secure: bool) -> &'static str {
    if secure {
        "Secure; SameSite=None"
    } else {
        "SameSite=Lax"
    }
}

/// Read a cookie from the request's `Cookie` headers
pub fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|h| h.to_str().ok())
        .flat_map(|h| h.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, value)| *key == name && !value.is_empty())
        .map(|(_, value)| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_token_cookie_attributes() {
        let cookie = token_cookie(ACCESS_TOKEN_COOKIE, "abc", Duration::from_secs(60), true);
        assert_eq!(
            cookie,
            "accessToken=abc; HttpOnly; Path=/; Max-Age=60; Secure; SameSite=None"
        );

        let cookie = clear_cookie(REFRESH_TOKEN_COOKIE, false);
        assert_eq!(cookie, "refreshToken=; HttpOnly; Path=/; Max-Age=0; SameSite=Lax");
    }

    #[test]
    fn test_cookie_value_lookup() {
        let mut headers = HeaderMap::new();
        headers.append(COOKIE, HeaderValue::from_static("theme=dark; accessToken=tok123"));
        headers.append(COOKIE, HeaderValue::from_static("refreshToken=ref456"));

        assert_eq!(cookie_value(&headers, ACCESS_TOKEN_COOKIE).as_deref(), Some("tok123"));
        assert_eq!(cookie_value(&headers, REFRESH_TOKEN_COOKIE).as_deref(), Some("ref456"));
        assert_eq!(cookie_value(&headers, "session"), None);
    }

    #[test]
    fn test_empty_cookie_is_absent() {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static("accessToken="));
        assert_eq!(cookie_value(&headers, ACCESS_TOKEN_COOKIE), None);
    }
}
