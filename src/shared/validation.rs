//! Input validation helpers
//!
//! Small, pure checks shared by the request handlers. Every helper returns a
//! [`SharedError`] carrying the client-facing message.

use uuid::Uuid;

use crate::shared::error::SharedError;

/// Shortest accepted username
pub const MIN_USERNAME_LEN: usize = 2;

/// Parse a path or query identifier
///
/// `entity` names the resource for the error message (`Invalid video ID`).
pub fn parse_id(raw: &str, entity: &str) -> Result<Uuid, SharedError> {
    Uuid::parse_str(raw.trim()).map_err(|_| SharedError::invalid_id(entity))
}

/// Return the trimmed value if it is present and not blank
pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Require a non-blank field, trimming it
pub fn required<'a>(
    value: Option<&'a str>,
    field: &str,
    message: &str,
) -> Result<&'a str, SharedError> {
    non_blank(value).ok_or_else(|| SharedError::validation(field, message))
}

/// Usernames need at least two characters once trimmed
pub fn is_valid_username(username: &str) -> bool {
    username.trim().chars().count() >= MIN_USERNAME_LEN
}

/// Basic email shape check: something on both sides of a single '@'
pub fn is_valid_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@'),
        None => false,
    }
}

/// Escape `%`, `_` and `\` so user input matches literally inside `ILIKE`
pub fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Substring pattern for a case-insensitive title search
pub fn contains_pattern(query: Option<&str>) -> String {
    format!("%{}%", escape_like(query.map(str::trim).unwrap_or_default()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_id_accepts_uuid_and_rejects_garbage() {
        let id = Uuid::new_v4();
        assert_eq!(parse_id(&id.to_string(), "video").unwrap(), id);

        let err = parse_id("65f0c0ffee", "video").unwrap_err();
        assert_eq!(err.to_string(), "Invalid video ID");
    }

    #[test]
    fn required_trims_and_rejects_blank() {
        assert_eq!(required(Some("  hi "), "content", "msg").unwrap(), "hi");
        assert!(required(Some("   "), "content", "msg").is_err());
        assert!(required(None, "content", "msg").is_err());
    }

    #[test]
    fn username_rules() {
        assert!(is_valid_username("chai_aur.code"));
        assert!(is_valid_username("ab"));
        assert!(is_valid_username("al-b"));
        assert!(is_valid_username(&"x".repeat(64)));
        assert!(!is_valid_username("a"));
        assert!(!is_valid_username("  a  "));
    }

    #[test]
    fn email_rules() {
        assert!(is_valid_email("user@example.com"));
        assert!(!is_valid_email("user.example.com"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("user@"));
        assert!(!is_valid_email("a@b@c"));
    }

    #[test]
    fn like_patterns_escape_wildcards() {
        assert_eq!(escape_like("100%_off\\"), "100\\%\\_off\\\\");
        assert_eq!(contains_pattern(Some(" rust ")), "%rust%");
        assert_eq!(contains_pattern(None), "%%");
    }
}
