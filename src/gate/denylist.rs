//! Final denylist check on sanitized text.

use once_cell::sync::Lazy;
use regex::Regex;

use super::error::ValidationError;

/// Forbidden vocabulary, matched case-insensitively on word boundaries.
pub const FORBIDDEN_CONTENT_PATTERN: &str =
    r"(?i)\b(delete|drop|shutdown|system|access admin data|malicious code)\b";

static FORBIDDEN_CONTENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(FORBIDDEN_CONTENT_PATTERN).expect("forbidden content pattern is valid")
});

/// Assert that `input` contains no denylisted term.
///
/// Always returns `Ok(true)` on success; rejection is only ever expressed
/// as [`ValidationError::ForbiddenContent`].
pub fn validate(input: &str) -> Result<bool, ValidationError> {
    match FORBIDDEN_CONTENT.find(input) {
        Some(m) => Err(ValidationError::ForbiddenContent {
            term: m.as_str().to_string(),
        }),
        None => Ok(true),
    }
}
