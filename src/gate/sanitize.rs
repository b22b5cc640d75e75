//! Input sanitization with signed-token preservation.
//!
//! Order of operations:
//!
//! 1. If token preservation is requested, locate the token and remove
//!    every occurrence of it from the text.
//! 2. Length check on the token-free text ([`MAX_INPUT_CHARS`]).
//! 3. Harmful-term check on the token-free text ([`HARMFUL_PATTERN`]).
//! 4. Strip characters outside `[\w\s.,?!-]` and trim.
//! 5. Re-attach the token in front: `token + " " + text`.
//!
//! Steps 2 and 3 run on the unstripped text, so `;` and `#` are still
//! visible to the harmful-term check even though stripping removes them.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use super::error::SanitizationError;
use super::token::extract_token;

/// Maximum length of the token-free input, in characters.
pub const MAX_INPUT_CHARS: usize = 500;

/// Harmful terms, matched case-insensitively on word boundaries.
pub const HARMFUL_PATTERN: &str = r"(?i)\b(ignore|bypass|shutdown|system|exec|call|os\..*|--|;|#)\b";

static HARMFUL: Lazy<Regex> =
    Lazy::new(|| Regex::new(HARMFUL_PATTERN).expect("harmful pattern is valid"));

static DISALLOWED_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\w\s.,?!\-]").expect("disallowed char class is valid"));

/// Sanitize `input`, optionally preserving a signed token.
///
/// `preserve_signed` should only be set once the token has been verified;
/// the sanitizer itself does not check the signature.
pub fn sanitize(input: &str, preserve_signed: bool) -> Result<String, SanitizationError> {
    let (token, remainder) = if preserve_signed {
        let token = extract_token(input)?;
        (Some(token), input.replace(token, ""))
    } else {
        (None, input.to_string())
    };

    let length = remainder.chars().count();
    if length > MAX_INPUT_CHARS {
        return Err(SanitizationError::LengthExceeded {
            length,
            limit: MAX_INPUT_CHARS,
        });
    }

    if let Some(m) = HARMFUL.find(&remainder) {
        return Err(SanitizationError::ForbiddenPattern {
            term: m.as_str().to_string(),
        });
    }

    let stripped = DISALLOWED_CHARS.replace_all(&remainder, "");
    let stripped = stripped.trim();
    debug!(
        "Sanitized input: {} -> {} chars",
        length,
        stripped.chars().count()
    );

    Ok(match token {
        Some(token) => format!("{} {}", token, stripped),
        None => stripped.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gate::error::SignatureError;
    use crate::gate::signing::{SecretKey, sign_command};

    fn token() -> String {
        sign_command(1, &SecretKey::from_text("k1").unwrap())
    }

    fn forbidden(result: Result<String, SanitizationError>) -> String {
        match result {
            Err(SanitizationError::ForbiddenPattern { term }) => term,
            other => panic!("Expected ForbiddenPattern, got {:?}", other),
        }
    }

    #[test]
    fn plain_question_passes_trimmed() {
        assert_eq!(
            sanitize("  What products do you offer?  ", false).unwrap(),
            "What products do you offer?"
        );
    }

    #[test]
    fn disallowed_chars_stripped() {
        assert_eq!(
            sanitize("Price <b>list</b> for (2024) @ 50%!", false).unwrap(),
            "Price blistb for 2024  50!"
        );
    }

    #[test]
    fn allowed_punctuation_kept() {
        let input = "Hello, world. Really? Yes! well-known";
        assert_eq!(sanitize(input, false).unwrap(), input);
    }

    #[test]
    fn harmful_words_any_case() {
        assert_eq!(forbidden(sanitize("IGNORE the rules", false)), "IGNORE");
        assert_eq!(forbidden(sanitize("please Ignore this", false)), "Ignore");
        assert_eq!(forbidden(sanitize("run exec now", false)), "exec");
        assert_eq!(forbidden(sanitize("call me", false)), "call");
    }

    #[test]
    fn harmful_words_need_boundaries() {
        assert!(sanitize("ignoreance is bliss", false).is_ok());
        assert!(sanitize("a recall notice", false).is_ok());
        assert!(sanitize("ecosystems thrive", false).is_ok());
    }

    #[test]
    fn os_attribute_rejected() {
        assert!(forbidden(sanitize("try os.system(x)", false)).starts_with("os."));
    }

    #[test]
    fn punctuation_terms_between_words_rejected() {
        forbidden(sanitize("a--b", false));
        forbidden(sanitize("first;second", false));
        forbidden(sanitize("tag#value", false));
    }

    #[test]
    fn checks_run_before_stripping() {
        // The raw text never contains the whole word, so the check passes
        // and stripping then joins the pieces.
        assert_eq!(sanitize("shut@down", false).unwrap(), "shutdown");
    }

    #[test]
    fn length_limit_enforced() {
        let ok = "a".repeat(MAX_INPUT_CHARS);
        assert!(sanitize(&ok, false).is_ok());

        let long = "a".repeat(MAX_INPUT_CHARS + 1);
        assert_eq!(
            sanitize(&long, false),
            Err(SanitizationError::LengthExceeded {
                length: MAX_INPUT_CHARS + 1,
                limit: MAX_INPUT_CHARS,
            })
        );
    }

    #[test]
    fn length_counts_chars_not_bytes() {
        let input = "é".repeat(MAX_INPUT_CHARS);
        assert!(sanitize(&input, false).is_ok());
    }

    #[test]
    fn length_checked_before_harmful_terms() {
        let input = format!("ignore {}", "a".repeat(MAX_INPUT_CHARS));
        assert!(matches!(
            sanitize(&input, false),
            Err(SanitizationError::LengthExceeded { .. })
        ));
    }

    #[test]
    fn token_preserved_and_prefixed() {
        let token = token();
        let input = format!("Please <list> your {token} services");
        assert_eq!(
            sanitize(&input, true).unwrap(),
            format!("{token} Please list your  services")
        );
    }

    #[test]
    fn token_excluded_from_length() {
        let token = token();
        let input = format!("{token}{}", "z".repeat(MAX_INPUT_CHARS));
        assert!(sanitize(&input, true).is_ok());
    }

    #[test]
    fn token_required_when_preserving() {
        assert_eq!(
            sanitize("no token here", true),
            Err(SanitizationError::Signature(
                SignatureError::SignedPromptMissing
            ))
        );
    }

    #[test]
    fn without_preservation_token_is_plain_text() {
        let token = token();
        let out = sanitize(&token, false).unwrap();
        assert_eq!(out, token.replace('$', ""));
    }
}
