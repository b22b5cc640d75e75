//! Locate a signed command token inside free text.

use once_cell::sync::Lazy;
use regex::Regex;

use super::error::SignatureError;

/// Structural pattern of a signed command token.
///
/// The identifier accepts ASCII digits only; the digest accepts hex in
/// either case (case is enforced later, by the verifier).
pub const SIGNED_PROMPT_PATTERN: &str = r"\$Sys\.command\.[0-9]+\.[a-fA-F0-9]{64}";

static SIGNED_PROMPT: Lazy<Regex> =
    Lazy::new(|| Regex::new(SIGNED_PROMPT_PATTERN).expect("signed prompt pattern is valid"));

/// Return the leftmost token in `input`, verbatim.
///
/// Surrounding text is ignored. Only the first match is considered.
pub fn extract_token(input: &str) -> Result<&str, SignatureError> {
    SIGNED_PROMPT
        .find(input)
        .map(|m| m.as_str())
        .ok_or(SignatureError::SignedPromptMissing)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DIGEST: &str = "0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef";

    #[test]
    fn finds_token_in_surrounding_text() {
        let token = format!("$Sys.command.7.{DIGEST}");
        let input = format!("before {token} after");
        assert_eq!(extract_token(&input).unwrap(), token);
    }

    #[test]
    fn leftmost_match_wins() {
        let first = format!("$Sys.command.1.{DIGEST}");
        let second = format!("$Sys.command.2.{DIGEST}");
        let input = format!("{first} and {second}");
        assert_eq!(extract_token(&input).unwrap(), first);
    }

    #[test]
    fn uppercase_hex_is_matched() {
        let token = format!("$Sys.command.3.{}", DIGEST.to_uppercase());
        assert_eq!(extract_token(&token).unwrap(), token);
    }

    #[test]
    fn short_digest_not_matched() {
        let input = format!("$Sys.command.1.{}", &DIGEST[..63]);
        assert_eq!(
            extract_token(&input),
            Err(SignatureError::SignedPromptMissing)
        );
    }

    #[test]
    fn missing_identifier_not_matched() {
        let input = format!("$Sys.command..{DIGEST}");
        assert!(extract_token(&input).is_err());
    }

    #[test]
    fn plain_text_has_no_token() {
        assert_eq!(
            extract_token("What products do you offer?"),
            Err(SignatureError::SignedPromptMissing)
        );
    }

    #[test]
    fn longer_digest_yields_prefix() {
        // A 65th hex char is outside the match; the verifier sees 64.
        let input = format!("$Sys.command.1.{DIGEST}f");
        assert_eq!(
            extract_token(&input).unwrap(),
            format!("$Sys.command.1.{DIGEST}")
        );
    }
}
