//! Signature verification for extracted command tokens.
//!
//! The token is split into three segments: the `$Sys.command` marker, the
//! numeric identifier, and the digest. Only the first dot after the marker
//! delimits the digest; any later dots stay inside the digest segment,
//! which then fails the comparison.

use subtle::ConstantTimeEq;

use super::error::{SignatureError, SignatureFault};
use super::signing::{COMMAND_PREFIX, SecretKey, compute_hmac};

/// Verify `token` against `key`.
///
/// Returns `Ok(true)` only when the digest segment equals
/// HMAC-SHA256(key, `$Sys.command.<n>`) byte for byte. Any structural
/// problem or mismatch is reported as [`SignatureError::InvalidSignature`].
pub fn verify(token: &str, key: &SecretKey) -> Result<bool, SignatureError> {
    let (command_id, digest) = split_token(token).map_err(SignatureError::InvalidSignature)?;
    let expected = compute_hmac(key, command_id);

    // Lengths are public; `ct_eq` returns false on a length mismatch.
    if bool::from(expected.as_bytes().ct_eq(digest.as_bytes())) {
        Ok(true)
    } else {
        Err(SignatureError::InvalidSignature(SignatureFault::Mismatch))
    }
}

/// Split a token into its command identifier (`$Sys.command.<n>`) and
/// digest segment.
fn split_token(token: &str) -> Result<(&str, &str), SignatureFault> {
    let rest = token
        .strip_prefix(COMMAND_PREFIX)
        .ok_or(SignatureFault::Malformed("token does not start with $Sys.command"))?;

    let mut parts = rest.splitn(2, '.');
    let id = parts.next().unwrap_or_default();
    let digest = parts
        .next()
        .ok_or(SignatureFault::Malformed("token has no digest segment"))?;

    if id.is_empty() || !id.bytes().all(|b| b.is_ascii_digit()) {
        return Err(SignatureFault::Malformed("command identifier is not numeric"));
    }

    let command_id = &token[..COMMAND_PREFIX.len() + id.len()];
    Ok((command_id, digest))
}
