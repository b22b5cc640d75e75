//! HMAC-SHA256 signing for command tokens.
//!
//! A command token binds a command identifier to the process-wide secret
//! key:
//!
//! ```text
//! $Sys.command.<n>.<hex(HMAC-SHA256(key, "$Sys.command.<n>"))>
//! ```
//!
//! [`sign`] is the general form (`command + "." + digest`) and accepts any
//! command string. Only commands shaped like [`command_id`] produce output
//! that the token extractor will later recognise; [`sign_command`] is the
//! shortcut for that case.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::fmt;

type HmacSha256 = Hmac<Sha256>;

/// Fixed marker every command identifier starts with.
pub const COMMAND_PREFIX: &str = "$Sys.command.";

/// Shared secret used to sign and verify command tokens.
///
/// Constructed only from non-empty input: an empty key is treated the same
/// as no key at all, which switches the gate to unauthenticated mode.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretKey(Vec<u8>);

impl SecretKey {
    /// Wrap raw key bytes. Returns `None` for an empty slice.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Option<Self> {
        let bytes = bytes.into();
        if bytes.is_empty() {
            None
        } else {
            Some(Self(bytes))
        }
    }

    /// Wrap a textual key (UTF-8 bytes). Returns `None` for `""`.
    pub fn from_text(text: &str) -> Option<Self> {
        Self::from_bytes(text.as_bytes())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretKey(<{} bytes redacted>)", self.0.len())
    }
}

/// Compute the lowercase hex HMAC-SHA256 of `message` (always 64 chars).
pub fn compute_hmac(key: &SecretKey, message: &str) -> String {
    let mut mac = HmacSha256::new_from_slice(key.as_bytes())
        .expect("HMAC-SHA256 accepts keys of any length");
    mac.update(message.as_bytes());
    hex_encode(&mac.finalize().into_bytes())
}

/// Sign `command`, returning `command + "." + hex_digest`.
pub fn sign(command: &str, key: &SecretKey) -> String {
    format!("{}.{}", command, compute_hmac(key, command))
}

/// Format the command identifier for command number `n`.
pub fn command_id(n: u64) -> String {
    format!("{COMMAND_PREFIX}{n}")
}

/// Produce a complete `$Sys.command.<n>.<digest>` token.
pub fn sign_command(n: u64, key: &SecretKey) -> String {
    sign(&command_id(n), key)
}

/// Hex-encode a byte slice.
fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}
