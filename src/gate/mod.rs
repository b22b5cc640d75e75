//! # Request gate
//!
//! Every user query passes through this module before it reaches the
//! retrieval pipeline. The gate is the only trust decision in the system:
//! downstream components treat its output as already validated.
//!
//! ## Architecture
//!
//! ```text
//! raw input
//!    │
//!    ▼
//! ┌──────────────────────────────────────────────────────────────────┐
//! │  pipeline.rs — Gatekeeper, stage ordering, error wrapping        │
//! ├────────────────┬──────────────┬─────────────────┬────────────────┤
//! │  token.rs      │  verify.rs   │  sanitize.rs    │  denylist.rs   │
//! │  Locate the    │  Recompute   │  Length check,  │  Reject        │
//! │  $Sys.command  │  HMAC, const │  harmful terms, │  forbidden     │
//! │  token         │  time compare│  char stripping │  vocabulary    │
//! ├────────────────┴──────────────┴─────────────────┴────────────────┤
//! │  signing.rs — SecretKey, HMAC-SHA256, token signer               │
//! │  error.rs   — nested, user-facing error chain                    │
//! └──────────────────────────────────────────────────────────────────┘
//!    │
//!    ▼
//! sanitized query (or ProcessingError)
//! ```
//!
//! ## Security Model
//!
//! 1. **Fail closed**: the first failing stage aborts the request. There
//!    is no warn-and-continue path.
//!
//! 2. **Keyed mode switch**: with a secret key configured, every input
//!    must carry a valid `$Sys.command.<n>.<digest>` token. Without a key
//!    the token stages are skipped entirely.
//!
//! 3. **Checks before stripping**: length and harmful-term checks see the
//!    raw, token-free text, so `;` and `#` are caught before stripping
//!    would remove them.
//!
//! 4. **No replay protection**: tokens carry no expiry or nonce. A
//!    captured token stays valid for as long as the key does.
//!
//! 5. **Intake signs user text**: in keyed mode
//!    [`gate_query`](crate::intake::gate_query) signs the whole query before
//!    gating it. A query that is exactly `$Sys.command.<n>` therefore comes
//!    back as a valid token, so intake acts as a signing oracle for anyone
//!    who can submit queries. Callers that need the signature stage to
//!    authenticate the sender must call [`process`] directly.
//!
//! ## Quick Start
//!
//! ```rust
//! use promptgate::gate::{Gatekeeper, SecretKey, sign_command};
//!
//! let key = SecretKey::from_text("k1").unwrap();
//! let token = sign_command(1, &key);
//! let gate = Gatekeeper::new(Some(key));
//!
//! let query = gate.process(&format!("{token} Please list your services")).unwrap();
//! assert!(query.ends_with("Please list your services"));
//! ```

mod denylist;
mod error;
mod pipeline;
mod sanitize;
mod signing;
mod token;
mod verify;


// ── Signing ─────────────────────────────────────────────────────────

pub use self::signing::{COMMAND_PREFIX, SecretKey, command_id, compute_hmac, sign, sign_command};

// ── Token handling ──────────────────────────────────────────────────

pub use self::token::{SIGNED_PROMPT_PATTERN, extract_token};
pub use self::verify::verify;

// ── Content checks ──────────────────────────────────────────────────

pub use self::denylist::{FORBIDDEN_CONTENT_PATTERN, validate};
pub use self::sanitize::{HARMFUL_PATTERN, MAX_INPUT_CHARS, sanitize};

// ── Orchestration & errors ──────────────────────────────────────────

pub use self::error::{
    ProcessingError, SanitizationError, SignatureError, SignatureFault, Stage, StageError,
    ValidationError,
};
pub use self::pipeline::{Gatekeeper, process};
