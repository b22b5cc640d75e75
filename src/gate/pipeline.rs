//! Stage orchestration for the request gate.
//!
//! # Stages
//!
//! 1. **Signature** (only when a key is configured): extract the token,
//!    then verify it.
//! 2. **Sanitization**: length check, harmful terms, character stripping.
//!    The token is preserved only if stage 1 found and verified one.
//! 3. **Validation**: denylist check on the sanitized output.
//!
//! The first failing stage ends the request. Its error is wrapped in a
//! [`StageError`] and then a [`ProcessingError`]. The rejection is logged
//! with its stage only; rendering the message is left to the caller.

use tracing::{debug, warn};

use super::denylist::validate;
use super::error::{ProcessingError, StageError};
use super::sanitize::sanitize;
use super::signing::SecretKey;
use super::token::extract_token;
use super::verify::verify;

/// Run `input` through every stage of the gate.
///
/// With `key == None` the signature stage is skipped and no token is
/// preserved.
pub fn process(input: &str, key: Option<&SecretKey>) -> Result<String, ProcessingError> {
    run_stages(input, key)
        .inspect(|sanitized| debug!("Input accepted ({} chars)", sanitized.chars().count()))
        .inspect_err(|e| warn!(stage = %e.stage(), "Input rejected"))
        .map_err(ProcessingError::from)
}

fn run_stages(input: &str, key: Option<&SecretKey>) -> Result<String, StageError> {
    let has_token = match key {
        Some(key) => {
            let token = extract_token(input)?;
            verify(token, key)?;
            true
        }
        None => false,
    };

    let sanitized = sanitize(input, has_token)?;
    validate(&sanitized)?;
    Ok(sanitized)
}

/// Request gate bound to an optional secret key.
///
/// Holds no mutable state, so one instance can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct Gatekeeper {
    key: Option<SecretKey>,
}

impl Gatekeeper {
    pub fn new(key: Option<SecretKey>) -> Self {
        Self { key }
    }

    /// A gate that skips the signature stage.
    pub fn unauthenticated() -> Self {
        Self::default()
    }

    pub fn key(&self) -> Option<&SecretKey> {
        self.key.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.key.is_some()
    }

    pub fn process(&self, input: &str) -> Result<String, ProcessingError> {
        process(input, self.key())
    }
}
