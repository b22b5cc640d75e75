//! Error taxonomy for the request gate.
//!
//! Every message here is shown verbatim to the end user, so the `Display`
//! output is part of the contract. Layers nest as `"<Stage> Error: " + inner`
//! and the outermost layer adds `"Processing Error: "`, e.g.
//!
//! ```text
//! Processing Error: Signature Error: Signed Prompt Error: Input lacks a valid signed prompt.
//! ```
//!
//! None of these messages contain user input or key material.

use std::fmt;

/// Why a signed token was rejected by the verifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignatureFault {
    /// Token parsed, but the recomputed digest differs.
    Mismatch,
    /// Token does not have the `$Sys.command.<n>.<digest>` structure.
    Malformed(&'static str),
}

impl fmt::Display for SignatureFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mismatch => write!(f, "Signed Prompt Error: Invalid cryptographic signature."),
            Self::Malformed(reason) => write!(f, "{reason}"),
        }
    }
}

/// Failures of the token extraction and verification stage.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SignatureError {
    #[error("Signed Prompt Error: Input lacks a valid signed prompt.")]
    SignedPromptMissing,

    #[error("Signature Validation Error: {0}")]
    InvalidSignature(SignatureFault),
}

/// Failures of the sanitization stage.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SanitizationError {
    /// The token-free input is longer than the limit (counted in chars).
    #[error("Length Error: Input length exceeds the allowed limit. Please shorten your query.")]
    LengthExceeded { length: usize, limit: usize },

    /// A harmful term was found. `term` is the matched text, kept for
    /// logging and never rendered to the user.
    #[error("Forbidden Content Error: Input contains harmful patterns or forbidden content.")]
    ForbiddenPattern { term: String },

    /// Token preservation was requested but no token could be located.
    #[error(transparent)]
    Signature(#[from] SignatureError),
}

/// Failures of the denylist stage.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error(
        "Validation Error: Input contains forbidden content. Forbidden terms were detected in your query."
    )]
    ForbiddenContent { term: String },
}

/// Pipeline stage identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Signature,
    Sanitization,
    Validation,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Signature => write!(f, "signature"),
            Self::Sanitization => write!(f, "sanitization"),
            Self::Validation => write!(f, "validation"),
        }
    }
}

/// A stage failure tagged with the stage that produced it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StageError {
    #[error("Signature Error: {0}")]
    Signature(#[from] SignatureError),

    #[error("Sanitization Error: {0}")]
    Sanitization(#[from] SanitizationError),

    #[error("Validation Error: {0}")]
    Validation(#[from] ValidationError),
}

impl StageError {
    pub fn stage(&self) -> Stage {
        match self {
            Self::Signature(_) => Stage::Signature,
            Self::Sanitization(_) => Stage::Sanitization,
            Self::Validation(_) => Stage::Validation,
        }
    }
}

/// Top-level error returned by [`process`](super::process).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Processing Error: {0}")]
pub struct ProcessingError(#[from] StageError);

impl ProcessingError {
    /// The stage that rejected the input.
    pub fn stage(&self) -> Stage {
        self.0.stage()
    }

    pub fn stage_error(&self) -> &StageError {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn missing_prompt_chain() {
        let err = ProcessingError::from(StageError::from(SignatureError::SignedPromptMissing));
        assert_eq!(
            err.to_string(),
            "Processing Error: Signature Error: Signed Prompt Error: Input lacks a valid signed prompt."
        );
        assert_eq!(err.stage(), Stage::Signature);
    }

    #[test]
    fn mismatch_chain() {
        let err = ProcessingError::from(StageError::from(SignatureError::InvalidSignature(
            SignatureFault::Mismatch,
        )));
        assert_eq!(
            err.to_string(),
            "Processing Error: Signature Error: Signature Validation Error: \
             Signed Prompt Error: Invalid cryptographic signature."
        );
    }

    #[test]
    fn sanitization_chain_hides_term() {
        let err = ProcessingError::from(StageError::from(SanitizationError::ForbiddenPattern {
            term: "bypass".to_string(),
        }));
        let msg = err.to_string();
        assert!(msg.starts_with("Processing Error: Sanitization Error: Forbidden Content Error"));
        assert!(!msg.contains("bypass"));
    }

    #[test]
    fn validation_chain_keeps_both_labels() {
        let err = ProcessingError::from(StageError::from(ValidationError::ForbiddenContent {
            term: "drop".to_string(),
        }));
        assert_eq!(
            err.to_string(),
            "Processing Error: Validation Error: Validation Error: Input contains forbidden \
             content. Forbidden terms were detected in your query."
        );
        assert_eq!(err.stage(), Stage::Validation);
    }

    #[test]
    fn source_chain_reaches_leaf() {
        let err = ProcessingError::from(StageError::from(SanitizationError::LengthExceeded {
            length: 501,
            limit: 500,
        }));
        let stage = err.source().unwrap();
        let leaf = stage.source().unwrap();
        assert!(leaf.to_string().starts_with("Length Error"));
    }
}
