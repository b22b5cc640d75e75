//! Query intake: the boundary between the chat front end and the gate.
//!
//! When a key is configured the whole query is signed before it enters the
//! gate, exactly as the upstream chat workflow does. Note that this signs
//! the query text itself, not a `$Sys.command.<n>` identifier, so the query
//! is only accepted if it already carries a valid command token.
//!
//! A bare `$Sys.command.<n>` query is the exception: signing it yields a
//! valid token, which the accepted outcome then echoes back. See the
//! security model in [`crate::gate`].

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::gate::{self, SecretKey};

/// Rendering hint for the downstream answer formatter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryKind {
    /// The user asked for a list.
    List,
    /// Anything else; answered as prose.
    Paragraph,
}

/// Result of handing a query to the gate, shaped for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum IntakeOutcome {
    Accepted { query: String, kind: QueryKind },
    Rejected { error: String },
}

impl IntakeOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }
}

/// Classify a sanitized query: any mention of "list" asks for a list.
pub fn classify_query(query: &str) -> QueryKind {
    if query.to_lowercase().contains("list") {
        QueryKind::List
    } else {
        QueryKind::Paragraph
    }
}

/// Sign (if keyed) and gate a raw user query.
pub fn gate_query(query: &str, key: Option<&SecretKey>) -> IntakeOutcome {
    let candidate = match key {
        Some(key) => gate::sign(query, key),
        None => query.to_string(),
    };

    match gate::process(&candidate, key) {
        Ok(query) => {
            let kind = classify_query(&query);
            info!(?kind, "Query accepted");
            IntakeOutcome::Accepted { query, kind }
        }
        Err(e) => IntakeOutcome::Rejected {
            error: e.to_string(),
        },
    }
}
