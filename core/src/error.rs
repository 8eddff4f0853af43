//! Error types for the account API client.
//!
//! # Design
//! `Remote` covers every response whose status differs from the operation's
//! success code. The status and raw body are kept so callers can tell a
//! server-side rejection (400) from a missing record (404) or a stale
//! version (409). Validation failures never reach the wire; they are
//! reported by `AccountBuilder::build` before any request is made.

use thiserror::Error;

use crate::validation::{Field, Violation};

/// Errors returned by the client, the builder's decode path, and the
/// transport.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The account failed one or more field constraints.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Bytes could not be decoded into an account.
    #[error("decode failed: {0}")]
    Decode(String),

    /// The account could not be encoded as JSON.
    #[error("encode failed: {0}")]
    Encode(String),

    /// No response was obtained from the server.
    #[error("transport failed: {0}")]
    Transport(String),

    /// The server answered with an unexpected status.
    #[error("HTTP {status}: {body}")]
    Remote { status: u16, body: String },
}

impl ApiError {
    /// Status code of a `Remote` error.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Remote { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_bad_request(&self) -> bool {
        self.status() == Some(400)
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    pub fn is_conflict(&self) -> bool {
        self.status() == Some(409)
    }
}

/// Every constraint an account failed, in field order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid account: {}", summary(.violations))]
pub struct ValidationError {
    violations: Vec<Violation>,
}

impl ValidationError {
    pub(crate) fn new(violations: Vec<Violation>) -> Self {
        Self { violations }
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Distinct failed fields, in the order they were checked.
    pub fn fields(&self) -> Vec<Field> {
        let mut fields: Vec<Field> = Vec::new();
        for violation in &self.violations {
            if !fields.contains(&violation.field) {
                fields.push(violation.field);
            }
        }
        fields
    }

    pub fn has(&self, field: Field) -> bool {
        self.violations.iter().any(|v| v.field == field)
    }
}

fn summary(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
