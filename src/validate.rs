//! Payload validation seam.
//!
//! The grammar of the underlying descriptor/transaction formats lives
//! outside this crate; a [`PayloadValidator`] is the hook through which a
//! reassembled payload is checked against that grammar. Only single-part
//! account maps are validated eagerly during parsing (see
//! [`crate::parser::parse_fragment`]); everything else is the downstream
//! consumer's problem.

use thiserror::Error;

use crate::models::PayloadKind;

/// Reason a payload failed validation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct ValidationError(pub String);

impl ValidationError {
    /// Create a validation error from any message.
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Confirms a fully reassembled payload parses as a valid instance of its
/// declared kind.
pub trait PayloadValidator {
    /// Check `text` against the grammar for `kind`.
    fn validate(&self, text: &str, kind: PayloadKind) -> Result<(), ValidationError>;
}

/// Validator that accepts every payload.
///
/// Useful when the caller validates downstream anyway, and as the stock
/// choice for transaction scans, which are never validated at this layer.
#[derive(Debug, Default, Clone, Copy)]
pub struct AcceptAll;

impl PayloadValidator for AcceptAll {
    fn validate(&self, _text: &str, _kind: PayloadKind) -> Result<(), ValidationError> {
        Ok(())
    }
}

impl<F> PayloadValidator for F
where
    F: Fn(&str, PayloadKind) -> Result<(), ValidationError>,
{
    fn validate(&self, text: &str, kind: PayloadKind) -> Result<(), ValidationError> {
        self(text, kind)
    }
}
