//! # Error Types
//!
//! Errors raised while deriving identities, parsing them, and narrowing
//! envelopes. Transport failures live in the client crate.

use crate::kind::Kind;
use thiserror::Error;

/// Canonical content could not be produced for identity derivation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DerivationError {
    /// A field the canonical form depends on is unset.
    #[error("Cannot derive identity: required field `{0}` is missing")]
    MissingField(&'static str),

    /// The body could not be serialized into canonical JSON.
    #[error("Cannot derive identity: canonicalization failed: {0}")]
    Canonicalization(String),

    /// Mutable derivation requested for an immutable kind, or vice versa.
    #[error("Cannot derive identity: {kind} does not support this derivation mode")]
    MutabilityMismatch {
        /// Kind of the body being derived.
        kind: Kind,
    },
}

/// A string or byte sequence is not a valid identity.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentityParseError {
    /// Wrong number of bytes once decoded.
    #[error("Invalid identity length: expected {expected} bytes, got {got}")]
    InvalidLength {
        /// Required length.
        expected: usize,
        /// Decoded length.
        got: usize,
    },

    /// Not hexadecimal.
    #[error("Invalid identity encoding: {0}")]
    InvalidEncoding(String),

    /// Unsupported identity format version.
    #[error("Unsupported identity version: {0:#04x}")]
    UnsupportedVersion(u8),

    /// The kind byte does not name a known resource kind.
    #[error("Unknown resource kind byte: {0:#04x}")]
    UnknownKind(u8),
}

/// An inbound envelope cannot be narrowed to the requested concrete body.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnvelopeError {
    /// The decoded body (or the identity it is filed under) is a different kind.
    #[error("Invalid {expected} body: found {found}")]
    TypeMismatch {
        /// Kind the caller asked for.
        expected: Kind,
        /// What the envelope carried instead.
        found: String,
    },

    /// Versions start at 1; the registry never issues 0.
    #[error("Invalid envelope version 0 for {id}")]
    InvalidVersion {
        /// Identity of the offending record.
        id: String,
    },

    /// The body has the right kind but breaks its own field rules.
    #[error("Invalid {kind} body: {reason}")]
    InvalidBody {
        /// Kind of the body.
        kind: Kind,
        /// The rule it breaks.
        #[source]
        reason: DerivationError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_error() {
        let err = DerivationError::MissingField("org_id");
        assert!(err.to_string().contains("org_id"));
    }

    #[test]
    fn test_type_mismatch_error_names_both_kinds() {
        let err = EnvelopeError::TypeMismatch {
            expected: Kind::Service,
            found: "project".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("Invalid service body"));
        assert!(msg.contains("project"));
    }

    #[test]
    fn test_unknown_kind_error_is_hex() {
        let err = IdentityParseError::UnknownKind(0x2a);
        assert!(err.to_string().contains("0x2a"));
    }
}
