//! # Domain Errors
//!
//! Error types for the registry client.
//!
//! Nothing here is recovered locally: every failure reaches the caller, and
//! list calls never return partial results.

use super::value_objects::Method;
use registry_types::{DerivationError, EnvelopeError, Kind};
use thiserror::Error;

/// Registry client error.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Required arguments missing at the client boundary. No request is made.
    #[error("{0}")]
    InvalidArgument(&'static str),

    /// Identity could not be derived for the outbound body.
    #[error(transparent)]
    Derivation(#[from] DerivationError),

    /// A returned body is not the kind that was asked for.
    #[error("Invalid {expected} body: found {found}")]
    TypeMismatch {
        /// Kind the client expected.
        expected: Kind,
        /// What the registry sent instead.
        found: String,
    },

    /// A returned envelope is structurally invalid.
    #[error("Malformed envelope: {0}")]
    MalformedEnvelope(String),

    /// The response body could not be decoded.
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// The request body could not be encoded.
    #[error("Failed to encode request: {0}")]
    Encode(String),

    /// Transport failure, passed through unchanged.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Client configuration is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl RegistryError {
    /// True for [`RegistryError::TypeMismatch`].
    pub fn is_type_mismatch(&self) -> bool {
        matches!(self, Self::TypeMismatch { .. })
    }
}

impl From<EnvelopeError> for RegistryError {
    fn from(err: EnvelopeError) -> Self {
        match err {
            EnvelopeError::TypeMismatch { expected, found } => {
                Self::TypeMismatch { expected, found }
            }
            other => Self::MalformedEnvelope(other.to_string()),
        }
    }
}

/// Transport-level failure. Classification belongs to the transport.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The call was cancelled before it completed.
    #[error("Request cancelled")]
    Cancelled,

    /// The call did not complete in time.
    #[error("Request timed out")]
    Timeout,

    /// An authenticated request was attempted without credentials.
    #[error("Not authenticated: no registry token configured")]
    Unauthenticated,

    /// Could not reach the registry.
    #[error("Connection error: {0}")]
    Connection(String),

    /// The registry answered with a non-success status.
    #[error("Registry returned {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body text, truncated.
        message: String,
    },

    /// The request could not be built.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl TransportError {
    /// Whether a transport may retry after this error.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Timeout | Self::Connection(_) => true,
            Self::Status { status, .. } => matches!(status, 429 | 502 | 503 | 504),
            Self::Cancelled | Self::Unauthenticated | Self::InvalidRequest(_) => false,
        }
    }

    /// Whether a request with `method` may be sent again after this error.
    ///
    /// A POST is only repeated when the registry said it did not take the
    /// request (429, 503). After a timeout, a dropped connection or a gateway
    /// error the record may already be stored.
    pub fn is_retryable_for(&self, method: Method) -> bool {
        match method {
            Method::Get => self.is_retryable(),
            Method::Post => matches!(self, Self::Status { status: 429 | 503, .. }),
        }
    }
}

/// Invalid client configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Registry URL is not an absolute http(s) URL.
    #[error("Invalid registry URL: {0}")]
    InvalidUrl(String),

    /// A timeout was set to zero.
    #[error("Invalid timeout: {field} must be greater than zero")]
    InvalidTimeout {
        /// Offending field.
        field: &'static str,
    },

    /// Too many retries configured.
    #[error("Too many retries: {count} > {max}")]
    TooManyRetries {
        /// Configured count.
        count: u32,
        /// Maximum allowed.
        max: u32,
    },

    /// The HTTP client could not be built.
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_argument_message() {
        let err = RegistryError::InvalidArgument("invalid org or project");
        assert_eq!(err.to_string(), "invalid org or project");
    }

    #[test]
    fn test_envelope_type_mismatch_maps_to_type_mismatch() {
        let err: RegistryError = EnvelopeError::TypeMismatch {
            expected: Kind::Service,
            found: "project".to_string(),
        }
        .into();
        assert!(err.is_type_mismatch());
        assert!(err.to_string().contains("Invalid service body"));
    }

    #[test]
    fn test_envelope_version_error_maps_to_malformed() {
        let err: RegistryError = EnvelopeError::InvalidVersion { id: "x".to_string() }.into();
        assert!(matches!(err, RegistryError::MalformedEnvelope(_)));
    }

    #[test]
    fn test_transport_error_passes_through() {
        let err: RegistryError = TransportError::Cancelled.into();
        assert!(matches!(err, RegistryError::Transport(TransportError::Cancelled)));
        assert_eq!(err.to_string(), "Request cancelled");
    }

    #[test]
    fn test_retryable_classification() {
        assert!(TransportError::Timeout.is_retryable());
        assert!(TransportError::Connection("refused".to_string()).is_retryable());
        assert!(TransportError::Status {
            status: 503,
            message: String::new()
        }
        .is_retryable());
        assert!(!TransportError::Status {
            status: 404,
            message: String::new()
        }
        .is_retryable());
        assert!(!TransportError::Cancelled.is_retryable());
        assert!(!TransportError::Unauthenticated.is_retryable());
    }

    #[test]
    fn test_post_not_repeated_when_outcome_unknown() {
        let gateway = TransportError::Status {
            status: 502,
            message: String::new(),
        };
        let throttled = TransportError::Status {
            status: 429,
            message: String::new(),
        };

        assert!(TransportError::Timeout.is_retryable_for(Method::Get));
        assert!(!TransportError::Timeout.is_retryable_for(Method::Post));
        assert!(!TransportError::Connection("reset".to_string()).is_retryable_for(Method::Post));
        assert!(gateway.is_retryable_for(Method::Get));
        assert!(!gateway.is_retryable_for(Method::Post));
        assert!(throttled.is_retryable_for(Method::Post));
    }

    #[test]
    fn test_invalid_body_maps_to_malformed() {
        let err: RegistryError = EnvelopeError::InvalidBody {
            kind: Kind::Service,
            reason: DerivationError::MissingField("org_id"),
        }
        .into();
        assert!(matches!(err, RegistryError::MalformedEnvelope(_)));
        assert!(err.to_string().contains("org_id"));
    }

    #[test]
    fn test_too_many_retries_error() {
        let err = ConfigError::TooManyRetries { count: 11, max: 10 };
        assert!(err.to_string().contains("11 > 10"));
    }
}
