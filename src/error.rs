//! Error types for the Drift gateway

use thiserror::Error;

/// Result type alias for gateway operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the Drift gateway
#[derive(Debug, Error)]
pub enum Error {
    /// A required field was absent from the control payload
    #[error("missing {0} parameter")]
    MissingField(String),

    /// A field was present but failed its validation rule
    #[error("invalid {field} parameter: {reason}")]
    InvalidField { field: String, reason: String },

    /// Control event or monitor query type not in the descriptor table
    #[error("unknown control event: {0}")]
    UnknownEvent(String),

    /// Device transport failure (accept handshake or socket write)
    #[error("transport error: {0}")]
    Transport(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl Error {
    /// Whether this error is a fault in the caller's request, recovered
    /// locally and surfaced as a `code:-1` response rather than a failure
    /// of the gateway itself
    #[must_use]
    pub const fn is_request_fault(&self) -> bool {
        matches!(
            self,
            Self::MissingField(_) | Self::InvalidField { .. } | Self::UnknownEvent(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_are_request_faults() {
        assert!(Error::MissingField("dzoom".to_string()).is_request_fault());
        assert!(Error::UnknownEvent("foo".to_string()).is_request_fault());
        assert!(!Error::Transport("broken pipe".to_string()).is_request_fault());
    }

    #[test]
    fn missing_field_names_the_parameter() {
        let e = Error::MissingField("rtmp_url".to_string());
        assert_eq!(e.to_string(), "missing rtmp_url parameter");
    }
}
