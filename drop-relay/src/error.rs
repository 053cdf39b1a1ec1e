//! Error types for drop-relay.

use drop_types::{FileId, SessionCode, TypeError};

/// Process-level errors: startup, configuration, I/O.
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Domain errors for registry and store operations.
///
/// Each variant maps to one HTTP status; none is fatal to the process.
#[derive(Debug, thiserror::Error)]
pub enum ShareError {
    /// Unknown session code.
    #[error("session not found: {code}")]
    SessionNotFound {
        /// The code that was looked up.
        code: SessionCode,
    },

    /// Unknown file id within an existing session.
    #[error("file not found: {file_id}")]
    FileNotFound {
        /// The file id that was looked up.
        file_id: FileId,
    },

    /// Declared or decoded file size over the admission limit.
    #[error("file size exceeds {limit} byte limit: {size}")]
    TooLarge {
        /// The offending size in bytes.
        size: u64,
        /// The configured limit in bytes.
        limit: u64,
    },

    /// Caller-chosen code is already registered.
    #[error("session code already in use: {code}")]
    CodeInUse {
        /// The colliding code.
        code: SessionCode,
    },

    /// Caller-chosen code fails the format policy.
    #[error("session code must be {expected}")]
    BadFormat {
        /// Description of the expected format.
        expected: String,
    },

    /// Code generation could not find a free code within the attempt bound.
    #[error("could not mint a free session code after {attempts} attempts")]
    ExhaustedRetries {
        /// Number of attempts made.
        attempts: u32,
    },

    /// Payload could not be decoded.
    #[error(transparent)]
    Decode(#[from] TypeError),

    /// Client exceeded an upload or request quota.
    #[error("rate limit exceeded: {reason}")]
    RateLimited {
        /// Which quota was hit.
        reason: String,
    },
}

/// Result type alias for relay operations.
pub type Result<T> = std::result::Result<T, RelayError>;

/// Result type alias for registry and store operations.
pub type ShareResult<T> = std::result::Result<T, ShareError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn share_error_messages_are_short() {
        let err = ShareError::SessionNotFound {
            code: SessionCode::new("9999"),
        };
        assert_eq!(err.to_string(), "session not found: 9999");

        let err = ShareError::TooLarge {
            size: 6 * 1024 * 1024,
            limit: 5 * 1024 * 1024,
        };
        assert_eq!(
            err.to_string(),
            "file size exceeds 5242880 byte limit: 6291456"
        );
    }

    #[test]
    fn decode_error_converts_from_type_error() {
        let type_err = drop_types::Payload::parse("data:x;base64,???").unwrap_err();
        let err: ShareError = type_err.into();
        assert!(matches!(err, ShareError::Decode(_)));
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ShareError>();
        assert_send_sync::<RelayError>();
    }
}
