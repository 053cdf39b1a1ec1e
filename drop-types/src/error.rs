//! Error types for codedrop wire formats.

use thiserror::Error;

/// Errors raised while parsing codedrop types from client input.
#[derive(Debug, Error)]
pub enum TypeError {
    /// A session code did not match the required format policy.
    #[error("invalid session code: {reason}")]
    InvalidCode {
        /// Why the code was rejected.
        reason: String,
    },

    /// A payload string claimed to be base64 but could not be decoded.
    #[error("payload decode failed: {0}")]
    PayloadDecode(#[source] base64::DecodeError),

    /// A file id string was not a valid UUID.
    #[error("invalid file id: {0}")]
    InvalidFileId(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = TypeError::InvalidFileId("xyz".to_string());
        assert_eq!(err.to_string(), "invalid file id: xyz");
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TypeError>();
    }
}
