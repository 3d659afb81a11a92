//! Storefront Error Types
//!
//! Everything a session call can fail with. A 2xx body carrying
//! `success: false` is not an error: it comes back as an ordinary
//! [`ApiResponse`].

use kernel::error::kind::ErrorKind;
use thiserror::Error;

use crate::api::ApiResponse;
use crate::storage::StorageError;

/// Storefront result type alias
pub type SessionResult<T> = Result<T, SessionError>;

#[derive(Debug, Error)]
pub enum SessionError {
    /// Connection refused, DNS failure, timeout
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The gateway answered with a non-2xx status
    #[error("Server responded with status {status}")]
    Status {
        status: u16,
        /// Decoded body, when the gateway sent one we understand
        response: Option<ApiResponse>,
    },

    /// 2xx response whose body is not the expected JSON
    #[error("Could not decode response body: {0}")]
    Decode(#[source] serde_json::Error),

    /// Stored token has no readable claims segment
    #[error("Session token is malformed: {0}")]
    MalformedToken(String),

    #[error(transparent)]
    Storage(#[from] StorageError),

    /// A logout happened while this request was in flight
    #[error("Response arrived after the session was reset")]
    Superseded,
}

impl SessionError {
    /// HTTP status for `Status` errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            SessionError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Server-provided message, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            SessionError::Status {
                response: Some(response),
                ..
            } => response.message.as_deref(),
            _ => None,
        }
    }

    /// Gateway failure class for `Status` errors
    pub fn kind(&self) -> Option<ErrorKind> {
        self.status().and_then(ErrorKind::from_status)
    }

    /// True when the user has to log in again to make progress.
    pub fn is_unauthorized(&self) -> bool {
        self.kind() == Some(ErrorKind::Unauthorized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_accessors() {
        let response: ApiResponse =
            serde_json::from_str(r#"{"success":false,"message":"Bearer token has expired"}"#)
                .unwrap();
        let err = SessionError::Status {
            status: 401,
            response: Some(response),
        };
        assert_eq!(err.status(), Some(401));
        assert!(err.is_unauthorized());
        assert_eq!(err.server_message(), Some("Bearer token has expired"));

        let err = SessionError::Status {
            status: 409,
            response: None,
        };
        assert_eq!(err.kind(), Some(ErrorKind::Conflict));
        assert_eq!(err.server_message(), None);

        assert_eq!(SessionError::Superseded.status(), None);
        assert!(!SessionError::Superseded.is_unauthorized());
    }
}
