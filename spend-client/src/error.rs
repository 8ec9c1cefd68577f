//! Client error types

use crate::forms::FieldErrors;
use thiserror::Error;

/// Message shown when a failed response carries no usable text
pub const FALLBACK_ERROR_MESSAGE: &str = "Something went wrong, please try again";

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed at the transport level
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response did not have the promised shape
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Session is gone; the client has already logged out
    #[error("Authentication required")]
    Unauthorized,

    /// The signed-in admin lacks the permission for this call
    #[error("Permission denied: {0}")]
    Forbidden(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Client-side validation failed, nothing was sent
    #[error("Validation error: {0}")]
    Validation(FieldErrors),

    /// Backend answered with a non-success status
    #[error("API error {code}: {}", .message.as_deref().unwrap_or(FALLBACK_ERROR_MESSAGE))]
    Api { code: i64, message: Option<String> },

    /// Local storage failed
    #[error("Storage error: {0}")]
    Storage(#[from] crate::storage::StorageError),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// The three ways a console operation can fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Session ended, user is sent back to the login page
    Unauthorized,
    /// Per-field messages, submission blocked
    Validation,
    /// Anything else, surfaced as a toast
    Server,
}

impl ClientError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Unauthorized => ErrorKind::Unauthorized,
            Self::Validation(_) => ErrorKind::Validation,
            _ => ErrorKind::Server,
        }
    }

    /// Text for the error toast
    pub fn toast_message(&self) -> String {
        match self {
            Self::Api {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => message.clone(),
            Self::Forbidden(_) => "You do not have permission to perform this action".to_string(),
            Self::NotFound(what) => format!("{} not found", what),
            Self::Unauthorized => "Your session has expired, please sign in again".to_string(),
            Self::Validation(errors) => errors
                .first_message()
                .unwrap_or(FALLBACK_ERROR_MESSAGE)
                .to_string(),
            _ => FALLBACK_ERROR_MESSAGE.to_string(),
        }
    }

    /// Per-field messages of a validation failure
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            Self::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

impl From<shared::EnvelopeError> for ClientError {
    fn from(err: shared::EnvelopeError) -> Self {
        Self::InvalidResponse(err.to_string())
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind() {
        assert_eq!(ClientError::Unauthorized.kind(), ErrorKind::Unauthorized);
        assert_eq!(
            ClientError::Validation(FieldErrors::default()).kind(),
            ErrorKind::Validation
        );
        assert_eq!(
            ClientError::Api {
                code: 500,
                message: None
            }
            .kind(),
            ErrorKind::Server
        );
    }

    #[test]
    fn test_toast_uses_body_message() {
        let err = ClientError::Api {
            code: 422,
            message: Some("Email already taken".into()),
        };
        assert_eq!(err.toast_message(), "Email already taken");
    }

    #[test]
    fn test_toast_falls_back() {
        let err = ClientError::Api {
            code: 500,
            message: Some("  ".into()),
        };
        assert_eq!(err.toast_message(), FALLBACK_ERROR_MESSAGE);
        let err = ClientError::InvalidResponse("missing data".into());
        assert_eq!(err.toast_message(), FALLBACK_ERROR_MESSAGE);
    }

    #[test]
    fn test_local_failures_are_server_errors() {
        let err: ClientError = crate::storage::StorageError::Poisoned.into();
        assert_eq!(err.kind(), ErrorKind::Server);
        assert_eq!(err.toast_message(), FALLBACK_ERROR_MESSAGE);

        let json = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: ClientError = json.into();
        assert!(matches!(err, ClientError::Serialization(_)));
        assert_eq!(err.kind(), ErrorKind::Server);
    }
}
