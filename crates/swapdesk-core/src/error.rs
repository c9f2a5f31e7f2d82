//! Error types for SwapDesk

use thiserror::Error;

use crate::types::EntityId;

pub type Result<T> = std::result::Result<T, Error>;

/// Every failure the dashboard can observe.
///
/// All of them are recoverable from the UI's point of view; `Unauthorized`
/// additionally tears the session down.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    // Transport Errors
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request failed with status {status}: {message}")]
    Http { status: u16, message: String },

    #[error("Session expired or credentials rejected")]
    Unauthorized,

    // Payload Errors
    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error("Failed to serialize request: {0}")]
    Serialize(String),

    // Domain Errors
    #[error("No such entity: {0}")]
    NotFound(EntityId),

    #[error("The server rejected the operation: {0}")]
    Rejected(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // Local Errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl Error {
    pub fn code(&self) -> &'static str {
        match self {
            Error::Network(_) => "NetworkError",
            Error::Http { .. } => "HttpError",
            Error::Unauthorized => "Unauthorized",
            Error::Parse(_) => "ParseError",
            Error::Serialize(_) => "SerializeError",
            Error::NotFound(_) => "NotFound",
            Error::Rejected(_) => "Rejected",
            Error::InvalidInput(_) => "InvalidInput",
            Error::Config(_) => "ConfigError",
            Error::Storage(_) => "StorageError",
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Error::Unauthorized)
    }

    /// Short message for a toast.
    pub fn user_message(&self) -> String {
        match self {
            Error::Network(_) => "Could not reach the server".to_string(),
            Error::Http { status, message } if message.is_empty() => {
                format!("Request failed with status {}", status)
            }
            Error::Http { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    pub(crate) fn from_status(status: u16, message: impl Into<String>) -> Self {
        if status == 401 {
            Error::Unauthorized
        } else {
            Error::Http {
                status,
                message: message.into(),
            }
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Parse(err.to_string())
    }
}

/// Map a raw HTTP status and body to an error.
pub fn status_error(status: u16, body: &str) -> Error {
    Error::from_status(status, body.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_401_is_unauthorized() {
        assert_eq!(status_error(401, "nope"), Error::Unauthorized);
        assert!(status_error(401, "").is_unauthorized());
    }

    #[test]
    fn test_status_other() {
        let err = status_error(500, " boom ");
        assert_eq!(
            err,
            Error::Http {
                status: 500,
                message: "boom".to_string()
            }
        );
        assert_eq!(err.code(), "HttpError");
    }

    #[test]
    fn test_user_message() {
        assert_eq!(
            Error::Network("dns".into()).user_message(),
            "Could not reach the server"
        );
        assert_eq!(
            status_error(503, "").user_message(),
            "Request failed with status 503"
        );
        assert_eq!(status_error(400, "bad name").user_message(), "bad name");
    }
}
