//! Error handling for the swipedeck client

use std::fmt;
use thiserror::Error;

/// Unified error type for the swipedeck client
#[derive(Error, Debug)]
pub enum Error {
    /// Network or HTTP related errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization or deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing errors
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// Credentials rejected by the identity provider
    #[error("Authentication error: {0}")]
    Auth(String),

    /// No active session with the identity provider
    #[error("Not signed in")]
    NotAuthenticated,

    /// The requested document does not exist
    #[error("Document {id} not found in {collection}")]
    NotFound { collection: String, id: String },

    /// The backend answered with a non-success status
    #[error("Transport error (status {status}): {message}")]
    Transport { status: u16, message: String },

    /// The signed-in profile has no seeking age range
    #[error("Profile is missing its seeking age range")]
    MissingPreference,

    /// A raw record could not be turned into a user
    #[error("Malformed record: {0}")]
    MalformedRecord(String),

    /// A profile edit that cannot be saved
    #[error("Invalid profile: {0}")]
    InvalidProfile(String),

    /// Invalid or missing configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Login submitted while the form is invalid or an attempt is in flight
    #[error("Submission is currently disabled")]
    SubmissionBlocked,
}

impl Error {
    /// Create a new authentication error
    pub fn auth<T: fmt::Display>(msg: T) -> Self {
        Error::Auth(msg.to_string())
    }

    /// Create a new transport error for a failed response
    pub fn transport<T: fmt::Display>(status: u16, msg: T) -> Self {
        Error::Transport {
            status,
            message: msg.to_string(),
        }
    }

    /// Create a new malformed record error
    pub fn malformed<T: fmt::Display>(msg: T) -> Self {
        Error::MalformedRecord(msg.to_string())
    }

    /// Create a new configuration error
    pub fn config<T: fmt::Display>(msg: T) -> Self {
        Error::Config(msg.to_string())
    }

    /// Network failures and backend rejections, on either fetch
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Http(_) | Error::Transport { .. })
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_classification() {
        assert!(Error::transport(503, "unavailable").is_transport());
        assert!(!Error::MissingPreference.is_transport());
        assert!(!Error::NotFound {
            collection: "users".to_string(),
            id: "abc".to_string()
        }
        .is_transport());
    }

    #[test]
    fn test_display() {
        let err = Error::transport(500, "boom");
        assert_eq!(err.to_string(), "Transport error (status 500): boom");

        let err = Error::NotFound {
            collection: "users".to_string(),
            id: "u1".to_string(),
        };
        assert_eq!(err.to_string(), "Document u1 not found in users");
    }
}
