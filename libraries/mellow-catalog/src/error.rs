//! Error types for the Mellow catalog client.

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when talking to the auth and catalog API.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Session token expired; the user has to log in again
    #[error("Session expired: {0}")]
    AuthExpired(String),

    /// Login or registration rejected
    #[error("Authentication failed: {0}")]
    AuthFailed(String),

    /// Catalog request returned a non-success status
    #[error("Fetch failed ({status}): {message}")]
    Fetch { status: u16, message: String },

    /// Server is offline or unreachable
    #[error("Server unreachable: {0}")]
    ServerUnreachable(String),

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Failed to parse server response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Invalid API URL
    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),

    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(String),
}

impl CatalogError {
    /// Whether the caller should drop its session (logout flow)
    pub fn is_auth_expired(&self) -> bool {
        matches!(self, Self::AuthExpired(_))
    }

    /// Classify a failed catalog response
    ///
    /// The server signals expiry only through the message text.
    pub(crate) fn from_fetch(status: u16, message: String) -> Self {
        if message.to_lowercase().contains("token expired") {
            Self::AuthExpired(message)
        } else {
            Self::Fetch { status, message }
        }
    }

    /// Map a transport failure
    pub(crate) fn from_send(e: reqwest::Error) -> Self {
        if e.is_connect() || e.is_timeout() {
            Self::ServerUnreachable(e.to_string())
        } else {
            Self::Request(e)
        }
    }
}

/// Error body returned by the API (`{"message": "..."}`)
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// Extract the server message from an error body, falling back to `fallback`
pub(crate) fn error_message(body: &str, fallback: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| fallback.to_string())
}

/// Result type for catalog client operations.
pub type Result<T> = std::result::Result<T, CatalogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_expired_detected_case_insensitively() {
        let err = CatalogError::from_fetch(401, "Not authorized, Token Expired".to_string());
        assert!(err.is_auth_expired());

        let err = CatalogError::from_fetch(401, "Not authorized, no token".to_string());
        assert!(!err.is_auth_expired());
        assert!(matches!(err, CatalogError::Fetch { status: 401, .. }));
    }

    #[test]
    fn error_message_prefers_server_text() {
        assert_eq!(
            error_message(r#"{"message":"User already exists"}"#, "Registration failed"),
            "User already exists"
        );
        assert_eq!(error_message(r#"{"message":""}"#, "Login failed"), "Login failed");
        assert_eq!(error_message("<html>502</html>", "Failed to fetch songs"), "Failed to fetch songs");
    }
}
