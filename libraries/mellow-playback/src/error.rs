//! Error types for playback management

use thiserror::Error;

/// Playback errors
///
/// Navigation over an empty library or queue is a no-op, not an error.
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// Index out of bounds
    #[error("Index {index} out of bounds for length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// Engine refused to load a source
    #[error("Failed to bind {source_url}: {message}")]
    EngineBind { source_url: String, message: String },

    /// Engine call failed
    #[error("Engine error: {0}")]
    Engine(String),

    /// Now-playing surface rejected an update
    #[error("Notification sync failed: {0}")]
    NotificationSync(String),

    /// Invalid operation
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
}

impl PlaybackError {
    /// Create an engine error
    pub fn engine(msg: impl Into<String>) -> Self {
        Self::Engine(msg.into())
    }

    /// Create a notification sync error
    pub fn notification(msg: impl Into<String>) -> Self {
        Self::NotificationSync(msg.into())
    }
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
