/// ID types for Mellow Player entities
use serde::{Deserialize, Serialize};
use std::fmt;

/// Track identifier
///
/// Opaque catalog identifier. Two tracks are the same logical track when their
/// ids compare equal, regardless of which collection holds them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackId(String);

impl TrackId {
    /// Create a new track ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for TrackId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for TrackId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn track_id_equality() {
        assert_eq!(TrackId::new("abc"), TrackId::from("abc"));
        assert_ne!(TrackId::new("abc"), TrackId::new("abd"));
    }

    #[test]
    fn track_id_serializes_as_plain_string() {
        let json = serde_json::to_string(&TrackId::new("65f0c2")).unwrap();
        assert_eq!(json, "\"65f0c2\"");
    }
}
