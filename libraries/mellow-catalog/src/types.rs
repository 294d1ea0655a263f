//! Types for auth API requests and responses.

use serde::{Deserialize, Serialize};

/// Request body for the login endpoint.
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Request body for the register endpoint.
#[derive(Debug, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Authenticated user session returned by login and register.
///
/// Serializable so hosts can persist it between launches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Bearer token for catalog requests
    pub token: String,

    #[serde(default, alias = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl Session {
    /// Session carrying only a token (e.g. restored from storage)
    pub fn from_token(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            id: None,
            username: None,
            email: None,
        }
    }
}
