//! Authentication methods for the Mellow API.

use crate::error::{error_message, CatalogError, Result};
use crate::types::{LoginRequest, RegisterRequest, Session};
use reqwest::Client;
use serde::Serialize;
use tracing::{debug, info, warn};

/// Authentication client.
pub struct AuthClient<'a> {
    http: &'a Client,
    base_url: &'a str,
}

impl<'a> AuthClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str) -> Self {
        Self { http, base_url }
    }

    /// Login with email and password.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session> {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };

        self.post_credentials("login", &request, "Login failed").await
    }

    /// Create an account; the server logs the new user in.
    pub async fn register(&self, username: &str, email: &str, password: &str) -> Result<Session> {
        let request = RegisterRequest {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };

        self.post_credentials("register", &request, "Registration failed")
            .await
    }

    async fn post_credentials<B: Serialize>(
        &self,
        endpoint: &str,
        body: &B,
        fallback: &str,
    ) -> Result<Session> {
        let url = format!("{}/auth/{}", self.base_url, endpoint);
        debug!(url = %url, "Sending credentials");

        let response = self
            .http
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(CatalogError::from_send)?;

        let status = response.status();

        if status.is_success() {
            let session: Session = response.json().await.map_err(|e| {
                CatalogError::ParseError(format!("Failed to parse {} response: {}", endpoint, e))
            })?;

            info!(
                endpoint,
                username = session.username.as_deref().unwrap_or_default(),
                "Authenticated"
            );

            Ok(session)
        } else {
            let error_text = response.text().await.unwrap_or_default();
            let message = error_message(&error_text, fallback);
            warn!(endpoint, status = %status, error = %message, "Authentication rejected");
            Err(CatalogError::AuthFailed(message))
        }
    }
}
