//! Main Mellow API client.

use crate::auth::AuthClient;
use crate::config::ClientConfig;
use crate::error::{CatalogError, Result};
use crate::library::LibraryClient;
use crate::types::Session;
use mellow_core::Track;
use reqwest::Client;
use std::sync::Arc;
use tokio::sync::{mpsc, RwLock};
use tracing::{debug, info, warn};

/// Client for the Mellow auth and catalog API.
///
/// Holds the current session; catalog calls use its token.
///
/// # Example
///
/// ```ignore
/// use mellow_catalog::{ClientConfig, MellowClient};
///
/// let client = MellowClient::new(ClientConfig::load()?)?;
/// client.login("user@example.com", "password").await?;
///
/// let tracks = client.get_library().await?;
/// println!("Found {} tracks", tracks.len());
/// ```
#[derive(Clone)]
pub struct MellowClient {
    http: Client,
    config: ClientConfig,
    session: Arc<RwLock<Option<Session>>>,
}

impl MellowClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;

        let normalized = ClientConfig {
            api_url: config.api_url.trim_end_matches('/').to_string(),
            ..config
        };

        let http = Client::builder()
            .timeout(normalized.timeout())
            .connect_timeout(normalized.connect_timeout())
            .user_agent(format!("MellowPlayer/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(CatalogError::Request)?;

        Ok(Self {
            http,
            config: normalized,
            session: Arc::new(RwLock::new(None)),
        })
    }

    /// Get the API base URL.
    pub fn api_url(&self) -> &str {
        &self.config.api_url
    }

    /// Get the client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Auth endpoints.
    pub fn auth(&self) -> AuthClient<'_> {
        AuthClient::new(&self.http, &self.config.api_url)
    }

    /// Catalog endpoints.
    pub fn library(&self) -> LibraryClient<'_> {
        LibraryClient::new(&self.http, &self.config.api_url)
    }

    /// Login and store the session.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session> {
        let session = self.auth().login(email, password).await?;
        *self.session.write().await = Some(session.clone());
        Ok(session)
    }

    /// Register, then store the returned session.
    pub async fn register(&self, username: &str, email: &str, password: &str) -> Result<Session> {
        let session = self.auth().register(username, email, password).await?;
        *self.session.write().await = Some(session.clone());
        Ok(session)
    }

    /// Restore a previously persisted session.
    pub async fn set_session(&self, session: Session) {
        *self.session.write().await = Some(session);
    }

    /// Get the current session.
    pub async fn session(&self) -> Option<Session> {
        self.session.read().await.clone()
    }

    /// Check if the client holds a session.
    pub async fn is_authenticated(&self) -> bool {
        self.session.read().await.is_some()
    }

    /// Drop the stored session (logout).
    pub async fn logout(&self) {
        *self.session.write().await = None;
        info!("Logged out");
    }

    /// Fetch the catalog with the stored session token.
    ///
    /// Without a session this returns an empty library. An expired token
    /// also clears the stored session before the error is returned.
    pub async fn get_library(&self) -> Result<Vec<Track>> {
        let token = self
            .session
            .read()
            .await
            .as_ref()
            .map(|s| s.token.clone())
            .unwrap_or_default();

        match self.library().get_library(&token).await {
            Err(e) if e.is_auth_expired() => {
                warn!(error = %e, "Session expired, logging out");
                self.logout().await;
                Err(e)
            }
            other => other,
        }
    }

    /// Re-fetch the catalog every refresh interval, sending each result.
    ///
    /// The first fetch happens immediately. Stops when the receiver is
    /// dropped or the session expires.
    pub async fn watch_library(&self, updates: mpsc::Sender<Result<Vec<Track>>>) {
        let mut ticker = tokio::time::interval(self.config.refresh_interval());

        loop {
            ticker.tick().await;

            let result = self.get_library().await;
            let expired = matches!(&result, Err(e) if e.is_auth_expired());

            if updates.send(result).await.is_err() {
                debug!("Library watcher receiver dropped");
                break;
            }

            if expired {
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_validation() {
        assert!(MellowClient::new(ClientConfig::new("https://example.com/api")).is_ok());
        assert!(MellowClient::new(ClientConfig::new("http://localhost:5000/api")).is_ok());

        assert!(MellowClient::new(ClientConfig::new("")).is_err());
        assert!(MellowClient::new(ClientConfig::new("ftp://example.com")).is_err());
    }

    #[test]
    fn test_url_normalization() {
        let client = MellowClient::new(ClientConfig::new("https://example.com/api/")).unwrap();
        assert_eq!(client.api_url(), "https://example.com/api");
    }
}
