//! Catalog fetch for the Mellow API.

use crate::error::{error_message, CatalogError, Result};
use mellow_core::{Library, Track};
use reqwest::Client;
use tracing::{debug, warn};

/// Catalog client.
pub struct LibraryClient<'a> {
    http: &'a Client,
    base_url: &'a str,
}

impl<'a> LibraryClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str) -> Self {
        Self { http, base_url }
    }

    /// Fetch the full catalog in server order.
    ///
    /// An empty token yields an empty library without a request. A message
    /// mentioning an expired token maps to [`CatalogError::AuthExpired`].
    pub async fn get_library(&self, access_token: &str) -> Result<Vec<Track>> {
        if access_token.is_empty() {
            warn!("No session token, skipping library fetch");
            return Ok(Vec::new());
        }

        let url = format!("{}/songs", self.base_url);
        debug!(url = %url, "Fetching library");

        let response = self
            .http
            .get(&url)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(CatalogError::from_send)?;

        let status = response.status();

        if status.is_success() {
            let body = response.text().await?;
            let library = Library::from_json(&body).map_err(|e| {
                CatalogError::ParseError(format!("Failed to parse library response: {}", e))
            })?;

            debug!(tracks = library.len(), "Fetched library");
            Ok(library.into_tracks())
        } else {
            let error_text = response.text().await.unwrap_or_default();
            let message = error_message(&error_text, "Failed to fetch songs");
            Err(CatalogError::from_fetch(status.as_u16(), message))
        }
    }
}
