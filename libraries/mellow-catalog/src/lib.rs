//! Mellow Player Catalog Client
//!
//! HTTP client for the Mellow Player auth and catalog API.
//!
//! # Features
//!
//! - **Authentication**: login and registration, session kept in the client
//! - **Catalog**: fetch the full track list with the session token
//! - **Refresh**: periodic background re-fetch over a channel
//! - **Configuration**: `mellow.toml` plus `MELLOW_*` environment overrides
//!
//! # Example
//!
//! ```ignore
//! use mellow_catalog::{ClientConfig, MellowClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = MellowClient::new(ClientConfig::load()?)?;
//!
//!     let session = client.login("user@example.com", "password").await?;
//!     println!("Logged in as {:?}", session.username);
//!
//!     match client.get_library().await {
//!         Ok(tracks) => println!("Found {} tracks", tracks.len()),
//!         Err(e) if e.is_auth_expired() => println!("Please log in again"),
//!         Err(e) => return Err(e.into()),
//!     }
//!
//!     Ok(())
//! }
//! ```

mod auth;
mod client;
mod config;
mod error;
mod library;
mod types;

// Re-export main types
pub use client::MellowClient;
pub use config::ClientConfig;
pub use error::{CatalogError, Result};
pub use types::{LoginRequest, RegisterRequest, Session};

// Re-export sub-clients for direct use if needed
pub use auth::AuthClient;
pub use library::LibraryClient;
