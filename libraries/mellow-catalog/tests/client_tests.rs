//! Tests for the Mellow catalog client.
//!
//! These tests use mock servers to verify client behavior without
//! requiring a real server connection.

use mellow_catalog::{CatalogError, ClientConfig, MellowClient, Session};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> MellowClient {
    MellowClient::new(ClientConfig::new(format!("{}/api", server.uri()))).unwrap()
}

fn songs_json() -> serde_json::Value {
    serde_json::json!([
        {
            "_id": "s1",
            "title": "Kesariya",
            "artist": "Arijit Singh",
            "coverUrl": "https://cdn.example/s1.jpg",
            "songUrl": "https://cdn.example/s1.mp3",
            "duration": 268.4
        },
        {
            "_id": "s2",
            "title": "Duet",
            "artist": ["Shreya Ghoshal", "Sonu Nigam"],
            "songUrl": "https://cdn.example/s2.mp3"
        }
    ])
}

// =============================================================================
// Authentication Tests
// =============================================================================

mod authentication {
    use super::*;

    #[tokio::test]
    async fn test_login_stores_session() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/auth/login"))
            .and(body_json(serde_json::json!({
                "email": "user@example.com",
                "password": "secret"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "_id": "u1",
                "username": "user",
                "email": "user@example.com",
                "token": "jwt-123"
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        assert!(!client.is_authenticated().await);

        let session = client.login("user@example.com", "secret").await.unwrap();

        assert_eq!(session.token, "jwt-123");
        assert_eq!(session.id.as_deref(), Some("u1"));
        assert!(client.is_authenticated().await);
        assert_eq!(client.session().await, Some(session));
    }

    #[tokio::test]
    async fn test_login_failure_surfaces_server_message() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/auth/login"))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_json(serde_json::json!({ "message": "Invalid email or password" })),
            )
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let result = client.login("user@example.com", "wrong").await;

        match result {
            Err(CatalogError::AuthFailed(message)) => {
                assert_eq!(message, "Invalid email or password");
            }
            other => panic!("Expected AuthFailed, got: {:?}", other),
        }
        assert!(!client.is_authenticated().await);
    }

    #[tokio::test]
    async fn test_register_falls_back_to_default_message() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/auth/register"))
            .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let result = client.register("user", "user@example.com", "secret").await;

        match result {
            Err(CatalogError::AuthFailed(message)) => assert_eq!(message, "Registration failed"),
            other => panic!("Expected AuthFailed, got: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_register_logs_in() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/auth/register"))
            .and(body_json(serde_json::json!({
                "username": "newbie",
                "email": "new@example.com",
                "password": "secret"
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "_id": "u2",
                "username": "newbie",
                "email": "new@example.com",
                "token": "jwt-new"
            })))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        client
            .register("newbie", "new@example.com", "secret")
            .await
            .unwrap();

        assert_eq!(
            client.session().await.map(|s| s.token),
            Some("jwt-new".to_string())
        );
    }

    #[tokio::test]
    async fn test_logout_clears_session() {
        let client = MellowClient::new(ClientConfig::new("http://localhost:5000/api")).unwrap();
        client.set_session(Session::from_token("jwt")).await;
        assert!(client.is_authenticated().await);

        client.logout().await;
        assert!(!client.is_authenticated().await);
    }
}

// =============================================================================
// Library Tests
// =============================================================================

mod library {
    use super::*;

    #[tokio::test]
    async fn test_get_library_with_bearer_token() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/songs"))
            .and(header("Authorization", "Bearer jwt-123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(songs_json()))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        client.set_session(Session::from_token("jwt-123")).await;

        let tracks = client.get_library().await.unwrap();

        assert_eq!(tracks.len(), 2);
        assert_eq!(tracks[0].id.as_str(), "s1");
        assert_eq!(tracks[0].song_url, "https://cdn.example/s1.mp3");
        assert_eq!(tracks[1].artist_display(), "Shreya Ghoshal, Sonu Nigam");
    }

    #[tokio::test]
    async fn test_get_library_tolerates_virtual_id_and_null_fields() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/songs"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {
                    "_id": "s1",
                    "id": "s1",
                    "title": "Kesariya",
                    "artist": null,
                    "coverUrl": null,
                    "songUrl": "https://cdn.example/s1.mp3"
                }
            ])))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        client.set_session(Session::from_token("jwt")).await;

        let tracks = client.get_library().await.unwrap();

        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].id.as_str(), "s1");
        assert_eq!(tracks[0].artist_display(), "");
        assert!(tracks[0].cover_url.is_empty());
    }

    #[tokio::test]
    async fn test_no_session_returns_empty_without_request() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/songs"))
            .respond_with(ResponseTemplate::new(200).set_body_json(songs_json()))
            .expect(0)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let tracks = client.get_library().await.unwrap();

        assert!(tracks.is_empty());
    }

    #[tokio::test]
    async fn test_expired_token_logs_out() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/songs"))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_json(serde_json::json!({ "message": "Not authorized, token expired" })),
            )
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        client.set_session(Session::from_token("stale")).await;

        let result = client.get_library().await;

        assert!(matches!(result, Err(CatalogError::AuthExpired(_))));
        assert!(!client.is_authenticated().await);
    }

    #[tokio::test]
    async fn test_other_failures_are_fetch_errors() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/songs"))
            .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable"))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        client.set_session(Session::from_token("jwt")).await;

        match client.get_library().await {
            Err(CatalogError::Fetch { status, message }) => {
                assert_eq!(status, 503);
                assert_eq!(message, "Failed to fetch songs");
            }
            other => panic!("Expected Fetch error, got: {:?}", other),
        }
        assert!(client.is_authenticated().await);
    }

    #[tokio::test]
    async fn test_malformed_body_is_parse_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/songs"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        client.set_session(Session::from_token("jwt")).await;

        assert!(matches!(
            client.get_library().await,
            Err(CatalogError::ParseError(_))
        ));
    }

    #[tokio::test]
    async fn test_unreachable_server() {
        let client = MellowClient::new(ClientConfig::new("http://127.0.0.1:9/api")).unwrap();
        client.set_session(Session::from_token("jwt")).await;

        match client.get_library().await {
            Err(CatalogError::ServerUnreachable(_)) | Err(CatalogError::Request(_)) => {}
            other => panic!("Expected ServerUnreachable or Request error, got: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_watch_library_sends_first_fetch_immediately() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/songs"))
            .respond_with(ResponseTemplate::new(200).set_body_json(songs_json()))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        client.set_session(Session::from_token("jwt")).await;

        let (tx, mut rx) = tokio::sync::mpsc::channel(1);
        let watcher = {
            let client = client.clone();
            tokio::spawn(async move { client.watch_library(tx).await })
        };

        let first = rx.recv().await.unwrap().unwrap();
        assert_eq!(first.len(), 2);

        drop(rx);
        watcher.abort();
    }

    #[tokio::test]
    async fn test_watch_library_stops_on_expiry() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/songs"))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_json(serde_json::json!({ "message": "Token expired" })),
            )
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        client.set_session(Session::from_token("stale")).await;

        let (tx, mut rx) = tokio::sync::mpsc::channel(4);
        client.watch_library(tx).await;

        assert!(matches!(rx.recv().await, Some(Err(CatalogError::AuthExpired(_)))));
        assert!(rx.recv().await.is_none());
    }
}
