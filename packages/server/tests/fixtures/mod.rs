//! Test fixtures for integration tests.
//!
//! 各テストは実際のサーバーをプロセス内のテスト専用ポートで起動し、
//! reqwest / tokio-tungstenite で外側から叩く。

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use banzuke_server::{
    infrastructure::{auth::InMemoryTokenService, store::InMemoryStore},
    ui::{Server, state::AppState},
};

/// In-process server instance bound to a test-local port.
pub struct TestServer {
    port: u16,
    /// テストから直接観察するための Store への参照
    pub store: Arc<InMemoryStore>,
}

impl TestServer {
    /// Start the server on the given port and wait until it accepts
    /// connections.
    ///
    /// テスト間でポートが重複しないよう、各テストに固有のポートを割り当てる。
    pub async fn start(port: u16) -> Self {
        let store = Arc::new(InMemoryStore::new());
        let token_service = Arc::new(InMemoryTokenService::new([
            ("alice".to_string(), "password1".to_string()),
            ("bob".to_string(), "password2".to_string()),
        ]));
        let state = AppState::assemble(store.clone(), token_service.clone(), token_service);
        let server = Server::new(state);

        tokio::spawn(async move {
            if let Err(e) = server.run("127.0.0.1".to_string(), port).await {
                panic!("Test server failed: {e}");
            }
        });

        // Wait until the listener accepts connections
        for _ in 0..50 {
            if tokio::net::TcpStream::connect(("127.0.0.1", port))
                .await
                .is_ok()
            {
                return Self { port, store };
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        panic!("Test server did not start on port {port}");
    }

    /// Base URL for HTTP requests
    pub fn base_url(&self) -> String {
        format!("http://127.0.0.1:{}", self.port)
    }

    /// WebSocket URL for a room connection
    pub fn ws_url(&self, room_key: &str, username: &str, token: &str) -> String {
        format!(
            "ws://127.0.0.1:{}/ws/{}?username={}&token={}",
            self.port, room_key, username, token
        )
    }

    /// WebSocket URL without query parameters
    pub fn ws_url_bare(&self, room_key: &str) -> String {
        format!("ws://127.0.0.1:{}/ws/{}", self.port, room_key)
    }

    /// Log in over HTTP and return the issued bearer token
    pub async fn login(&self, client: &reqwest::Client, username: &str, password: &str) -> String {
        let response = client
            .post(format!("{}/auth/login", self.base_url()))
            .json(&serde_json::json!({"username": username, "password": password}))
            .send()
            .await
            .expect("Failed to send login request");
        assert_eq!(response.status(), 200, "login should succeed");

        let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
        body["access_token"]
            .as_str()
            .expect("access_token should be a string")
            .to_string()
    }

    /// Create a room as the token's user and return its key
    pub async fn create_room(&self, client: &reqwest::Client, token: &str) -> String {
        let response = client
            .post(format!("{}/api/rooms", self.base_url()))
            .bearer_auth(token)
            .send()
            .await
            .expect("Failed to send create room request");
        assert_eq!(response.status(), 200, "room creation should succeed");

        let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
        body["room_key"]
            .as_str()
            .expect("room_key should be a string")
            .to_string()
    }
}
