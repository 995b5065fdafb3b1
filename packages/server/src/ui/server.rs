//! Server execution logic.

use std::sync::Arc;

use axum::{
    Router,
    routing::{delete, get, post},
};
use tower_http::trace::TraceLayer;

use super::{
    handler::{
        create_room, delete_room, get_leaderboard, get_me, get_room_history, get_room_stats,
        health_check, join_room, list_rooms, login, websocket_handler,
    },
    signal::shutdown_signal,
    state::AppState,
};

/// Real-time scoreboard server
///
/// This struct encapsulates the assembled application state and provides
/// a method to run the server.
///
/// # Example
///
/// ```ignore
/// let state = AppState::assemble(store, token_issuer, token_validator);
/// let server = Server::new(state);
/// server.run("127.0.0.1".to_string(), 8080).await?;
/// ```
pub struct Server {
    /// Shared application state（組み立て済みの依存一式）
    state: Arc<AppState>,
}

impl Server {
    /// Create a new Server instance
    pub fn new(state: Arc<AppState>) -> Self {
        Self { state }
    }

    /// Run the scoreboard server
    ///
    /// # Arguments
    ///
    /// * `host` - The host address to bind to (e.g., "127.0.0.1")
    /// * `port` - The port number to bind to (e.g., 8080)
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address
    /// or if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        // Define handlers
        let app = Router::new()
            // WebSocket エンドポイント
            .route("/ws/{room_key}", get(websocket_handler))
            // 認証エンドポイント
            .route("/auth/login", post(login))
            .route("/auth/me", get(get_me))
            // HTTP エンドポイント
            .route("/api/health", get(health_check))
            .route("/api/rooms", post(create_room).get(list_rooms))
            .route("/api/rooms/{room_key}", delete(delete_room))
            .route("/api/rooms/{room_key}/join", post(join_room))
            .route("/api/rooms/{room_key}/leaderboard", get(get_leaderboard))
            .route("/api/rooms/{room_key}/stats", get(get_room_stats))
            .route("/api/rooms/{room_key}/history", get(get_room_history))
            .layer(TraceLayer::new_for_http())
            .with_state(self.state);

        // Bind the server to the host and port
        let bind_addr = format!("{}:{}", host, port);
        let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

        // Start the server
        tracing::info!(
            "Scoreboard server listening on {}",
            listener.local_addr()?
        );
        tracing::info!("Connect to: ws://{}/ws/{{room_key}}", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        // Set up graceful shutdown signal handler
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
