//! Real-time collaborative scoreboard server.
//!
//! Clients join rooms over WebSocket, submit point-earning events, and
//! receive live leaderboard updates.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin banzuke-server
//! cargo run --bin banzuke-server -- --host 0.0.0.0 --port 3000
//! ```

use std::sync::Arc;

use banzuke_server::{
    infrastructure::{auth::InMemoryTokenService, store::InMemoryStore},
    ui::{Server, state::AppState},
};
use banzuke_shared::logger::setup_logger;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "server")]
#[command(about = "Real-time collaborative scoreboard server", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "8080")]
    port: u16,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();

    // Initialize dependencies in order:
    // 1. Store
    // 2. Token service
    // 3. AppState (publisher, registry, relay supervisor, usecases)
    // 4. Server

    // 1. Create Store (in-memory database)
    let store = Arc::new(InMemoryStore::new());

    // 2. Create token service with the demo credential table
    //    (stand-in for an external identity provider)
    let token_service = Arc::new(InMemoryTokenService::new([
        ("alice".to_string(), "password1".to_string()),
        ("bob".to_string(), "password2".to_string()),
        ("carol".to_string(), "password3".to_string()),
    ]));

    // 3. Assemble the application state
    let state = AppState::assemble(store, token_service.clone(), token_service);

    // 4. Create and run the server
    let server = Server::new(state);
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
