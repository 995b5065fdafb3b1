//! Scoreboard server の UI 層
//!
//! axum のルーティングと HTTP / WebSocket ハンドラを提供します。

mod handler;
mod server;
mod signal;
pub mod state; // テストフィクスチャから組み立てるため public

pub use server::Server;
