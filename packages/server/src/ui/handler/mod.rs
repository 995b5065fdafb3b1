//! HTTP / WebSocket handlers.

mod http;
mod websocket;

pub use http::{
    create_room, delete_room, get_leaderboard, get_me, get_room_history, get_room_stats,
    health_check, join_room, list_rooms, login,
};
pub use websocket::websocket_handler;
