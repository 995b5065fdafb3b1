//! Real-time collaborative scoreboard server library.
//!
//! Clients join named rooms over WebSocket, submit point-earning events,
//! and receive live leaderboard updates fanned out through a per-room
//! broadcast channel on the backing store.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
