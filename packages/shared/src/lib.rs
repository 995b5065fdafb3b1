//! Shared utilities for the banzuke scoreboard workspace.
//!
//! This crate provides logging setup and time helpers used by the server
//! binary and the library crates.

pub mod logger;
pub mod time;
