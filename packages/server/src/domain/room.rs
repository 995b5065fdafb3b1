//! Read models describing room state assembled from the store.
//!
//! These are query-side views. Member names come back from the store as
//! plain strings and are not re-validated here; every write path has
//! already gone through the value objects.

use std::collections::HashMap;

use super::{
    keys::{META_CREATED_AT, META_OWNER, STAT_MESSAGE_SENT, STAT_SUBMISSION_COUNT},
    value_object::RoomKey,
};

/// Room metadata stored in the meta hash
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomMeta {
    /// Username of the room owner
    pub owner: String,
    /// Creation time as Unix milliseconds
    pub created_at: i64,
}

impl RoomMeta {
    /// Create room metadata
    pub fn new(owner: String, created_at: i64) -> Self {
        Self { owner, created_at }
    }

    /// Parse metadata from a stored hash.
    ///
    /// Returns None when the hash is empty or a required field is
    /// missing or unparsable.
    pub fn from_hash(hash: &HashMap<String, String>) -> Option<Self> {
        let owner = hash.get(META_OWNER)?.clone();
        let created_at = hash.get(META_CREATED_AT)?.parse::<i64>().ok()?;
        Some(Self { owner, created_at })
    }
}

/// One room in the room listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomSummary {
    /// Room key
    pub key: RoomKey,
    /// Room metadata
    pub meta: RoomMeta,
    /// Registered member usernames
    pub members: Vec<String>,
}

/// One row of a room leaderboard, ordered by score descending
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardEntry {
    /// Member username
    pub username: String,
    /// Total score including any first-solver bonuses
    pub score: i64,
}

/// Aggregated room activity counters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoomStats {
    /// Number of chat messages sent in the room
    pub message_sent: i64,
    /// Number of accepted score submissions
    pub submission_count: i64,
    /// Number of users with a live connection right now
    pub active_users: usize,
}

impl RoomStats {
    /// Assemble stats from the stored counter hash and the live-user count.
    ///
    /// Missing or unparsable counters are treated as zero.
    pub fn from_parts(counters: &HashMap<String, String>, active_users: usize) -> Self {
        let parse = |field: &str| {
            counters
                .get(field)
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(0)
        };
        Self {
            message_sent: parse(STAT_MESSAGE_SENT),
            submission_count: parse(STAT_SUBMISSION_COUNT),
            active_users,
        }
    }
}
