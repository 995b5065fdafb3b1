//! WebSocket message DTOs for the scoreboard service.

use serde::{Deserialize, Serialize};

/// Inbound command sent by a client over an established connection.
///
/// `submission` fields are optional on the wire; missing fields fall back
/// to defaults and are rejected later by the scoring validation gate
/// instead of failing deserialization.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientCommand {
    /// Chat message to relay to the room
    Chat {
        /// Message body
        message: String,
    },
    /// Score submission
    Submission {
        /// Problem identifier
        #[serde(default)]
        problem_id: String,
        /// Claimed points
        #[serde(default)]
        points: i64,
    },
}

/// Outbound room event broadcast to every connection in a room
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventDto {
    /// Presence change
    System {
        /// "join" or "leave"
        action: String,
        username: String,
        timestamp: String, // RFC 3339 UTC
    },
    /// Chat message
    Chat {
        username: String,
        message: String,
        timestamp: String, // RFC 3339 UTC
    },
    /// Accepted score submission
    Submission {
        username: String,
        problem_id: String,
        points: i64,
        new_score: i64,
        bonus_awarded: bool,
        timestamp: String, // RFC 3339 UTC
    },
}

/// Error reply sent directly to one connection, never broadcast
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorReply {
    pub r#type: String,
    pub reason: String,
}

impl ErrorReply {
    /// Create an error reply with the fixed "error" type tag
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            r#type: "error".to_string(),
            reason: reason.into(),
        }
    }
}
