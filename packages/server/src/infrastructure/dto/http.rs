//! HTTP API request/response DTOs for the scoreboard service.

use serde::{Deserialize, Serialize};

/// Login request body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login response with the issued access token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String, // always "bearer"
}

/// Identity response for the current token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeResponse {
    pub username: String,
}

/// Response for room creation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRoomResponse {
    pub room_key: String,
    pub owner: String,
}

/// Room summary for the room listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomSummaryDto {
    pub room_key: String,
    pub owner: String,
    pub created_at: String, // RFC 3339 UTC
    pub members: Vec<String>,
}

/// Room listing response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListRoomsResponse {
    pub rooms: Vec<RoomSummaryDto>,
}

/// Response for joining a room
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JoinRoomResponse {
    pub message: String,
}

/// Response for deleting a room
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteRoomResponse {
    pub message: String,
}

/// One leaderboard row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardEntryDto {
    pub username: String,
    pub score: i64,
}

/// Leaderboard response, sorted by score descending
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardResponse {
    pub room_key: String,
    pub leaderboard: Vec<LeaderboardEntryDto>,
}

/// Room stats response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomStatsResponse {
    pub room_key: String,
    pub active_users: usize,
    pub message_sent: i64,
    pub submission_count: i64,
}

/// Recent event history response, newest first
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryResponse {
    pub room_key: String,
    pub events: Vec<serde_json::Value>,
}

/// Error body carried by non-2xx responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub detail: String,
}

impl ErrorDetail {
    /// Create an error body
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}
