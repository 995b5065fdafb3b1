//! Conversion logic between DTOs and domain models.

use banzuke_shared::time::timestamp_to_rfc3339_utc;

use crate::domain::{LeaderboardEntry, RoomEvent, RoomSummary};
use crate::infrastructure::dto::{http, websocket as dto};

// ========================================
// Domain Model → WebSocket DTO
// ========================================

impl From<&RoomEvent> for dto::EventDto {
    fn from(event: &RoomEvent) -> Self {
        match event {
            RoomEvent::System {
                action,
                username,
                timestamp,
            } => dto::EventDto::System {
                action: action.as_str().to_string(),
                username: username.as_str().to_string(),
                timestamp: timestamp_to_rfc3339_utc(timestamp.value()),
            },
            RoomEvent::Chat {
                username,
                message,
                timestamp,
            } => dto::EventDto::Chat {
                username: username.as_str().to_string(),
                message: message.as_str().to_string(),
                timestamp: timestamp_to_rfc3339_utc(timestamp.value()),
            },
            RoomEvent::Submission {
                username,
                problem_id,
                points,
                new_score,
                bonus_awarded,
                timestamp,
            } => dto::EventDto::Submission {
                username: username.as_str().to_string(),
                problem_id: problem_id.as_str().to_string(),
                points: *points,
                new_score: *new_score,
                bonus_awarded: *bonus_awarded,
                timestamp: timestamp_to_rfc3339_utc(timestamp.value()),
            },
        }
    }
}

// ========================================
// Domain Model → HTTP DTO
// ========================================

impl From<RoomSummary> for http::RoomSummaryDto {
    fn from(summary: RoomSummary) -> Self {
        Self {
            room_key: summary.key.into_string(),
            owner: summary.meta.owner,
            created_at: timestamp_to_rfc3339_utc(summary.meta.created_at),
            members: summary.members,
        }
    }
}

impl From<LeaderboardEntry> for http::LeaderboardEntryDto {
    fn from(entry: LeaderboardEntry) -> Self {
        Self {
            username: entry.username,
            score: entry.score,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        MessageText, ProblemId, RoomKey, RoomMeta, SystemAction, Timestamp, Username,
    };

    #[test]
    fn test_system_event_to_dto() {
        // テスト項目: System イベントが DTO に変換される
        // given (前提条件):
        let event = RoomEvent::system(
            SystemAction::Join,
            Username::new("alice".to_string()).unwrap(),
            Timestamp::new(0),
        );

        // when (操作):
        let dto: dto::EventDto = (&event).into();

        // then (期待する結果):
        assert_eq!(
            dto,
            dto::EventDto::System {
                action: "join".to_string(),
                username: "alice".to_string(),
                timestamp: "1970-01-01T00:00:00+00:00".to_string(),
            }
        );
    }

    #[test]
    fn test_chat_event_to_dto() {
        // テスト項目: Chat イベントが DTO に変換される
        // given (前提条件):
        let event = RoomEvent::chat(
            Username::new("alice".to_string()).unwrap(),
            MessageText::new("Hello!".to_string()).unwrap(),
            Timestamp::new(1000),
        );

        // when (操作):
        let dto: dto::EventDto = (&event).into();

        // then (期待する結果):
        match dto {
            dto::EventDto::Chat {
                username,
                message,
                timestamp,
            } => {
                assert_eq!(username, "alice");
                assert_eq!(message, "Hello!");
                assert_eq!(timestamp, "1970-01-01T00:00:01+00:00");
            }
            _ => panic!("expected chat dto"),
        }
    }

    #[test]
    fn test_submission_event_to_dto() {
        // テスト項目: Submission イベントの得点情報が DTO に引き継がれる
        // given (前提条件):
        let event = RoomEvent::submission(
            Username::new("alice".to_string()).unwrap(),
            ProblemId::new("p1".to_string()).unwrap(),
            5,
            5,
            true,
            Timestamp::new(0),
        );

        // when (操作):
        let dto: dto::EventDto = (&event).into();

        // then (期待する結果):
        match dto {
            dto::EventDto::Submission {
                points,
                new_score,
                bonus_awarded,
                ..
            } => {
                assert_eq!(points, 5);
                assert_eq!(new_score, 5);
                assert!(bonus_awarded);
            }
            _ => panic!("expected submission dto"),
        }
    }

    #[test]
    fn test_room_summary_to_dto() {
        // テスト項目: RoomSummary が HTTP DTO に変換される
        // given (前提条件):
        let summary = RoomSummary {
            key: RoomKey::new("abc123".to_string()).unwrap(),
            meta: RoomMeta::new("alice".to_string(), 0),
            members: vec!["alice".to_string(), "bob".to_string()],
        };

        // when (操作):
        let dto: http::RoomSummaryDto = summary.into();

        // then (期待する結果):
        assert_eq!(dto.room_key, "abc123");
        assert_eq!(dto.owner, "alice");
        assert_eq!(dto.created_at, "1970-01-01T00:00:00+00:00");
        assert_eq!(dto.members, vec!["alice".to_string(), "bob".to_string()]);
    }
}
