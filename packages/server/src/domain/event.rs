//! Core domain events flowing through scoreboard rooms.

use super::value_object::{MessageText, ProblemId, Timestamp, Username};

/// Bonus points awarded to the first user to solve a problem in a room
pub const FIRST_SOLVER_BONUS: i64 = 10;

/// Kind of presence change announced to a room
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemAction {
    /// A user joined the room
    Join,
    /// A user left the room
    Leave,
}

impl SystemAction {
    /// Get the wire representation of the action
    pub fn as_str(&self) -> &'static str {
        match self {
            SystemAction::Join => "join",
            SystemAction::Leave => "leave",
        }
    }
}

/// An event broadcast to every live connection in a room.
///
/// Events are produced by the usecase layer after the corresponding
/// store mutation has been applied, so subscribers always observe
/// state that is at least as new as the event they received.
#[derive(Debug, Clone, PartialEq)]
pub enum RoomEvent {
    /// Presence change (join / leave)
    System {
        /// What happened
        action: SystemAction,
        /// Who joined or left
        username: Username,
        /// When the change happened
        timestamp: Timestamp,
    },
    /// Chat message relayed to the room
    Chat {
        /// Sender's username
        username: Username,
        /// Message content
        message: MessageText,
        /// When the message was sent
        timestamp: Timestamp,
    },
    /// Accepted score submission, including the resulting total
    Submission {
        /// Submitter's username
        username: Username,
        /// Problem the submission is for
        problem_id: ProblemId,
        /// Points carried by this submission
        points: i64,
        /// Submitter's base score after this submission (bonus excluded)
        new_score: i64,
        /// Whether this submission claimed the first-solver bonus
        bonus_awarded: bool,
        /// When the submission was recorded
        timestamp: Timestamp,
    },
}

impl RoomEvent {
    /// Create a system (presence) event
    pub fn system(action: SystemAction, username: Username, timestamp: Timestamp) -> Self {
        Self::System {
            action,
            username,
            timestamp,
        }
    }

    /// Create a chat event
    pub fn chat(username: Username, message: MessageText, timestamp: Timestamp) -> Self {
        Self::Chat {
            username,
            message,
            timestamp,
        }
    }

    /// Create a submission event
    pub fn submission(
        username: Username,
        problem_id: ProblemId,
        points: i64,
        new_score: i64,
        bonus_awarded: bool,
        timestamp: Timestamp,
    ) -> Self {
        Self::Submission {
            username,
            problem_id,
            points,
            new_score,
            bonus_awarded,
            timestamp,
        }
    }

    /// Get the username the event originates from
    pub fn username(&self) -> &Username {
        match self {
            RoomEvent::System { username, .. } => username,
            RoomEvent::Chat { username, .. } => username,
            RoomEvent::Submission { username, .. } => username,
        }
    }

    /// Get the timestamp the event was produced at
    pub fn timestamp(&self) -> Timestamp {
        match self {
            RoomEvent::System { timestamp, .. } => *timestamp,
            RoomEvent::Chat { timestamp, .. } => *timestamp,
            RoomEvent::Submission { timestamp, .. } => *timestamp,
        }
    }
}

/// Outcome of an accepted score submission.
///
/// Carried from the scoring usecase back to the caller so handlers can
/// log the result without re-reading the leaderboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionOutcome {
    /// Submitter's base score after the submission (bonus excluded)
    pub new_score: i64,
    /// Whether the first-solver bonus was claimed by this submission
    pub bonus_awarded: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_username(name: &str) -> Username {
        Username::new(name.to_string()).unwrap()
    }

    #[test]
    fn test_system_action_as_str() {
        // テスト項目: SystemAction がワイヤ表現の文字列に変換される
        assert_eq!(SystemAction::Join.as_str(), "join");
        assert_eq!(SystemAction::Leave.as_str(), "leave");
    }

    #[test]
    fn test_room_event_system() {
        // テスト項目: join の System イベントを作成できる
        // given (前提条件):
        let username = create_test_username("alice");
        let timestamp = Timestamp::new(1000);

        // when (操作):
        let event = RoomEvent::system(SystemAction::Join, username.clone(), timestamp);

        // then (期待する結果):
        assert_eq!(event.username(), &username);
        assert_eq!(event.timestamp(), timestamp);
        match event {
            RoomEvent::System { action, .. } => assert_eq!(action, SystemAction::Join),
            _ => panic!("expected System event"),
        }
    }

    #[test]
    fn test_room_event_chat() {
        // テスト項目: Chat イベントを作成できる
        // given (前提条件):
        let username = create_test_username("alice");
        let message = MessageText::new("Hello!".to_string()).unwrap();
        let timestamp = Timestamp::new(2000);

        // when (操作):
        let event = RoomEvent::chat(username.clone(), message.clone(), timestamp);

        // then (期待する結果):
        match event {
            RoomEvent::Chat {
                username: u,
                message: m,
                timestamp: t,
            } => {
                assert_eq!(u, username);
                assert_eq!(m, message);
                assert_eq!(t, timestamp);
            }
            _ => panic!("expected Chat event"),
        }
    }

    #[test]
    fn test_room_event_submission() {
        // テスト項目: Submission イベントに得点の結果が保持される
        // given (前提条件):
        let username = create_test_username("alice");
        let problem_id = ProblemId::new("p1".to_string()).unwrap();
        let timestamp = Timestamp::new(3000);

        // when (操作):
        let event = RoomEvent::submission(username, problem_id, 5, 5, true, timestamp);

        // then (期待する結果):
        match event {
            RoomEvent::Submission {
                points,
                new_score,
                bonus_awarded,
                ..
            } => {
                assert_eq!(points, 5);
                assert_eq!(new_score, 5);
                assert!(bonus_awarded);
            }
            _ => panic!("expected Submission event"),
        }
    }

    #[test]
    fn test_first_solver_bonus_value() {
        // テスト項目: 最初の正解者ボーナスは 10 点
        assert_eq!(FIRST_SOLVER_BONUS, 10);
    }
}
