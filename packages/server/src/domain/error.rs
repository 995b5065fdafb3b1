//! Domain layer error definitions.

use thiserror::Error;

/// Errors related to Value Objects validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueObjectError {
    /// RoomKey validation error
    #[error("RoomKey cannot be empty")]
    RoomKeyEmpty,

    /// RoomKey too long error
    #[error("RoomKey cannot exceed {max} characters (got {actual})")]
    RoomKeyTooLong { max: usize, actual: usize },

    /// Username validation error
    #[error("Username cannot be empty")]
    UsernameEmpty,

    /// Username too long error
    #[error("Username cannot exceed {max} characters (got {actual})")]
    UsernameTooLong { max: usize, actual: usize },

    /// MessageText validation error
    #[error("MessageText cannot be empty")]
    MessageTextEmpty,

    /// MessageText too long error
    #[error("MessageText cannot exceed {max} characters (got {actual})")]
    MessageTextTooLong { max: usize, actual: usize },

    /// ProblemId validation error
    #[error("ProblemId cannot be empty")]
    ProblemIdEmpty,

    /// ProblemId too long error
    #[error("ProblemId cannot exceed {max} characters (got {actual})")]
    ProblemIdTooLong { max: usize, actual: usize },
}

/// Errors returned by the external Store collaborator.
///
/// Store 呼び出しの失敗はこのエラーに集約されます。ベストエフォート経路
/// （退室処理・イベント通知）では握りつぶしてログに残し、スコアに影響する
/// 経路では呼び出し元へ伝播させます。
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Store backend unavailable or the operation failed
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Errors returned by the external auth collaborator.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Credentials did not match any known user
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Token was not issued by this service or has been revoked
    #[error("Invalid token")]
    InvalidToken,
}
