//! 認証のインターフェース定義
//!
//! トークンの発行と検証を Infrastructure 層の実装から切り離します。
//! WebSocket の入室審査と HTTP API の両方がこの trait 経由で認証します。

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use super::{error::AuthError, value_object::Username};

/// アクセストークンを検証するインターフェース
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TokenValidator: Send + Sync {
    /// トークンを検証し、対応するユーザー名を返す
    ///
    /// # Errors
    ///
    /// トークンが未知・失効している場合は `AuthError::InvalidToken`
    async fn validate(&self, token: &str) -> Result<Username, AuthError>;
}

/// 資格情報を検証してアクセストークンを発行するインターフェース
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TokenIssuer: Send + Sync {
    /// ユーザー名とパスワードを検証し、新しいアクセストークンを返す
    ///
    /// # Errors
    ///
    /// 資格情報が一致しない場合は `AuthError::InvalidCredentials`
    async fn login(&self, username: &str, password: &str) -> Result<String, AuthError>;
}
