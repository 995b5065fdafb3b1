//! InMemory トークンサービス実装
//!
//! 固定の資格情報テーブルと uuid ベースの bearer トークンで
//! TokenIssuer / TokenValidator を実装します。外部の認証基盤の
//! 置き換え先で、元のサービスのダミーユーザー表に相当します。
//!
//! ## 技術的負債
//!
//! トークンに有効期限がなく、プロセスを再起動すると全トークンが
//! 失効します。外部の IdP か JWT 検証への差し替えを想定しています。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::domain::{AuthError, TokenIssuer, TokenValidator, Username};

/// 固定資格情報と発行済みトークンを保持するトークンサービス
pub struct InMemoryTokenService {
    /// ユーザー名 -> パスワード
    credentials: HashMap<String, String>,
    /// 発行済みトークン -> ユーザー名
    tokens: Mutex<HashMap<String, String>>,
}

impl InMemoryTokenService {
    /// 資格情報テーブルからトークンサービスを作成
    pub fn new(credentials: impl IntoIterator<Item = (String, String)>) -> Self {
        Self {
            credentials: credentials.into_iter().collect(),
            tokens: Mutex::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl TokenIssuer for InMemoryTokenService {
    async fn login(&self, username: &str, password: &str) -> Result<String, AuthError> {
        match self.credentials.get(username) {
            Some(expected) if expected == password => {
                let token = Uuid::new_v4().to_string();
                let mut tokens = self.tokens.lock().await;
                tokens.insert(token.clone(), username.to_string());
                tracing::debug!(username, "access token issued");
                Ok(token)
            }
            _ => Err(AuthError::InvalidCredentials),
        }
    }
}

#[async_trait]
impl TokenValidator for InMemoryTokenService {
    async fn validate(&self, token: &str) -> Result<Username, AuthError> {
        let tokens = self.tokens.lock().await;
        let username = tokens.get(token).ok_or(AuthError::InvalidToken)?;
        Username::new(username.clone()).map_err(|_| AuthError::InvalidToken)
    }
}
