//! UseCase: 部屋参加処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - JoinRoomUseCase::execute() メソッド
//! - 部屋参加処理（存在チェック、メンバー set への追加）
//!
//! ### なぜこのテストが必要か
//! - 存在しない部屋への参加が RoomNotFound になることを確認
//! - 再参加が冪等であること（set なので重複しない）を保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：既存の部屋への参加、同じ部屋への再参加
//! - 異常系：存在しない部屋への参加

use std::sync::Arc;

use crate::domain::{RoomKey, Store, Username, keys};

use super::error::JoinRoomError;

/// 部屋参加のユースケース
pub struct JoinRoomUseCase {
    /// Store（データアクセス層の抽象化）
    store: Arc<dyn Store>,
}

impl JoinRoomUseCase {
    /// 新しい JoinRoomUseCase を作成
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// 部屋参加を実行
    ///
    /// # Arguments
    ///
    /// * `room_key` - 参加先の部屋キー（Domain Model）
    /// * `username` - 参加するユーザー名（Domain Model）
    ///
    /// # Returns
    ///
    /// * `Ok(())` - 参加成功
    /// * `Err(JoinRoomError)` - 部屋が存在しない、またはストア操作の失敗
    pub async fn execute(&self, room_key: RoomKey, username: Username) -> Result<(), JoinRoomError> {
        // 1. 部屋の存在チェック（meta hash があるかで判定）
        if !self.store.key_exists(&keys::key_meta(&room_key)).await? {
            return Err(JoinRoomError::RoomNotFound);
        }

        // 2. メンバー set に追加
        self.store
            .set_add(&keys::key_members(&room_key), username.as_str())
            .await?;

        tracing::info!(room_key = %room_key, username = %username, "user joined room");

        Ok(())
    }
}
