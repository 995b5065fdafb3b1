//! UseCase: 部屋削除処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DeleteRoomUseCase::execute() メソッド
//! - 部屋削除処理（オーナー確認、部屋スコープの全キー削除、索引からの除去）
//!
//! ### なぜこのテストが必要か
//! - オーナー以外が部屋を削除できないことを確認
//! - first-solver マーカーを含む部屋スコープの全キーが削除されることを保証
//! - 削除後に部屋一覧から消えることを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：オーナーによる削除
//! - 異常系：存在しない部屋、オーナー以外による削除要求

use std::sync::Arc;

use crate::domain::{
    ProblemId, RoomKey, Store, Username,
    keys::{self, META_OWNER, ROOMS_ALL},
};

use super::error::DeleteRoomError;

/// 部屋削除のユースケース
pub struct DeleteRoomUseCase {
    /// Store（データアクセス層の抽象化）
    store: Arc<dyn Store>,
}

impl DeleteRoomUseCase {
    /// 新しい DeleteRoomUseCase を作成
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// 部屋削除を実行
    ///
    /// 削除できるのはオーナーだけ。接続中のセッションはここでは落とさず、
    /// 各接続の切断時のクリーンアップに任せる。
    ///
    /// # Arguments
    ///
    /// * `room_key` - 削除する部屋キー（Domain Model）
    /// * `requester` - 削除を要求したユーザー名（Domain Model）
    ///
    /// # Returns
    ///
    /// * `Ok(())` - 削除成功
    /// * `Err(DeleteRoomError)` - 部屋が存在しない、権限なし、またはストア操作の失敗
    pub async fn execute(
        &self,
        room_key: RoomKey,
        requester: Username,
    ) -> Result<(), DeleteRoomError> {
        // 1. 存在チェックとオーナー確認
        let meta = self.store.hash_get_all(&keys::key_meta(&room_key)).await?;
        if meta.is_empty() {
            return Err(DeleteRoomError::RoomNotFound);
        }
        if meta.get(META_OWNER).map(String::as_str) != Some(requester.as_str()) {
            return Err(DeleteRoomError::NotOwner);
        }

        // 2. first-solver マーカーのキーを問題索引から列挙
        let mut targets = vec![
            keys::key_meta(&room_key),
            keys::key_members(&room_key),
            keys::key_users(&room_key),
            keys::key_leaderboard(&room_key),
            keys::key_stats(&room_key),
            keys::key_history(&room_key),
            keys::key_problems(&room_key),
        ];
        let problems = self
            .store
            .set_members(&keys::key_problems(&room_key))
            .await?;
        targets.extend(
            problems
                .into_iter()
                .filter_map(|p| ProblemId::new(p).ok())
                .map(|p| keys::key_first_solver(&room_key, &p)),
        );

        // 3. 部屋スコープの全キーを削除し、索引から除去
        self.store.delete(&targets).await?;
        self.store.set_remove(ROOMS_ALL, room_key.as_str()).await?;

        tracing::info!(room_key = %room_key, "room deleted");

        Ok(())
    }
}
