//! UseCase: リーダーボード取得処理

use std::sync::Arc;

use crate::domain::{LeaderboardEntry, RoomKey, Store, keys};

use super::error::RoomQueryError;

/// リーダーボード取得のユースケース
pub struct GetLeaderboardUseCase {
    /// Store（データアクセス層の抽象化）
    store: Arc<dyn Store>,
}

impl GetLeaderboardUseCase {
    /// 新しい GetLeaderboardUseCase を作成
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// リーダーボード取得を実行
    ///
    /// スコア降順（同点はユーザー名昇順）の一覧を返す。部屋が存在しない、
    /// またはまだ誰も送信していない場合は空の一覧になる。
    ///
    /// # Arguments
    ///
    /// * `room_key` - 対象の部屋キー（Domain Model）
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<LeaderboardEntry>)` - リーダーボード
    /// * `Err(RoomQueryError)` - ストア操作の失敗
    pub async fn execute(&self, room_key: RoomKey) -> Result<Vec<LeaderboardEntry>, RoomQueryError> {
        let rows = self
            .store
            .sorted_set_rev_range(&keys::key_leaderboard(&room_key))
            .await?;

        Ok(rows
            .into_iter()
            .map(|(username, score)| LeaderboardEntry { username, score })
            .collect())
    }
}
