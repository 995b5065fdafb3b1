//! UseCase: 部屋統計取得処理

use std::sync::Arc;

use crate::domain::{RoomKey, RoomStats, Store, keys};

use super::error::RoomQueryError;

/// 部屋統計取得のユースケース
pub struct GetRoomStatsUseCase {
    /// Store（データアクセス層の抽象化）
    store: Arc<dyn Store>,
}

impl GetRoomStatsUseCase {
    /// 新しい GetRoomStatsUseCase を作成
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// 部屋統計取得を実行
    ///
    /// カウンタ hash と接続中ユーザー数から統計を組み立てる。未設定の
    /// カウンタは 0 として返す。
    ///
    /// # Arguments
    ///
    /// * `room_key` - 対象の部屋キー（Domain Model）
    ///
    /// # Returns
    ///
    /// * `Ok(RoomStats)` - 部屋の統計
    /// * `Err(RoomQueryError)` - ストア操作の失敗
    pub async fn execute(&self, room_key: RoomKey) -> Result<RoomStats, RoomQueryError> {
        let counters = self.store.hash_get_all(&keys::key_stats(&room_key)).await?;
        let active_users = self.store.set_len(&keys::key_users(&room_key)).await?;

        Ok(RoomStats::from_parts(&counters, active_users))
    }
}
