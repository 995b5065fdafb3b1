//! UseCase: 部屋作成処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - CreateRoomUseCase::execute() メソッド
//! - 部屋作成処理（キー生成、メタデータ保存、全部屋索引への登録）
//!
//! ### なぜこのテストが必要か
//! - 作成者がオーナー兼最初のメンバーとして記録されることを確認
//! - 作成した部屋が一覧の索引に載ることを保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：部屋の新規作成
//! - 異常系：ストア障害

use std::sync::Arc;

use crate::domain::{
    RoomKey, RoomKeyFactory, RoomMeta, Store, Username,
    keys::{self, META_CREATED_AT, META_OWNER, ROOMS_ALL},
};

use super::error::CreateRoomError;

/// 部屋作成のユースケース
pub struct CreateRoomUseCase {
    /// Store（データアクセス層の抽象化）
    store: Arc<dyn Store>,
}

impl CreateRoomUseCase {
    /// 新しい CreateRoomUseCase を作成
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// 部屋作成を実行
    ///
    /// # Arguments
    ///
    /// * `owner` - 部屋を作成するユーザー名（Domain Model）
    ///
    /// # Returns
    ///
    /// * `Ok((RoomKey, RoomMeta))` - 作成された部屋のキーとメタデータ
    /// * `Err(CreateRoomError)` - 作成失敗
    pub async fn execute(&self, owner: Username) -> Result<(RoomKey, RoomMeta), CreateRoomError> {
        use banzuke_shared::time::get_utc_timestamp;

        // 1. 新しい部屋キーを生成
        let room_key = RoomKeyFactory::generate()?;
        let meta = RoomMeta::new(owner.as_str().to_string(), get_utc_timestamp());

        // 2. メタデータを保存
        self.store
            .hash_set(
                &keys::key_meta(&room_key),
                &[
                    (META_OWNER.to_string(), meta.owner.clone()),
                    (META_CREATED_AT.to_string(), meta.created_at.to_string()),
                ],
            )
            .await?;

        // 3. 作成者を最初のメンバーとして登録
        self.store
            .set_add(&keys::key_members(&room_key), owner.as_str())
            .await?;

        // 4. 全部屋索引に登録
        self.store.set_add(ROOMS_ALL, room_key.as_str()).await?;

        tracing::info!(room_key = %room_key, owner = %owner, "room created");

        Ok((room_key, meta))
    }
}
