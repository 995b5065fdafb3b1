//! UseCase: 部屋一覧取得処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ListRoomsUseCase::execute() メソッド
//! - 部屋一覧の取得（閲覧者がメンバーの部屋だけに絞り込み）
//!
//! ### なぜこのテストが必要か
//! - メンバーでない部屋が一覧に出ないことを確認
//! - 壊れたメタデータの部屋が一覧を壊さず、スキップされることを保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：複数の部屋からの絞り込み
//! - エッジケース：部屋なし、メタデータ破損

use std::sync::Arc;

use crate::domain::{
    RoomKey, RoomMeta, RoomSummary, Store, Username,
    keys::{self, ROOMS_ALL},
};

use super::error::RoomQueryError;

/// 部屋一覧取得のユースケース
pub struct ListRoomsUseCase {
    /// Store（データアクセス層の抽象化）
    store: Arc<dyn Store>,
}

impl ListRoomsUseCase {
    /// 新しい ListRoomsUseCase を作成
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// 部屋一覧取得を実行
    ///
    /// 閲覧者がメンバーとして登録されている部屋だけを返す。索引やメタデータの
    /// 壊れたエントリは一覧全体を失敗させず、ログに残してスキップする。
    ///
    /// # Arguments
    ///
    /// * `viewer` - 一覧を要求したユーザー名（Domain Model）
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<RoomSummary>)` - 部屋キー順にソートされた一覧
    /// * `Err(RoomQueryError)` - ストア操作の失敗
    pub async fn execute(&self, viewer: Username) -> Result<Vec<RoomSummary>, RoomQueryError> {
        // 1. 全部屋索引を取得
        let all_keys = self.store.set_members(ROOMS_ALL).await?;

        // 2. 閲覧者がメンバーの部屋だけを組み立てる
        let mut summaries = Vec::new();
        for raw_key in all_keys {
            let Ok(room_key) = RoomKey::new(raw_key.clone()) else {
                tracing::warn!(raw_key, "skipping room with invalid key in index");
                continue;
            };
            if !self
                .store
                .set_contains(&keys::key_members(&room_key), viewer.as_str())
                .await?
            {
                continue;
            }

            let raw_meta = self.store.hash_get_all(&keys::key_meta(&room_key)).await?;
            let Some(meta) = RoomMeta::from_hash(&raw_meta) else {
                tracing::warn!(room_key = %room_key, "skipping room with corrupt metadata");
                continue;
            };
            let members = self
                .store
                .set_members(&keys::key_members(&room_key))
                .await?;

            summaries.push(RoomSummary {
                key: room_key,
                meta,
                members,
            });
        }

        // 3. 出力順を安定させる
        summaries.sort_by(|a, b| a.key.as_str().cmp(b.key.as_str()));

        Ok(summaries)
    }
}
