//! Store 経由のイベント発行実装
//!
//! UseCase 層が組み立てた RoomEvent をワイヤ表現（JSON）に変換し、
//! 部屋のチャネルへの発行と履歴への追記を 1 回の publish 呼び出しに
//! まとめます。発行の順序は「チャネル → 履歴」で、元のサービスの
//! 発行処理と同じです。

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{
    EventPublisher, RoomEvent, RoomKey, Store, StoreError,
    keys::{self, HISTORY_MAX},
};
use crate::infrastructure::dto::websocket::EventDto;

/// Store のチャネルと履歴 list を使うイベント発行実装
pub struct StoreEventPublisher {
    /// Store（発行先の抽象化）
    store: Arc<dyn Store>,
}

impl StoreEventPublisher {
    /// 新しい StoreEventPublisher を作成
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl EventPublisher for StoreEventPublisher {
    async fn publish(&self, room_key: &RoomKey, event: &RoomEvent) -> Result<(), StoreError> {
        // 1. ドメインイベントをワイヤ表現に変換
        let dto = EventDto::from(event);
        let payload = serde_json::to_string(&dto)
            .map_err(|e| StoreError::Unavailable(format!("failed to encode event: {e}")))?;

        // 2. 部屋のチャネルに発行（購読者 0 件でも正常）
        let delivered = self
            .store
            .publish(&keys::key_events(room_key), &payload)
            .await?;
        tracing::debug!(room_key = %room_key, delivered, "event published");

        // 3. 履歴に追記（上限を超えた古いイベントは捨てられる）
        self.store
            .list_push_trim(&keys::key_history(room_key), &payload, HISTORY_MAX)
            .await?;

        Ok(())
    }
}
