//! UseCase: チャット送信処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SendChatUseCase::execute() メソッド
//! - チャット送信処理（内容の検証、送信数カウンタ、イベント発行）
//!
//! ### なぜこのテストが必要か
//! - 不正な内容（空文字、長すぎる本文）がエラーとして返されることを確認
//! - message_sent カウンタがチャットでのみ加算されることを保証
//! - イベント発行の失敗がチャット送信自体を失敗させないことを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：チャット送信とイベント発行
//! - 異常系：検証エラー、ストア障害

use std::sync::Arc;

use crate::domain::{
    EventPublisher, MessageText, RoomEvent, RoomKey, Store, Timestamp, Username,
    keys::{self, STAT_MESSAGE_SENT},
};

use super::error::SendChatError;

/// チャット送信のユースケース
pub struct SendChatUseCase {
    /// Store（データアクセス層の抽象化）
    store: Arc<dyn Store>,
    /// EventPublisher（イベント発行の抽象化）
    event_publisher: Arc<dyn EventPublisher>,
}

impl SendChatUseCase {
    /// 新しい SendChatUseCase を作成
    pub fn new(store: Arc<dyn Store>, event_publisher: Arc<dyn EventPublisher>) -> Self {
        Self {
            store,
            event_publisher,
        }
    }

    /// チャット送信を実行
    ///
    /// # Arguments
    ///
    /// * `room_key` - 送信先の部屋キー（Domain Model）
    /// * `username` - 送信者のユーザー名（Domain Model）
    /// * `message` - メッセージ本文（未検証のワイヤ値）
    ///
    /// # Returns
    ///
    /// * `Ok(())` - 送信成功
    /// * `Err(SendChatError)` - 検証エラーまたはストア操作の失敗
    pub async fn execute(
        &self,
        room_key: RoomKey,
        username: Username,
        message: String,
    ) -> Result<(), SendChatError> {
        use banzuke_shared::time::get_utc_timestamp;

        // 1. メッセージ内容を検証
        let message = MessageText::new(message)?;

        // 2. チャット送信数カウンタを加算
        self.store
            .hash_incr(&keys::key_stats(&room_key), STAT_MESSAGE_SENT, 1)
            .await?;

        // 3. チャットイベントを発行（発行失敗は送信自体を失敗にしない）
        let event = RoomEvent::chat(username, message, Timestamp::new(get_utc_timestamp()));
        if let Err(e) = self.event_publisher.publish(&room_key, &event).await {
            tracing::warn!(room_key = %room_key, error = %e, "failed to publish chat event");
        }

        Ok(())
    }
}
