//! UseCase: メンバー切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectMemberUseCase::execute() メソッド
//! - 切断時の処理（接続中ユーザー set からの削除、leave イベントの発行）
//!
//! ### なぜこのテストが必要か
//! - 接続中ユーザー set が正しく更新されることを確認
//! - leave イベントが部屋に発行されることを保証
//! - 切断処理の失敗がクリーンアップ全体を止めないことを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：切断の記録とイベント発行
//! - 異常系：ストア障害（クリーンアップは続行される）

use std::sync::Arc;

use crate::domain::{
    EventPublisher, RoomEvent, RoomKey, Store, SystemAction, Timestamp, Username, keys,
};

/// メンバー切断のユースケース
pub struct DisconnectMemberUseCase {
    /// Store（データアクセス層の抽象化）
    store: Arc<dyn Store>,
    /// EventPublisher（イベント発行の抽象化）
    event_publisher: Arc<dyn EventPublisher>,
}

impl DisconnectMemberUseCase {
    /// 新しい DisconnectMemberUseCase を作成
    pub fn new(store: Arc<dyn Store>, event_publisher: Arc<dyn EventPublisher>) -> Self {
        Self {
            store,
            event_publisher,
        }
    }

    /// メンバー切断を実行
    ///
    /// 切断時のクリーンアップは best-effort で、途中の失敗があっても
    /// 後続の処理を止めない。そのためエラーは返さず、ログに残すだけにする。
    ///
    /// # Arguments
    ///
    /// * `room_key` - 切断元の部屋キー（Domain Model）
    /// * `username` - 切断したユーザー名（Domain Model）
    pub async fn execute(&self, room_key: RoomKey, username: Username) {
        use banzuke_shared::time::get_utc_timestamp;

        // 1. 接続中ユーザー set から削除
        if let Err(e) = self
            .store
            .set_remove(&keys::key_users(&room_key), username.as_str())
            .await
        {
            tracing::warn!(room_key = %room_key, error = %e, "failed to remove live user");
        }

        // 2. leave イベントを発行
        let event = RoomEvent::system(
            SystemAction::Leave,
            username,
            Timestamp::new(get_utc_timestamp()),
        );
        if let Err(e) = self.event_publisher.publish(&room_key, &event).await {
            tracing::warn!(room_key = %room_key, error = %e, "failed to publish leave event");
        }
    }
}
