//! UseCase: メンバー接続処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ConnectMemberUseCase::execute() メソッド
//! - 接続時の処理（接続中ユーザー set への追加、join イベントの発行）
//!
//! ### なぜこのテストが必要か
//! - 接続中ユーザー set が正しく更新されることを確認
//! - join イベントが部屋に発行されることを保証
//! - プレゼンス更新の失敗が接続自体を落とさないことを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：接続の記録とイベント発行
//! - 異常系：ストア障害（接続は維持される）

use std::sync::Arc;

use crate::domain::{
    EventPublisher, RoomEvent, RoomKey, Store, SystemAction, Timestamp, Username, keys,
};

/// メンバー接続のユースケース
pub struct ConnectMemberUseCase {
    /// Store（データアクセス層の抽象化）
    store: Arc<dyn Store>,
    /// EventPublisher（イベント発行の抽象化）
    event_publisher: Arc<dyn EventPublisher>,
}

impl ConnectMemberUseCase {
    /// 新しい ConnectMemberUseCase を作成
    pub fn new(store: Arc<dyn Store>, event_publisher: Arc<dyn EventPublisher>) -> Self {
        Self {
            store,
            event_publisher,
        }
    }

    /// メンバー接続を実行
    ///
    /// プレゼンス更新は best-effort で、ストア障害が起きても接続自体は
    /// 続行させる。そのためエラーは返さず、ログに残すだけにする。
    ///
    /// # Arguments
    ///
    /// * `room_key` - 接続先の部屋キー（Domain Model）
    /// * `username` - 接続したユーザー名（Domain Model）
    pub async fn execute(&self, room_key: RoomKey, username: Username) {
        use banzuke_shared::time::get_utc_timestamp;

        // 1. 接続中ユーザー set に追加
        if let Err(e) = self
            .store
            .set_add(&keys::key_users(&room_key), username.as_str())
            .await
        {
            tracing::warn!(room_key = %room_key, error = %e, "failed to record live user");
            return;
        }

        // 2. join イベントを発行
        let event = RoomEvent::system(
            SystemAction::Join,
            username,
            Timestamp::new(get_utc_timestamp()),
        );
        if let Err(e) = self.event_publisher.publish(&room_key, &event).await {
            tracing::warn!(room_key = %room_key, error = %e, "failed to publish join event");
        }
    }
}
