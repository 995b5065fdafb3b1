//! 接続レジストリ
//!
//! ## 責務
//!
//! - 部屋ごとの接続中 WebSocket の `UnboundedSender` を管理
//! - 中継ワーカーへの送信先スナップショットの提供
//! - 部屋の最後の接続が消えたことの検知
//!
//! ## 設計ノート
//!
//! WebSocket の生成は UI 層（`src/ui/handler/websocket.rs`）で行われます。
//! このレジストリは生成された `UnboundedSender` を受け取り、保持するだけです。
//! 接続 ID は接続ごとに採番されるので、同じユーザーが同じ部屋に複数接続
//! していても互いに上書きしません。

use std::collections::HashMap;

use tokio::sync::{Mutex, mpsc::UnboundedSender};
use uuid::Uuid;

use crate::domain::RoomKey;

/// 接続へテキストフレームを流し込むチャネル
pub type ConnectionSender = UnboundedSender<String>;

/// 部屋ごとの接続レジストリ
///
/// ## フィールド
///
/// - `rooms`: 部屋キー -> (接続 ID -> sender) のマップ
pub struct ConnectionRegistry {
    /// 部屋ごとの接続中クライアントの sender
    rooms: Mutex<HashMap<RoomKey, HashMap<Uuid, ConnectionSender>>>,
}

impl ConnectionRegistry {
    /// 新しい ConnectionRegistry を作成
    pub fn new() -> Self {
        Self {
            rooms: Mutex::new(HashMap::new()),
        }
    }

    /// 接続を登録する
    ///
    /// 同じ接続 ID での再登録は sender を置き換える。
    pub async fn register(&self, room_key: RoomKey, conn_id: Uuid, sender: ConnectionSender) {
        let mut rooms = self.rooms.lock().await;
        rooms.entry(room_key.clone()).or_default().insert(conn_id, sender);
        tracing::debug!(room_key = %room_key, %conn_id, "connection registered");
    }

    /// 接続を登録解除する
    ///
    /// # Returns
    ///
    /// この解除で部屋の接続が 0 になった場合のみ true。既に解除済みの
    /// 接続や未知の部屋では false を返すので、戻り値を部屋の後始末の
    /// 引き金として重複なく使える。
    pub async fn unregister(&self, room_key: &RoomKey, conn_id: &Uuid) -> bool {
        let mut rooms = self.rooms.lock().await;
        let Some(conns) = rooms.get_mut(room_key) else {
            return false;
        };
        if conns.remove(conn_id).is_none() {
            return false;
        }
        tracing::debug!(room_key = %room_key, %conn_id, "connection unregistered");
        if conns.is_empty() {
            rooms.remove(room_key);
            return true;
        }
        false
    }

    /// 部屋の全接続の sender を複製して返す
    ///
    /// 中継ワーカーはこのスナップショットに対して送信するので、送信中に
    /// レジストリのロックを保持しない。
    pub async fn snapshot(&self, room_key: &RoomKey) -> Vec<ConnectionSender> {
        let rooms = self.rooms.lock().await;
        rooms
            .get(room_key)
            .map(|conns| conns.values().cloned().collect())
            .unwrap_or_default()
    }

    /// 部屋の接続数を取得する
    pub async fn connection_count(&self, room_key: &RoomKey) -> usize {
        let rooms = self.rooms.lock().await;
        rooms.get(room_key).map(HashMap::len).unwrap_or(0)
    }
}

impl Default for ConnectionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    fn create_test_room_key(key: &str) -> RoomKey {
        RoomKey::new(key.to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_register_and_snapshot() {
        // テスト項目: 登録した接続の sender がスナップショットに含まれる
        // given (前提条件):
        let registry = ConnectionRegistry::new();
        let room_key = create_test_room_key("room1");
        let (tx, mut rx) = mpsc::unbounded_channel();

        // when (操作):
        registry.register(room_key.clone(), Uuid::new_v4(), tx).await;
        let senders = registry.snapshot(&room_key).await;

        // then (期待する結果):
        assert_eq!(senders.len(), 1);
        senders[0].send("hello".to_string()).unwrap();
        assert_eq!(rx.recv().await, Some("hello".to_string()));
    }

    #[tokio::test]
    async fn test_connection_count_per_room() {
        // テスト項目: 接続数が部屋ごとに数えられる
        // given (前提条件):
        let registry = ConnectionRegistry::new();
        let room1 = create_test_room_key("room1");
        let room2 = create_test_room_key("room2");

        // when (操作): room1 に 2 接続、room2 に 1 接続
        let (tx1, _rx1) = mpsc::unbounded_channel();
        let (tx2, _rx2) = mpsc::unbounded_channel();
        let (tx3, _rx3) = mpsc::unbounded_channel();
        registry.register(room1.clone(), Uuid::new_v4(), tx1).await;
        registry.register(room1.clone(), Uuid::new_v4(), tx2).await;
        registry.register(room2.clone(), Uuid::new_v4(), tx3).await;

        // then (期待する結果):
        assert_eq!(registry.connection_count(&room1).await, 2);
        assert_eq!(registry.connection_count(&room2).await, 1);
    }

    #[tokio::test]
    async fn test_unregister_signals_empty_room_once() {
        // テスト項目: 部屋が空になった解除だけが true を返す
        // given (前提条件): 2 接続が登録済み
        let registry = ConnectionRegistry::new();
        let room_key = create_test_room_key("room1");
        let conn1 = Uuid::new_v4();
        let conn2 = Uuid::new_v4();
        let (tx1, _rx1) = mpsc::unbounded_channel();
        let (tx2, _rx2) = mpsc::unbounded_channel();
        registry.register(room_key.clone(), conn1, tx1).await;
        registry.register(room_key.clone(), conn2, tx2).await;

        // when (操作) / then (期待する結果):
        // 1 接続目の解除では部屋はまだ空でない
        assert!(!registry.unregister(&room_key, &conn1).await);
        // 2 接続目の解除で部屋が空になる
        assert!(registry.unregister(&room_key, &conn2).await);
        assert_eq!(registry.connection_count(&room_key).await, 0);
    }

    #[tokio::test]
    async fn test_unregister_twice_returns_false() {
        // テスト項目: 解除済みの接続を再度解除しても true にならない
        // given (前提条件):
        let registry = ConnectionRegistry::new();
        let room_key = create_test_room_key("room1");
        let conn_id = Uuid::new_v4();
        let (tx, _rx) = mpsc::unbounded_channel();
        registry.register(room_key.clone(), conn_id, tx).await;

        // when (操作):
        let first = registry.unregister(&room_key, &conn_id).await;
        let second = registry.unregister(&room_key, &conn_id).await;

        // then (期待する結果): 後始末の引き金は 1 回だけ
        assert!(first);
        assert!(!second);
    }

    #[tokio::test]
    async fn test_snapshot_of_unknown_room_is_empty() {
        // テスト項目: 未知の部屋のスナップショットは空
        // given (前提条件):
        let registry = ConnectionRegistry::new();

        // when (操作):
        let senders = registry.snapshot(&create_test_room_key("missing")).await;

        // then (期待する結果):
        assert!(senders.is_empty());
    }
}
