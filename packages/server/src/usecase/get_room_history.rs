//! UseCase: イベント履歴取得処理

use std::sync::Arc;

use crate::domain::{RoomKey, Store, keys};

use super::error::RoomQueryError;

/// イベント履歴取得のユースケース
pub struct GetRoomHistoryUseCase {
    /// Store（データアクセス層の抽象化）
    store: Arc<dyn Store>,
}

impl GetRoomHistoryUseCase {
    /// 新しい GetRoomHistoryUseCase を作成
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// イベント履歴取得を実行
    ///
    /// 新しいイベントが先頭に来る、発行時のままの JSON 文字列を返す。
    /// 保持上限を超えた古いイベントは含まれない。
    ///
    /// # Arguments
    ///
    /// * `room_key` - 対象の部屋キー（Domain Model）
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<String>)` - イベントの JSON 文字列（新しい順）
    /// * `Err(RoomQueryError)` - ストア操作の失敗
    pub async fn execute(&self, room_key: RoomKey) -> Result<Vec<String>, RoomQueryError> {
        let events = self.store.list_range(&keys::key_history(&room_key)).await?;
        Ok(events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Username;
    use crate::infrastructure::{publisher::StoreEventPublisher, store::InMemoryStore};
    use crate::usecase::send_chat::SendChatUseCase;

    fn create_test_room_key() -> RoomKey {
        RoomKey::new("room1".to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_get_room_history_newest_first() {
        // テスト項目: 履歴が新しい順で返される
        // given (前提条件): 2 件のチャットが送信済み
        let store = Arc::new(InMemoryStore::new());
        let publisher = Arc::new(StoreEventPublisher::new(store.clone()));
        let chat = SendChatUseCase::new(store.clone(), publisher);
        let room_key = create_test_room_key();
        let alice = Username::new("alice".to_string()).unwrap();
        chat.execute(room_key.clone(), alice.clone(), "first".to_string())
            .await
            .unwrap();
        chat.execute(room_key.clone(), alice, "second".to_string())
            .await
            .unwrap();
        let usecase = GetRoomHistoryUseCase::new(store);

        // when (操作):
        let result = usecase.execute(room_key).await;

        // then (期待する結果):
        let history = result.unwrap();
        assert_eq!(history.len(), 2);
        assert!(history[0].contains("second"));
        assert!(history[1].contains("first"));
    }

    #[tokio::test]
    async fn test_get_room_history_empty_room() {
        // テスト項目: イベントのない部屋では空の履歴が返される
        // given (前提条件):
        let store = Arc::new(InMemoryStore::new());
        let usecase = GetRoomHistoryUseCase::new(store);

        // when (操作):
        let result = usecase.execute(create_test_room_key()).await;

        // then (期待する結果):
        assert!(result.unwrap().is_empty());
    }
}
