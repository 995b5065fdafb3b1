//! イベント発行のインターフェース定義
//!
//! UseCase 層がストア変更後に部屋へイベントを届けるための出口。
//! 発行の宛先（チャネル名・履歴キー）やシリアライズ形式は
//! Infrastructure 層の実装が決めます。

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use super::{error::StoreError, event::RoomEvent, value_object::RoomKey};

/// 部屋イベントを発行するインターフェース
///
/// 発行は「チャネルへの配信」と「履歴への追記」を含む。購読者が
/// 1 人もいない部屋への発行も正常（配信先 0 件）として成功する。
#[cfg_attr(test, automock)]
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// イベントを部屋のチャネルに発行し、履歴に追記する
    async fn publish(&self, room_key: &RoomKey, event: &RoomEvent) -> Result<(), StoreError>;
}
