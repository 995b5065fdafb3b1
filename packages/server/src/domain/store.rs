//! Store trait 定義
//!
//! ドメイン層が必要とするデータアクセスのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。
//!
//! インターフェースは Redis のプリミティブ（hash / set / sorted set /
//! list / string / pub/sub）に揃えてあり、実装をインメモリから
//! Redis クライアントへ差し替えても上位層は変更不要です。

use std::collections::HashMap;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use super::error::StoreError;

/// キーバリューストアへのインターフェース
///
/// UseCase 層はこの trait に依存し、Infrastructure 層の具体的な実装には
/// 依存しない。各操作は Redis の同名コマンドと同じ意味を持つ。
///
/// ## 原子性
///
/// 1 つの操作（特に `hash_incr` / `sorted_set_incr` / `set_if_absent`）は
/// 実装側で単独の原子的操作として扱われる。複数操作にまたがる原子性は
/// 提供しないので、順序依存は呼び出し側（UseCase 層）が設計する。
#[cfg_attr(test, automock)]
#[async_trait]
pub trait Store: Send + Sync {
    /// hash のフィールドを整数として加算し、加算後の値を返す（HINCRBY）
    async fn hash_incr(&self, key: &str, field: &str, delta: i64) -> Result<i64, StoreError>;

    /// hash に複数フィールドを設定する（HSET）
    async fn hash_set(&self, key: &str, fields: &[(String, String)]) -> Result<(), StoreError>;

    /// hash の全フィールドを取得する。キーが無ければ空の map（HGETALL）
    async fn hash_get_all(&self, key: &str) -> Result<HashMap<String, String>, StoreError>;

    /// キーが存在するか調べる（EXISTS）
    async fn key_exists(&self, key: &str) -> Result<bool, StoreError>;

    /// sorted set のメンバーのスコアを加算し、加算後のスコアを返す（ZINCRBY）
    async fn sorted_set_incr(
        &self,
        key: &str,
        member: &str,
        delta: i64,
    ) -> Result<i64, StoreError>;

    /// sorted set をスコア降順で全件取得する（ZREVRANGE 0 -1 WITHSCORES）
    ///
    /// 同点のメンバーはメンバー名の昇順で返す。
    async fn sorted_set_rev_range(&self, key: &str) -> Result<Vec<(String, i64)>, StoreError>;

    /// キーが未設定の場合のみ値を設定する（SETNX）
    ///
    /// 設定できた場合 true、既に値があった場合 false を返す。
    async fn set_if_absent(&self, key: &str, value: &str) -> Result<bool, StoreError>;

    /// set にメンバーを追加する（SADD）
    async fn set_add(&self, key: &str, member: &str) -> Result<(), StoreError>;

    /// set からメンバーを削除する（SREM）
    async fn set_remove(&self, key: &str, member: &str) -> Result<(), StoreError>;

    /// set の全メンバーを取得する。キーが無ければ空（SMEMBERS）
    async fn set_members(&self, key: &str) -> Result<Vec<String>, StoreError>;

    /// set にメンバーが含まれるか調べる（SISMEMBER）
    async fn set_contains(&self, key: &str, member: &str) -> Result<bool, StoreError>;

    /// set のメンバー数を取得する（SCARD）
    async fn set_len(&self, key: &str) -> Result<usize, StoreError>;

    /// list の先頭に値を追加し、`max` 件に切り詰める（LPUSH + LTRIM）
    async fn list_push_trim(&self, key: &str, value: &str, max: usize) -> Result<(), StoreError>;

    /// list の全要素を先頭から取得する（LRANGE 0 -1）
    async fn list_range(&self, key: &str) -> Result<Vec<String>, StoreError>;

    /// 複数のキーを削除する。存在しないキーは無視する（DEL）
    async fn delete(&self, keys: &[String]) -> Result<(), StoreError>;

    /// チャネルにメッセージを発行し、受信した購読者数を返す（PUBLISH）
    async fn publish(&self, channel: &str, message: &str) -> Result<usize, StoreError>;

    /// チャネルを購読する（SUBSCRIBE）
    ///
    /// 返された Subscription がドロップされた時点で購読は解除される。
    async fn subscribe(&self, channel: &str) -> Result<Box<dyn Subscription>, StoreError>;
}

/// pub/sub チャネルの購読ハンドル
///
/// ドロップで購読解除。`next_message` はメッセージ到着まで待機し、
/// チャネルが閉じられた場合は None を返す。
#[cfg_attr(test, automock)]
#[async_trait]
pub trait Subscription: Send {
    /// 次のメッセージを受信する。チャネルが閉じたら None
    async fn next_message(&mut self) -> Option<String>;
}
