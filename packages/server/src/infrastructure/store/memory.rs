//! InMemory Store 実装
//!
//! ドメイン層が定義する Store trait の具体的な実装。
//! HashMap をインメモリ DB として、tokio の broadcast チャネルを
//! pub/sub として使用します。
//!
//! ## 技術的負債
//!
//! 単一プロセス内でのみ動作します。複数ノードで部屋を共有する場合は
//! 同じ trait を Redis クライアントで実装して差し替える前提です。
//! キースキーマと各操作は最初から Redis のコマンドに揃えてあります。
//! Redis 実装時に対応予定。

use std::collections::{HashMap, HashSet, VecDeque};

use async_trait::async_trait;
use tokio::sync::{Mutex, broadcast};

use crate::domain::{Store, StoreError, Subscription};

/// broadcast チャネルの容量（受信が追いつかない購読者は Lagged になる）
const CHANNEL_CAPACITY: usize = 256;

/// 型ごとのインメモリ キースペース
#[derive(Default)]
struct StoreInner {
    /// hash 型（HSET / HGETALL / HINCRBY）
    hashes: HashMap<String, HashMap<String, String>>,
    /// sorted set 型（ZINCRBY / ZREVRANGE）
    zsets: HashMap<String, HashMap<String, i64>>,
    /// set 型（SADD / SREM / SMEMBERS）
    sets: HashMap<String, HashSet<String>>,
    /// string 型（SETNX）
    strings: HashMap<String, String>,
    /// list 型（LPUSH / LTRIM / LRANGE）
    lists: HashMap<String, VecDeque<String>>,
}

/// インメモリ Store 実装
///
/// 全データを 1 つの Mutex の下に置くので、個々の操作は自然に原子的になる。
/// pub/sub のチャネルはデータとは別のロックで管理し、削除操作の影響を受けない。
pub struct InMemoryStore {
    /// キースペース本体
    inner: Mutex<StoreInner>,
    /// チャネル名 -> broadcast sender
    channels: Mutex<HashMap<String, broadcast::Sender<String>>>,
}

impl InMemoryStore {
    /// 新しい InMemoryStore を作成
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(StoreInner::default()),
            channels: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Store for InMemoryStore {
    async fn hash_incr(&self, key: &str, field: &str, delta: i64) -> Result<i64, StoreError> {
        let mut inner = self.inner.lock().await;
        let hash = inner.hashes.entry(key.to_string()).or_default();
        let current = hash
            .get(field)
            .and_then(|v| v.parse::<i64>().ok())
            .unwrap_or(0);
        let next = current + delta;
        hash.insert(field.to_string(), next.to_string());
        Ok(next)
    }

    async fn hash_set(&self, key: &str, fields: &[(String, String)]) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().await;
        let hash = inner.hashes.entry(key.to_string()).or_default();
        for (field, value) in fields {
            hash.insert(field.clone(), value.clone());
        }
        Ok(())
    }

    async fn hash_get_all(&self, key: &str) -> Result<HashMap<String, String>, StoreError> {
        let inner = self.inner.lock().await;
        Ok(inner.hashes.get(key).cloned().unwrap_or_default())
    }

    async fn key_exists(&self, key: &str) -> Result<bool, StoreError> {
        let inner = self.inner.lock().await;
        Ok(inner.hashes.contains_key(key)
            || inner.zsets.contains_key(key)
            || inner.sets.contains_key(key)
            || inner.strings.contains_key(key)
            || inner.lists.contains_key(key))
    }

    async fn sorted_set_incr(
        &self,
        key: &str,
        member: &str,
        delta: i64,
    ) -> Result<i64, StoreError> {
        let mut inner = self.inner.lock().await;
        let zset = inner.zsets.entry(key.to_string()).or_default();
        let score = zset.entry(member.to_string()).or_insert(0);
        *score += delta;
        Ok(*score)
    }

    async fn sorted_set_rev_range(&self, key: &str) -> Result<Vec<(String, i64)>, StoreError> {
        let inner = self.inner.lock().await;
        let mut rows: Vec<(String, i64)> = inner
            .zsets
            .get(key)
            .map(|zset| zset.iter().map(|(m, s)| (m.clone(), *s)).collect())
            .unwrap_or_default();
        // スコア降順、同点はメンバー名昇順
        rows.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        Ok(rows)
    }

    async fn set_if_absent(&self, key: &str, value: &str) -> Result<bool, StoreError> {
        let mut inner = self.inner.lock().await;
        if inner.strings.contains_key(key) {
            return Ok(false);
        }
        inner.strings.insert(key.to_string(), value.to_string());
        Ok(true)
    }

    async fn set_add(&self, key: &str, member: &str) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().await;
        inner
            .sets
            .entry(key.to_string())
            .or_default()
            .insert(member.to_string());
        Ok(())
    }

    async fn set_remove(&self, key: &str, member: &str) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().await;
        let now_empty = match inner.sets.get_mut(key) {
            Some(set) => {
                set.remove(member);
                set.is_empty()
            }
            None => false,
        };
        if now_empty {
            inner.sets.remove(key);
        }
        Ok(())
    }

    async fn set_members(&self, key: &str) -> Result<Vec<String>, StoreError> {
        let inner = self.inner.lock().await;
        let mut members: Vec<String> = inner
            .sets
            .get(key)
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default();
        // HashSet の順序は不定なので出力を安定させる
        members.sort();
        Ok(members)
    }

    async fn set_contains(&self, key: &str, member: &str) -> Result<bool, StoreError> {
        let inner = self.inner.lock().await;
        Ok(inner.sets.get(key).is_some_and(|set| set.contains(member)))
    }

    async fn set_len(&self, key: &str) -> Result<usize, StoreError> {
        let inner = self.inner.lock().await;
        Ok(inner.sets.get(key).map(HashSet::len).unwrap_or(0))
    }

    async fn list_push_trim(&self, key: &str, value: &str, max: usize) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().await;
        let list = inner.lists.entry(key.to_string()).or_default();
        list.push_front(value.to_string());
        list.truncate(max);
        Ok(())
    }

    async fn list_range(&self, key: &str) -> Result<Vec<String>, StoreError> {
        let inner = self.inner.lock().await;
        Ok(inner
            .lists
            .get(key)
            .map(|list| list.iter().cloned().collect())
            .unwrap_or_default())
    }

    async fn delete(&self, keys: &[String]) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().await;
        for key in keys {
            inner.hashes.remove(key);
            inner.zsets.remove(key);
            inner.sets.remove(key);
            inner.strings.remove(key);
            inner.lists.remove(key);
        }
        Ok(())
    }

    async fn publish(&self, channel: &str, message: &str) -> Result<usize, StoreError> {
        let channels = self.channels.lock().await;
        match channels.get(channel) {
            // send は受信者が 1 人もいないと Err を返すが、配信先 0 件として扱う
            Some(sender) => Ok(sender.send(message.to_string()).unwrap_or(0)),
            None => Ok(0),
        }
    }

    async fn subscribe(&self, channel: &str) -> Result<Box<dyn Subscription>, StoreError> {
        let mut channels = self.channels.lock().await;
        let sender = channels
            .entry(channel.to_string())
            .or_insert_with(|| broadcast::channel(CHANNEL_CAPACITY).0);
        Ok(Box::new(BroadcastSubscription {
            channel: channel.to_string(),
            receiver: sender.subscribe(),
        }))
    }
}

/// broadcast チャネルの購読ハンドル
struct BroadcastSubscription {
    /// 購読中のチャネル名（ログ用）
    channel: String,
    /// broadcast receiver
    receiver: broadcast::Receiver<String>,
}

#[async_trait]
impl Subscription for BroadcastSubscription {
    async fn next_message(&mut self) -> Option<String> {
        loop {
            match self.receiver.recv().await {
                Ok(message) => return Some(message),
                // 受信が追いつかず取りこぼした場合は残りを受信し続ける
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(channel = %self.channel, skipped, "subscription lagged");
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}
