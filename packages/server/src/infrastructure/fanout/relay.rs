//! 部屋ごとの中継ワーカー
//!
//! ## 責務
//!
//! - 部屋のイベントチャネルの購読と、接続中クライアントへのファンアウト
//! - ワーカーの遅延起動（部屋への最初の接続で起動）
//! - 最後の接続が消えたときの停止と購読の解放
//!
//! ## 設計ノート
//!
//! ワーカーは部屋ごとに最大 1 つ。起動判定と購読開始を同じロックの下で
//! 行うので、同時に 2 つの接続が来てもワーカーは 1 つしか起動しない。
//! 購読はワーカー task の spawn より先に開始するため、起動直後に発行
//! されたイベント（自分の join など）を取りこぼさない。
//!
//! ワーカーが購読の切断などで自然終了した場合、終了済みの worker は
//! いないものとして扱い、次の接続で起動し直す。

use std::{collections::HashMap, sync::Arc};

use tokio::{sync::Mutex, task::JoinHandle};

use crate::domain::{RoomKey, Store, StoreError, Subscription, keys};

use super::registry::ConnectionRegistry;

/// 部屋ごとの中継ワーカーの管理者
///
/// ## フィールド
///
/// - `store`: イベントチャネルの購読元
/// - `registry`: ファンアウト先の接続レジストリ
/// - `workers`: 部屋キー -> 稼働中ワーカーの JoinHandle
pub struct RelaySupervisor {
    /// Store（購読の抽象化）
    store: Arc<dyn Store>,
    /// 接続レジストリ
    registry: Arc<ConnectionRegistry>,
    /// 稼働中のワーカー
    workers: Mutex<HashMap<RoomKey, JoinHandle<()>>>,
}

impl RelaySupervisor {
    /// 新しい RelaySupervisor を作成
    pub fn new(store: Arc<dyn Store>, registry: Arc<ConnectionRegistry>) -> Self {
        Self {
            store,
            registry,
            workers: Mutex::new(HashMap::new()),
        }
    }

    /// 部屋のワーカーが稼働していることを保証する
    ///
    /// 稼働中なら何もしない。未起動または終了済みなら、購読を開始して
    /// からワーカーを spawn する。
    ///
    /// # Errors
    ///
    /// 購読の開始に失敗した場合は `StoreError` を返す（ワーカーは起動しない）
    pub async fn ensure_worker(&self, room_key: &RoomKey) -> Result<(), StoreError> {
        let mut workers = self.workers.lock().await;

        // 1. 稼働中のワーカーがいればそのまま使う（終了済みは作り直す）
        if let Some(handle) = workers.get(room_key) {
            if !handle.is_finished() {
                return Ok(());
            }
        }

        // 2. spawn より先に購読を開始し、起動直後のイベントの取りこぼしを防ぐ
        let subscription = self.store.subscribe(&keys::key_events(room_key)).await?;

        // 3. ワーカーを起動
        let handle = tokio::spawn(relay_loop(
            room_key.clone(),
            subscription,
            self.registry.clone(),
        ));
        workers.insert(room_key.clone(), handle);
        tracing::info!(room_key = %room_key, "relay worker started");

        Ok(())
    }

    /// 部屋のワーカーを停止し、購読を解放する
    ///
    /// 停止の直前に部屋へ接続が戻っていないか確認するので、解除と再接続が
    /// 競合してもイベントの流れているワーカーを誤って止めない。停止後は
    /// ワーカー task の終了を待ち切ってから戻るため、呼び出しから戻った
    /// 時点で購読は確実に解放されている。
    pub async fn release_worker(&self, room_key: &RoomKey) {
        let handle = {
            let mut workers = self.workers.lock().await;
            if self.registry.connection_count(room_key).await > 0 {
                return;
            }
            workers.remove(room_key)
        };

        if let Some(handle) = handle {
            handle.abort();
            let _ = handle.await;
            tracing::info!(room_key = %room_key, "relay worker stopped");
        }
    }

    /// 部屋のワーカーが稼働中か調べる
    pub async fn is_running(&self, room_key: &RoomKey) -> bool {
        let workers = self.workers.lock().await;
        workers.get(room_key).is_some_and(|h| !h.is_finished())
    }
}

/// 中継ワーカー本体
///
/// 購読からイベントを受け取り、その時点の部屋の全接続に流し込む。
/// 個々の接続への送信失敗は無視する（切断処理はセッション側が行う）。
async fn relay_loop(
    room_key: RoomKey,
    mut subscription: Box<dyn Subscription>,
    registry: Arc<ConnectionRegistry>,
) {
    while let Some(message) = subscription.next_message().await {
        let senders = registry.snapshot(&room_key).await;
        tracing::debug!(room_key = %room_key, connections = senders.len(), "relaying event");
        for sender in senders {
            let _ = sender.send(message.clone());
        }
    }
    tracing::debug!(room_key = %room_key, "relay subscription closed");
}
