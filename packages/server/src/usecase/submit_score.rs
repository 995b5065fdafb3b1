//! UseCase: スコア送信処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SubmitScoreUseCase::execute() メソッド
//! - スコア送信処理（検証ゲート、リーダーボード加算、first-solver ボーナス）
//!
//! ### なぜこのテストが必要か
//! - 不正な送信（points <= 0、空の problem_id）が黙って無視されることを確認
//! - 同一問題への並行送信でボーナスがちょうど 1 人にだけ付くことを保証
//! - イベントの new_score がボーナスを含まない基礎スコアであることを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：初回送信（ボーナスあり）、2 人目以降の送信（ボーナスなし）
//! - 異常系：検証ゲートで弾かれる送信、ストア障害
//! - エッジケース：複数タスクからの同時送信（ボーナス競合）

use std::sync::Arc;

use crate::domain::{
    EventPublisher, FIRST_SOLVER_BONUS, ProblemId, RoomEvent, RoomKey, Store, SubmissionOutcome,
    Timestamp, Username,
    keys::{self, STAT_SUBMISSION_COUNT},
};

use super::error::SubmitScoreError;

/// スコア送信のユースケース
pub struct SubmitScoreUseCase {
    /// Store（データアクセス層の抽象化）
    store: Arc<dyn Store>,
    /// EventPublisher（イベント発行の抽象化）
    event_publisher: Arc<dyn EventPublisher>,
}

impl SubmitScoreUseCase {
    /// 新しい SubmitScoreUseCase を作成
    pub fn new(store: Arc<dyn Store>, event_publisher: Arc<dyn EventPublisher>) -> Self {
        Self {
            store,
            event_publisher,
        }
    }

    /// スコア送信を実行
    ///
    /// points と problem_id は検証前のワイヤ上の値を受け取る。検証で
    /// 弾かれた送信はエラーではなく `Ok(None)` として扱い、部屋の状態を
    /// 一切変更しない。
    ///
    /// # Arguments
    ///
    /// * `room_key` - 送信先の部屋キー（Domain Model）
    /// * `username` - 送信者のユーザー名（Domain Model）
    /// * `problem_id` - 問題 ID（未検証のワイヤ値）
    /// * `points` - 得点（未検証のワイヤ値）
    ///
    /// # Returns
    ///
    /// * `Ok(Some(SubmissionOutcome))` - 受理された送信の結果
    /// * `Ok(None)` - 検証で弾かれた送信（状態変更なし）
    /// * `Err(SubmitScoreError)` - ストア操作の失敗
    pub async fn execute(
        &self,
        room_key: RoomKey,
        username: Username,
        problem_id: String,
        points: i64,
    ) -> Result<Option<SubmissionOutcome>, SubmitScoreError> {
        use banzuke_shared::time::get_utc_timestamp;

        // 1. 検証ゲート: points が正でない、または problem_id が不正な送信は無視
        if points <= 0 {
            tracing::debug!(room_key = %room_key, %points, "submission rejected: non-positive points");
            return Ok(None);
        }
        let problem_id = match ProblemId::new(problem_id) {
            Ok(id) => id,
            Err(e) => {
                tracing::debug!(room_key = %room_key, error = %e, "submission rejected: invalid problem id");
                return Ok(None);
            }
        };

        // 2. 送信数カウンタを加算
        self.store
            .hash_incr(&keys::key_stats(&room_key), STAT_SUBMISSION_COUNT, 1)
            .await?;

        // 3. リーダーボードに基礎点を加算（加算後の基礎スコアがイベントの new_score になる）
        let new_score = self
            .store
            .sorted_set_incr(&keys::key_leaderboard(&room_key), username.as_str(), points)
            .await?;

        // 4. 部屋削除時の掃除用に問題 ID を記録
        self.store
            .set_add(&keys::key_problems(&room_key), problem_id.as_str())
            .await?;

        // 5. first-solver マーカーの獲得を試みる（SETNX なので勝者はちょうど 1 人）
        let bonus_awarded = self
            .store
            .set_if_absent(
                &keys::key_first_solver(&room_key, &problem_id),
                username.as_str(),
            )
            .await?;

        // 6. 獲得できた場合のみボーナスを別の加算として積む
        if bonus_awarded {
            self.store
                .sorted_set_incr(
                    &keys::key_leaderboard(&room_key),
                    username.as_str(),
                    FIRST_SOLVER_BONUS,
                )
                .await?;
        }

        // 7. 送信イベントを発行（発行失敗は送信自体を失敗にしない）
        let event = RoomEvent::submission(
            username,
            problem_id,
            points,
            new_score,
            bonus_awarded,
            Timestamp::new(get_utc_timestamp()),
        );
        if let Err(e) = self.event_publisher.publish(&room_key, &event).await {
            tracing::warn!(room_key = %room_key, error = %e, "failed to publish submission event");
        }

        Ok(Some(SubmissionOutcome {
            new_score,
            bonus_awarded,
        }))
    }
}
