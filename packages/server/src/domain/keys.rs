//! ストアのキースキーマ定義
//!
//! 部屋ごとの永続データとチャネル名は、部屋キーから決定的に導出されます。
//! キー文字列の組み立てはこのモジュールに集約し、他の層では直接
//! フォーマットしません。

use super::value_object::{ProblemId, RoomKey};

/// 全部屋キーを保持する set のキー
pub const ROOMS_ALL: &str = "rooms:all";

/// イベント履歴 list の保持上限（これを超えた古いイベントは捨てられる）
pub const HISTORY_MAX: usize = 100;

/// stats hash のフィールド名: チャットメッセージ送信数
pub const STAT_MESSAGE_SENT: &str = "message_sent";

/// stats hash のフィールド名: 受理されたスコア送信数
pub const STAT_SUBMISSION_COUNT: &str = "submission_count";

/// meta hash のフィールド名: 部屋オーナーのユーザー名
pub const META_OWNER: &str = "owner";

/// meta hash のフィールド名: 作成時刻（Unix ミリ秒）
pub const META_CREATED_AT: &str = "created_at";

/// 部屋メタデータ hash のキー
pub fn key_meta(room_key: &RoomKey) -> String {
    format!("room:{}:meta", room_key.as_str())
}

/// 部屋メンバー set のキー（参加登録済みユーザー）
pub fn key_members(room_key: &RoomKey) -> String {
    format!("room:{}:members", room_key.as_str())
}

/// 接続中ユーザー set のキー（WebSocket 接続が生きているユーザー）
pub fn key_users(room_key: &RoomKey) -> String {
    format!("room:{}:users", room_key.as_str())
}

/// リーダーボード sorted set のキー
pub fn key_leaderboard(room_key: &RoomKey) -> String {
    format!("room:{}:leaderboard", room_key.as_str())
}

/// 部屋統計 hash のキー
pub fn key_stats(room_key: &RoomKey) -> String {
    format!("room:{}:stats", room_key.as_str())
}

/// イベント履歴 list のキー
pub fn key_history(room_key: &RoomKey) -> String {
    format!("room:{}:history", room_key.as_str())
}

/// 部屋イベントの pub/sub チャネル名
pub fn key_events(room_key: &RoomKey) -> String {
    format!("room:{}:events", room_key.as_str())
}

/// 送信のあった問題 ID を集める set のキー
///
/// 部屋削除時に first-solver マーカーを列挙するための索引。
pub fn key_problems(room_key: &RoomKey) -> String {
    format!("room:{}:problems", room_key.as_str())
}

/// 問題ごとの first-solver マーカーのキー
pub fn key_first_solver(room_key: &RoomKey, problem_id: &ProblemId) -> String {
    format!("room:{}:first:{}", room_key.as_str(), problem_id.as_str())
}
