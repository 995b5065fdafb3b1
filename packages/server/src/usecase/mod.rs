//! UseCase 層
//!
//! ビジネスロジックを実装するレイヤー。
//! UI 層から呼び出され、Domain 層を操作します。

pub mod connect_member;
pub mod create_room;
pub mod delete_room;
pub mod disconnect_member;
pub mod error;
pub mod get_leaderboard;
pub mod get_room_history;
pub mod get_room_stats;
pub mod join_room;
pub mod list_rooms;
pub mod send_chat;
pub mod submit_score;

pub use connect_member::ConnectMemberUseCase;
pub use create_room::CreateRoomUseCase;
pub use delete_room::DeleteRoomUseCase;
pub use disconnect_member::DisconnectMemberUseCase;
pub use error::{
    CreateRoomError, DeleteRoomError, JoinRoomError, RoomQueryError, SendChatError,
    SubmitScoreError,
};
pub use get_leaderboard::GetLeaderboardUseCase;
pub use get_room_history::GetRoomHistoryUseCase;
pub use get_room_stats::GetRoomStatsUseCase;
pub use join_room::JoinRoomUseCase;
pub use list_rooms::ListRoomsUseCase;
pub use send_chat::SendChatUseCase;
pub use submit_score::SubmitScoreUseCase;
