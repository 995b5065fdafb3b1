//! Server state and dependency wiring.

use std::sync::Arc;

use crate::domain::{Store, TokenIssuer, TokenValidator};
use crate::infrastructure::{
    fanout::{ConnectionRegistry, RelaySupervisor},
    publisher::StoreEventPublisher,
};
use crate::usecase::{
    ConnectMemberUseCase, CreateRoomUseCase, DeleteRoomUseCase, DisconnectMemberUseCase,
    GetLeaderboardUseCase, GetRoomHistoryUseCase, GetRoomStatsUseCase, JoinRoomUseCase,
    ListRoomsUseCase, SendChatUseCase, SubmitScoreUseCase,
};

/// Shared application state
pub struct AppState {
    /// Store（データアクセス層の抽象化）
    pub store: Arc<dyn Store>,
    /// 接続レジストリ（部屋ごとの接続中クライアント）
    pub registry: Arc<ConnectionRegistry>,
    /// 中継ワーカーの管理者
    pub relays: Arc<RelaySupervisor>,
    /// TokenIssuer（トークン発行の抽象化）
    pub token_issuer: Arc<dyn TokenIssuer>,
    /// TokenValidator（トークン検証の抽象化）
    pub token_validator: Arc<dyn TokenValidator>,
    /// ConnectMemberUseCase（メンバー接続のユースケース）
    pub connect_member_usecase: Arc<ConnectMemberUseCase>,
    /// DisconnectMemberUseCase（メンバー切断のユースケース）
    pub disconnect_member_usecase: Arc<DisconnectMemberUseCase>,
    /// SendChatUseCase（チャット送信のユースケース）
    pub send_chat_usecase: Arc<SendChatUseCase>,
    /// SubmitScoreUseCase（スコア送信のユースケース）
    pub submit_score_usecase: Arc<SubmitScoreUseCase>,
    /// CreateRoomUseCase（部屋作成のユースケース）
    pub create_room_usecase: Arc<CreateRoomUseCase>,
    /// JoinRoomUseCase（部屋参加のユースケース）
    pub join_room_usecase: Arc<JoinRoomUseCase>,
    /// DeleteRoomUseCase（部屋削除のユースケース）
    pub delete_room_usecase: Arc<DeleteRoomUseCase>,
    /// ListRoomsUseCase（部屋一覧取得のユースケース）
    pub list_rooms_usecase: Arc<ListRoomsUseCase>,
    /// GetLeaderboardUseCase（リーダーボード取得のユースケース）
    pub get_leaderboard_usecase: Arc<GetLeaderboardUseCase>,
    /// GetRoomStatsUseCase（部屋統計取得のユースケース）
    pub get_room_stats_usecase: Arc<GetRoomStatsUseCase>,
    /// GetRoomHistoryUseCase（イベント履歴取得のユースケース）
    pub get_room_history_usecase: Arc<GetRoomHistoryUseCase>,
}

impl AppState {
    /// Store とトークンサービスから全依存を組み立てる
    ///
    /// 依存は次の順で初期化される:
    /// 1. EventPublisher
    /// 2. ConnectionRegistry
    /// 3. RelaySupervisor
    /// 4. UseCases
    pub fn assemble(
        store: Arc<dyn Store>,
        token_issuer: Arc<dyn TokenIssuer>,
        token_validator: Arc<dyn TokenValidator>,
    ) -> Arc<Self> {
        // 1. Create EventPublisher (Store-backed implementation)
        let event_publisher = Arc::new(StoreEventPublisher::new(store.clone()));

        // 2. Create ConnectionRegistry (process-local fan-out targets)
        let registry = Arc::new(ConnectionRegistry::new());

        // 3. Create RelaySupervisor (per-room relay workers)
        let relays = Arc::new(RelaySupervisor::new(store.clone(), registry.clone()));

        // 4. Create UseCases
        Arc::new(Self {
            connect_member_usecase: Arc::new(ConnectMemberUseCase::new(
                store.clone(),
                event_publisher.clone(),
            )),
            disconnect_member_usecase: Arc::new(DisconnectMemberUseCase::new(
                store.clone(),
                event_publisher.clone(),
            )),
            send_chat_usecase: Arc::new(SendChatUseCase::new(
                store.clone(),
                event_publisher.clone(),
            )),
            submit_score_usecase: Arc::new(SubmitScoreUseCase::new(
                store.clone(),
                event_publisher,
            )),
            create_room_usecase: Arc::new(CreateRoomUseCase::new(store.clone())),
            join_room_usecase: Arc::new(JoinRoomUseCase::new(store.clone())),
            delete_room_usecase: Arc::new(DeleteRoomUseCase::new(store.clone())),
            list_rooms_usecase: Arc::new(ListRoomsUseCase::new(store.clone())),
            get_leaderboard_usecase: Arc::new(GetLeaderboardUseCase::new(store.clone())),
            get_room_stats_usecase: Arc::new(GetRoomStatsUseCase::new(store.clone())),
            get_room_history_usecase: Arc::new(GetRoomHistoryUseCase::new(store.clone())),
            store,
            registry,
            relays,
            token_issuer,
            token_validator,
        })
    }
}
