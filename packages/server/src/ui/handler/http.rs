//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
};

use crate::{
    domain::{RoomKey, Username},
    infrastructure::dto::http::{
        CreateRoomResponse, DeleteRoomResponse, ErrorDetail, HistoryResponse, JoinRoomResponse,
        LeaderboardEntryDto, LeaderboardResponse, ListRoomsResponse, LoginRequest, LoginResponse,
        MeResponse, RoomStatsResponse, RoomSummaryDto,
    },
    ui::state::AppState,
    usecase::{DeleteRoomError, JoinRoomError},
};

/// エラー応答の型（ステータスコード + detail ボディ）
type ErrorResponse = (StatusCode, Json<ErrorDetail>);

fn error_response(status: StatusCode, detail: &str) -> ErrorResponse {
    (status, Json(ErrorDetail::new(detail)))
}

/// Authorization ヘッダの bearer トークンを検証し、ユーザー名を返す
///
/// ヘッダがない、bearer 形式でない、またはトークンが無効な場合は 401。
async fn authenticate(state: &AppState, headers: &HeaderMap) -> Result<Username, ErrorResponse> {
    let token = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or_else(|| error_response(StatusCode::UNAUTHORIZED, "Not authenticated"))?;

    state
        .token_validator
        .validate(token)
        .await
        .map_err(|_| error_response(StatusCode::UNAUTHORIZED, "Invalid token"))
}

/// パスで渡された部屋キーを検証する
///
/// 形式が不正なキーはどの部屋にも一致しないので 404 として扱う。
fn parse_room_key(raw: String) -> Result<RoomKey, ErrorResponse> {
    RoomKey::new(raw).map_err(|_| error_response(StatusCode::NOT_FOUND, "Room not found"))
}

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Log in with username and password, returning a bearer token
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ErrorResponse> {
    let token = state
        .token_issuer
        .login(&request.username, &request.password)
        .await
        .map_err(|_| error_response(StatusCode::UNAUTHORIZED, "Invalid username or password"))?;

    Ok(Json(LoginResponse {
        access_token: token,
        token_type: "bearer".to_string(),
    }))
}

/// Get the identity bound to the presented token
pub async fn get_me(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<MeResponse>, ErrorResponse> {
    let username = authenticate(&state, &headers).await?;
    Ok(Json(MeResponse {
        username: username.into_string(),
    }))
}

/// Create a new room owned by the caller
pub async fn create_room(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<CreateRoomResponse>, ErrorResponse> {
    let username = authenticate(&state, &headers).await?;

    let (room_key, meta) = state
        .create_room_usecase
        .execute(username)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "failed to create room");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to create room")
        })?;

    Ok(Json(CreateRoomResponse {
        room_key: room_key.into_string(),
        owner: meta.owner,
    }))
}

/// List the rooms the caller is a member of
pub async fn list_rooms(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<ListRoomsResponse>, ErrorResponse> {
    let username = authenticate(&state, &headers).await?;

    let summaries = state
        .list_rooms_usecase
        .execute(username)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "failed to list rooms");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to list rooms")
        })?;

    // Domain Model から DTO への変換
    let rooms: Vec<RoomSummaryDto> = summaries.into_iter().map(Into::into).collect();

    Ok(Json(ListRoomsResponse { rooms }))
}

/// Join an existing room as a member
pub async fn join_room(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(room_key): Path<String>,
) -> Result<Json<JoinRoomResponse>, ErrorResponse> {
    let username = authenticate(&state, &headers).await?;
    let room_key = parse_room_key(room_key)?;

    match state.join_room_usecase.execute(room_key, username).await {
        Ok(()) => Ok(Json(JoinRoomResponse {
            message: "Joined room".to_string(),
        })),
        Err(JoinRoomError::RoomNotFound) => {
            Err(error_response(StatusCode::NOT_FOUND, "Room not found"))
        }
        Err(JoinRoomError::Store(e)) => {
            tracing::error!(error = %e, "failed to join room");
            Err(error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to join room",
            ))
        }
    }
}

/// Delete a room; only the owner may delete
pub async fn delete_room(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(room_key): Path<String>,
) -> Result<Json<DeleteRoomResponse>, ErrorResponse> {
    let username = authenticate(&state, &headers).await?;
    let room_key = parse_room_key(room_key)?;

    match state.delete_room_usecase.execute(room_key, username).await {
        Ok(()) => Ok(Json(DeleteRoomResponse {
            message: "Room deleted".to_string(),
        })),
        Err(DeleteRoomError::RoomNotFound) => {
            Err(error_response(StatusCode::NOT_FOUND, "Room not found"))
        }
        Err(DeleteRoomError::NotOwner) => Err(error_response(
            StatusCode::FORBIDDEN,
            "Only the owner can delete this room",
        )),
        Err(DeleteRoomError::Store(e)) => {
            tracing::error!(error = %e, "failed to delete room");
            Err(error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to delete room",
            ))
        }
    }
}

/// Get a room's leaderboard, sorted by score descending
pub async fn get_leaderboard(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(room_key): Path<String>,
) -> Result<Json<LeaderboardResponse>, ErrorResponse> {
    authenticate(&state, &headers).await?;
    let room_key = parse_room_key(room_key)?;

    let entries = state
        .get_leaderboard_usecase
        .execute(room_key.clone())
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "failed to get leaderboard");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to get leaderboard",
            )
        })?;

    let leaderboard: Vec<LeaderboardEntryDto> = entries.into_iter().map(Into::into).collect();

    Ok(Json(LeaderboardResponse {
        room_key: room_key.into_string(),
        leaderboard,
    }))
}

/// Get a room's activity counters and live-user count
pub async fn get_room_stats(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(room_key): Path<String>,
) -> Result<Json<RoomStatsResponse>, ErrorResponse> {
    authenticate(&state, &headers).await?;
    let room_key = parse_room_key(room_key)?;

    let stats = state
        .get_room_stats_usecase
        .execute(room_key.clone())
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "failed to get room stats");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to get room stats",
            )
        })?;

    Ok(Json(RoomStatsResponse {
        room_key: room_key.into_string(),
        active_users: stats.active_users,
        message_sent: stats.message_sent,
        submission_count: stats.submission_count,
    }))
}

/// Get a room's recent events, newest first
pub async fn get_room_history(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(room_key): Path<String>,
) -> Result<Json<HistoryResponse>, ErrorResponse> {
    authenticate(&state, &headers).await?;
    let room_key = parse_room_key(room_key)?;

    let raw_events = state
        .get_room_history_usecase
        .execute(room_key.clone())
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "failed to get room history");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to get room history",
            )
        })?;

    // 発行時の JSON をそのまま返す。壊れたエントリはスキップする
    let events: Vec<serde_json::Value> = raw_events
        .iter()
        .filter_map(|raw| serde_json::from_str(raw).ok())
        .collect();

    Ok(Json(HistoryResponse {
        room_key: room_key.into_string(),
        events,
    }))
}
