//! WebSocket connection handlers.
//!
//! 接続ごとのセッションは admitting → active → closing の順で進む。
//! 入室審査に失敗した接続はポリシー違反（1008）で閉じられ、部屋の
//! 状態には一切触れない。審査を通った接続はレジストリに登録され、
//! 部屋の中継ワーカー経由でイベントを受け取る。

use std::sync::Arc;

use axum::{
    extract::{
        Path, Query, State,
        ws::{CloseFrame, Message, WebSocket, WebSocketUpgrade, close_code},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use serde::Deserialize;
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::{
    domain::{RoomKey, Username, keys},
    infrastructure::{
        dto::websocket::{ClientCommand, ErrorReply},
        fanout::ConnectionSender,
    },
    ui::state::AppState,
    usecase::SendChatError,
};

/// Query parameters for WebSocket connection
#[derive(Debug, Deserialize)]
pub struct ConnectQuery {
    pub username: Option<String>,
    pub token: Option<String>,
}

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Path(room_key): Path<String>,
    Query(query): Query<ConnectQuery>,
) -> impl IntoResponse {
    // 審査はハンドシェイク完了後に行う。拒否をポリシー違反の close frame
    // として返すためで、HTTP ステータスでは返さない（元のサービスと同じ）。
    ws.on_upgrade(move |socket| handle_socket(socket, state, room_key, query))
}

async fn handle_socket(
    mut socket: WebSocket,
    state: Arc<AppState>,
    room_key: String,
    query: ConnectQuery,
) {
    // --- admitting ---
    let (room_key, username) = match admit(&state, room_key, query).await {
        Ok(admitted) => admitted,
        Err(reason) => {
            tracing::warn!(reason, "websocket connection rejected");
            let frame = CloseFrame {
                code: close_code::POLICY,
                reason: reason.into(),
            };
            let _ = socket.send(Message::Close(Some(frame))).await;
            return;
        }
    };

    // --- active ---
    // 1. 接続を採番してレジストリに登録
    let conn_id = Uuid::new_v4();
    let (tx, rx) = mpsc::unbounded_channel();
    state
        .registry
        .register(room_key.clone(), conn_id, tx.clone())
        .await;

    // 2. 部屋の中継ワーカーを起動（既に稼働中なら何もしない）。
    //    購読の失敗はこの接続を落とさず、次の接続の登録で再試行される。
    if let Err(e) = state.relays.ensure_worker(&room_key).await {
        tracing::warn!(room_key = %room_key, error = %e, "failed to start relay worker");
    }

    // 3. 接続中ユーザーとして記録し、join イベントを発行（best-effort）
    state
        .connect_member_usecase
        .execute(room_key.clone(), username.clone())
        .await;
    tracing::info!(room_key = %room_key, username = %username, %conn_id, "connection admitted");

    let (sender, receiver) = socket.split();

    // Spawn a task to push relayed events to this client
    let mut send_task = pusher_loop(rx, sender);

    // Spawn a task to receive messages from this client
    let recv_state = state.clone();
    let recv_room_key = room_key.clone();
    let recv_username = username.clone();
    let mut recv_task = tokio::spawn(async move {
        recv_loop(receiver, recv_state, recv_room_key, recv_username, tx).await;
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    // --- closing ---
    // 後始末はすべて best-effort で、途中の失敗があっても最後まで進める。
    // 部屋の最後の接続だった場合だけ中継ワーカーを止める。
    if state.registry.unregister(&room_key, &conn_id).await {
        state.relays.release_worker(&room_key).await;
    }
    state
        .disconnect_member_usecase
        .execute(room_key.clone(), username.clone())
        .await;
    tracing::info!(room_key = %room_key, username = %username, %conn_id, "connection closed");
}

/// 入室審査
///
/// username と token の両方を要求し、token の検証結果と username の
/// 完全一致、および部屋の存在を確認する。失敗した場合は close frame に
/// 載せる理由の文字列を返す。
async fn admit(
    state: &AppState,
    room_key: String,
    query: ConnectQuery,
) -> Result<(RoomKey, Username), &'static str> {
    // 1. username と token の両方が必要
    let (Some(username), Some(token)) = (query.username, query.token) else {
        return Err("username and token required!");
    };
    if username.is_empty() || token.is_empty() {
        return Err("username and token required!");
    }

    // 2. token を検証し、埋め込まれた identity と username の完全一致を要求
    let token_username = state
        .token_validator
        .validate(&token)
        .await
        .map_err(|_| "username mismatch with token!")?;
    if token_username.as_str() != username {
        return Err("username mismatch with token!");
    }

    // 3. 部屋の存在チェック（meta hash があるかで判定）
    let Ok(room_key) = RoomKey::new(room_key) else {
        return Err("room not found!");
    };
    match state.store.key_exists(&keys::key_meta(&room_key)).await {
        Ok(true) => Ok((room_key, token_username)),
        Ok(false) => Err("room not found!"),
        Err(_) => Err("room not found!"),
    }
}

/// Spawns a task that receives relayed events from the rx channel and
/// pushes them to the WebSocket sender.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

/// 受信ループ
///
/// 受信した各メッセージを ClientCommand として解釈し、UseCase 層に
/// 振り分ける。解釈できないメッセージは送信者だけにエラー応答を返し、
/// 接続は維持する。
async fn recv_loop(
    mut receiver: futures_util::stream::SplitStream<WebSocket>,
    state: Arc<AppState>,
    room_key: RoomKey,
    username: Username,
    reply: ConnectionSender,
) {
    while let Some(msg) = receiver.next().await {
        let msg = match msg {
            Ok(msg) => msg,
            Err(e) => {
                tracing::debug!(room_key = %room_key, error = %e, "websocket receive error");
                break;
            }
        };

        match msg {
            Message::Text(text) => {
                let command = match serde_json::from_str::<ClientCommand>(&text) {
                    Ok(command) => command,
                    Err(e) => {
                        tracing::debug!(room_key = %room_key, error = %e, "malformed message");
                        send_error_reply(&reply, "invalid message payload");
                        continue;
                    }
                };
                dispatch_command(&state, &room_key, &username, &reply, command).await;
            }
            Message::Binary(_) => {
                send_error_reply(&reply, "invalid message payload");
            }
            Message::Ping(_) => {
                // Ping/pong is handled automatically by the WebSocket protocol
            }
            Message::Close(_) => {
                tracing::debug!(room_key = %room_key, username = %username, "client requested close");
                break;
            }
            _ => {}
        }
    }
}

/// 解釈済みコマンドを対応する UseCase に振り分ける
async fn dispatch_command(
    state: &AppState,
    room_key: &RoomKey,
    username: &Username,
    reply: &ConnectionSender,
    command: ClientCommand,
) {
    match command {
        ClientCommand::Chat { message } => {
            match state
                .send_chat_usecase
                .execute(room_key.clone(), username.clone(), message)
                .await
            {
                Ok(()) => {}
                Err(SendChatError::InvalidMessage(e)) => {
                    send_error_reply(reply, &e.to_string());
                }
                Err(SendChatError::Store(e)) => {
                    tracing::warn!(room_key = %room_key, error = %e, "chat failed");
                    send_error_reply(reply, "failed to send message");
                }
            }
        }
        ClientCommand::Submission { problem_id, points } => {
            match state
                .submit_score_usecase
                .execute(room_key.clone(), username.clone(), problem_id, points)
                .await
            {
                Ok(Some(outcome)) => {
                    tracing::debug!(
                        room_key = %room_key,
                        username = %username,
                        new_score = outcome.new_score,
                        bonus_awarded = outcome.bonus_awarded,
                        "submission recorded"
                    );
                }
                // 検証で弾かれた送信は黙って無視する
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!(room_key = %room_key, error = %e, "submission failed");
                    send_error_reply(reply, "failed to record submission");
                }
            }
        }
    }
}

/// 送信者だけに届くエラー応答を接続チャネルに流す
///
/// 部屋のチャネルには発行しないので、他の接続には届かない。
fn send_error_reply(reply: &ConnectionSender, reason: &str) {
    match serde_json::to_string(&ErrorReply::new(reason)) {
        Ok(json) => {
            let _ = reply.send(json);
        }
        Err(e) => {
            tracing::warn!(error = %e, "failed to encode error reply");
        }
    }
}
