//! HTTP API integration tests.
//!
//! Tests for the auth and room administration endpoints (login, identity,
//! room CRUD, leaderboard, stats, history).

mod fixtures;
use fixtures::TestServer;

#[tokio::test]
async fn test_health_endpoint() {
    // テスト項目: /api/health エンドポイントが正常に動作する
    // given (前提条件):
    let server = TestServer::start(19080).await;
    let client = reqwest::Client::new();

    // when (操作):
    let response = client
        .get(format!("{}/api/health", server.base_url()))
        .send()
        .await
        .expect("Failed to send request");

    // then (期待する結果):
    assert_eq!(response.status(), 200);

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_login_issues_bearer_token() {
    // テスト項目: /auth/login が bearer トークンを発行する
    // given (前提条件):
    let server = TestServer::start(19081).await;
    let client = reqwest::Client::new();

    // when (操作):
    let response = client
        .post(format!("{}/auth/login", server.base_url()))
        .json(&serde_json::json!({"username": "alice", "password": "password1"}))
        .send()
        .await
        .expect("Failed to send request");

    // then (期待する結果):
    assert_eq!(response.status(), 200);

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["token_type"], "bearer");
    assert!(!body["access_token"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_login_wrong_password_rejected() {
    // テスト項目: 誤ったパスワードでのログインは 401 になる
    // given (前提条件):
    let server = TestServer::start(19082).await;
    let client = reqwest::Client::new();

    // when (操作):
    let response = client
        .post(format!("{}/auth/login", server.base_url()))
        .json(&serde_json::json!({"username": "alice", "password": "wrong"}))
        .send()
        .await
        .expect("Failed to send request");

    // then (期待する結果):
    assert_eq!(response.status(), 401);
}

#[tokio::test]
async fn test_me_returns_token_identity() {
    // テスト項目: /auth/me がトークンに紐づくユーザー名を返す
    // given (前提条件):
    let server = TestServer::start(19083).await;
    let client = reqwest::Client::new();
    let token = server.login(&client, "alice", "password1").await;

    // when (操作):
    let response = client
        .get(format!("{}/auth/me", server.base_url()))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to send request");

    // then (期待する結果):
    assert_eq!(response.status(), 200);

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["username"], "alice");
}

#[tokio::test]
async fn test_me_without_token_rejected() {
    // テスト項目: トークンのないリクエストは 401 になる
    // given (前提条件):
    let server = TestServer::start(19084).await;
    let client = reqwest::Client::new();

    // when (操作):
    let response = client
        .get(format!("{}/auth/me", server.base_url()))
        .send()
        .await
        .expect("Failed to send request");

    // then (期待する結果):
    assert_eq!(response.status(), 401);
}

#[tokio::test]
async fn test_rooms_require_bearer_token() {
    // テスト項目: /api/rooms 系エンドポイントはトークンなしでは 401 になる
    // given (前提条件):
    let server = TestServer::start(19085).await;
    let client = reqwest::Client::new();

    // when (操作) / then (期待する結果):
    let list = client
        .get(format!("{}/api/rooms", server.base_url()))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(list.status(), 401);

    let create = client
        .post(format!("{}/api/rooms", server.base_url()))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(create.status(), 401);
}

#[tokio::test]
async fn test_create_room_and_list_for_members_only() {
    // テスト項目: 作成した部屋はオーナーの一覧にだけ載る
    // given (前提条件):
    let server = TestServer::start(19086).await;
    let client = reqwest::Client::new();
    let alice_token = server.login(&client, "alice", "password1").await;
    let bob_token = server.login(&client, "bob", "password2").await;

    // when (操作): alice が部屋を作成
    let room_key = server.create_room(&client, &alice_token).await;
    assert_eq!(room_key.len(), 8);

    // then (期待する結果): alice の一覧には載り、bob の一覧には載らない
    let alice_rooms: serde_json::Value = client
        .get(format!("{}/api/rooms", server.base_url()))
        .bearer_auth(&alice_token)
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse JSON");
    let rooms = alice_rooms["rooms"].as_array().unwrap();
    assert_eq!(rooms.len(), 1);
    assert_eq!(rooms[0]["room_key"], room_key.as_str());
    assert_eq!(rooms[0]["owner"], "alice");
    assert!(rooms[0]["created_at"].is_string());

    let bob_rooms: serde_json::Value = client
        .get(format!("{}/api/rooms", server.base_url()))
        .bearer_auth(&bob_token)
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse JSON");
    assert!(bob_rooms["rooms"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_join_room_adds_member() {
    // テスト項目: 部屋に参加すると一覧に載るようになる
    // given (前提条件): alice の部屋がある
    let server = TestServer::start(19087).await;
    let client = reqwest::Client::new();
    let alice_token = server.login(&client, "alice", "password1").await;
    let bob_token = server.login(&client, "bob", "password2").await;
    let room_key = server.create_room(&client, &alice_token).await;

    // when (操作): bob が参加
    let response = client
        .post(format!("{}/api/rooms/{}/join", server.base_url(), room_key))
        .bearer_auth(&bob_token)
        .send()
        .await
        .expect("Failed to send request");

    // then (期待する結果):
    assert_eq!(response.status(), 200);

    let bob_rooms: serde_json::Value = client
        .get(format!("{}/api/rooms", server.base_url()))
        .bearer_auth(&bob_token)
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse JSON");
    let rooms = bob_rooms["rooms"].as_array().unwrap();
    assert_eq!(rooms.len(), 1);

    let members = rooms[0]["members"].as_array().unwrap();
    assert!(members.contains(&serde_json::json!("alice")));
    assert!(members.contains(&serde_json::json!("bob")));
}

#[tokio::test]
async fn test_join_unknown_room_not_found() {
    // テスト項目: 存在しない部屋への参加は 404 になる
    // given (前提条件):
    let server = TestServer::start(19088).await;
    let client = reqwest::Client::new();
    let token = server.login(&client, "alice", "password1").await;

    // when (操作):
    let response = client
        .post(format!("{}/api/rooms/missing1/join", server.base_url()))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to send request");

    // then (期待する結果):
    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn test_delete_room_owner_only() {
    // テスト項目: 部屋を削除できるのはオーナーだけ
    // given (前提条件): alice の部屋がある
    let server = TestServer::start(19089).await;
    let client = reqwest::Client::new();
    let alice_token = server.login(&client, "alice", "password1").await;
    let bob_token = server.login(&client, "bob", "password2").await;
    let room_key = server.create_room(&client, &alice_token).await;

    // when (操作) / then (期待する結果): bob の削除要求は 403
    let forbidden = client
        .delete(format!("{}/api/rooms/{}", server.base_url(), room_key))
        .bearer_auth(&bob_token)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(forbidden.status(), 403);

    // alice の削除要求は成功し、一覧から消える
    let deleted = client
        .delete(format!("{}/api/rooms/{}", server.base_url(), room_key))
        .bearer_auth(&alice_token)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(deleted.status(), 200);

    let alice_rooms: serde_json::Value = client
        .get(format!("{}/api/rooms", server.base_url()))
        .bearer_auth(&alice_token)
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse JSON");
    assert!(alice_rooms["rooms"].as_array().unwrap().is_empty());

    // 削除済みの部屋の再削除は 404
    let missing = client
        .delete(format!("{}/api/rooms/{}", server.base_url(), room_key))
        .bearer_auth(&alice_token)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(missing.status(), 404);
}

#[tokio::test]
async fn test_leaderboard_of_unknown_room_is_empty() {
    // テスト項目: 未知の部屋のリーダーボードは空の一覧として返される
    // given (前提条件):
    let server = TestServer::start(19090).await;
    let client = reqwest::Client::new();
    let token = server.login(&client, "alice", "password1").await;

    // when (操作):
    let response = client
        .get(format!(
            "{}/api/rooms/missing1/leaderboard",
            server.base_url()
        ))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to send request");

    // then (期待する結果):
    assert_eq!(response.status(), 200);

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert!(body["leaderboard"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_stats_of_fresh_room_are_zero() {
    // テスト項目: 作成直後の部屋の統計はすべて 0
    // given (前提条件):
    let server = TestServer::start(19091).await;
    let client = reqwest::Client::new();
    let token = server.login(&client, "alice", "password1").await;
    let room_key = server.create_room(&client, &token).await;

    // when (操作):
    let response = client
        .get(format!(
            "{}/api/rooms/{}/stats",
            server.base_url(),
            room_key
        ))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to send request");

    // then (期待する結果):
    assert_eq!(response.status(), 200);

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["room_key"], room_key.as_str());
    assert_eq!(body["active_users"], 0);
    assert_eq!(body["message_sent"], 0);
    assert_eq!(body["submission_count"], 0);
}

#[tokio::test]
async fn test_history_of_fresh_room_is_empty() {
    // テスト項目: 作成直後の部屋のイベント履歴は空
    // given (前提条件):
    let server = TestServer::start(19092).await;
    let client = reqwest::Client::new();
    let token = server.login(&client, "alice", "password1").await;
    let room_key = server.create_room(&client, &token).await;

    // when (操作):
    let response = client
        .get(format!(
            "{}/api/rooms/{}/history",
            server.base_url(),
            room_key
        ))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to send request");

    // then (期待する結果):
    assert_eq!(response.status(), 200);

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert!(body["events"].as_array().unwrap().is_empty());
}
