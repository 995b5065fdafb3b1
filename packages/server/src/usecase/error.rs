//! UseCase 層のエラー定義

use thiserror::Error;

use crate::domain::{StoreError, ValueObjectError};

/// チャット送信処理のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SendChatError {
    /// メッセージ内容の検証エラー
    #[error("invalid chat message: {0}")]
    InvalidMessage(#[from] ValueObjectError),

    /// ストア操作の失敗
    #[error("store operation failed: {0}")]
    Store(#[from] StoreError),
}

/// スコア送信処理のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SubmitScoreError {
    /// ストア操作の失敗
    #[error("store operation failed: {0}")]
    Store(#[from] StoreError),
}

/// 部屋作成処理のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CreateRoomError {
    /// 部屋キーの生成エラー
    #[error("failed to generate room key: {0}")]
    KeyGeneration(#[from] ValueObjectError),

    /// ストア操作の失敗
    #[error("store operation failed: {0}")]
    Store(#[from] StoreError),
}

/// 部屋参加処理のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum JoinRoomError {
    /// 部屋が存在しない
    #[error("room not found")]
    RoomNotFound,

    /// ストア操作の失敗
    #[error("store operation failed: {0}")]
    Store(#[from] StoreError),
}

/// 部屋削除処理のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DeleteRoomError {
    /// 部屋が存在しない
    #[error("room not found")]
    RoomNotFound,

    /// オーナー以外による削除要求
    #[error("only the owner can delete this room")]
    NotOwner,

    /// ストア操作の失敗
    #[error("store operation failed: {0}")]
    Store(#[from] StoreError),
}

/// 部屋情報の参照系処理のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RoomQueryError {
    /// ストア操作の失敗
    #[error("store operation failed: {0}")]
    Store(#[from] StoreError),
}
