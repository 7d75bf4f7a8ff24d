//! UseCase 層のエラー型

use thiserror::Error;

use crate::domain::RepositoryError;

/// ルーム作成のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CreateRoomError {
    #[error("Room '{0}' already exists")]
    AlreadyExists(String),

    #[error("Repository error: {0}")]
    Repository(String),
}

impl From<RepositoryError> for CreateRoomError {
    fn from(error: RepositoryError) -> Self {
        match error {
            RepositoryError::RoomAlreadyExists(room_id) => Self::AlreadyExists(room_id),
            other => Self::Repository(other.to_string()),
        }
    }
}

/// 既存ルームへのアクセス（参加・送信・取得）のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoomAccessError {
    #[error("Room '{0}' not found")]
    NotFound(String),

    #[error("Repository error: {0}")]
    Repository(String),
}

impl From<RepositoryError> for RoomAccessError {
    fn from(error: RepositoryError) -> Self {
        match error {
            RepositoryError::RoomNotFound(room_id) => Self::NotFound(room_id),
            other => Self::Repository(other.to_string()),
        }
    }
}

/// 退出のエラー（退出は best-effort のため、ストア自体の失敗のみ）
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LeaveRoomError {
    #[error("Repository error: {0}")]
    Repository(String),
}

impl From<RepositoryError> for LeaveRoomError {
    fn from(error: RepositoryError) -> Self {
        Self::Repository(error.to_string())
    }
}

/// 期限切れルーム削除のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SweepError {
    #[error("Repository error: {0}")]
    Repository(String),
}

impl From<RepositoryError> for SweepError {
    fn from(error: RepositoryError) -> Self {
        Self::Repository(error.to_string())
    }
}
