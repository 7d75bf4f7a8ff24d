//! ドメイン層のエラー型

use thiserror::Error;

/// 値オブジェクト生成時のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    /// 空文字列は許可されない
    #[error("{0} must not be empty")]
    Empty(&'static str),
}

/// Repository 操作のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    /// 同じ ID のルームが既に存在する
    #[error("Room '{0}' already exists")]
    RoomAlreadyExists(String),

    /// ルームが存在しない（未作成・期限切れ・全員退出済み）
    #[error("Room '{0}' not found")]
    RoomNotFound(String),

    /// バックエンド側の予期しない失敗
    #[error("Storage failure: {0}")]
    Storage(String),
}
