//! ルーム API の Data Transfer Objects (DTO)
//!
//! - `http`: `POST /api/video` と一覧系エンドポイントのリクエスト・レスポンス
//! - `conversion`: ドメインエンティティ → DTO の変換

pub mod conversion;
pub mod http;
