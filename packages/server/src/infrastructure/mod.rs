//! Infrastructure 層
//!
//! - `repository`: ドメイン層の Repository trait の実装
//! - `dto`: HTTP API の入出力（DTO）と変換

pub mod dto;
pub mod repository;
