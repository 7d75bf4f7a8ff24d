//! ルーム操作エンドポイントの HTTP DTO
//!
//! フィールド名は JSON の契約（`roomId`, `userId`, `hostId` など）に従います。
//! クライアントクレートも同じ型でデシリアライズします。

use serde::{Deserialize, Serialize};

/// `POST /api/video` が受け付けるリクエスト種別
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestType {
    CreateRoom,
    JoinRoom,
    LeaveRoom,
    SendMessage,
    GetRoomInfo,
}

impl RequestType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CreateRoom => "create-room",
            Self::JoinRoom => "join-room",
            Self::LeaveRoom => "leave-room",
            Self::SendMessage => "send-message",
            Self::GetRoomInfo => "get-room-info",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "create-room" => Some(Self::CreateRoom),
            "join-room" => Some(Self::JoinRoom),
            "leave-room" => Some(Self::LeaveRoom),
            "send-message" => Some(Self::SendMessage),
            "get-room-info" => Some(Self::GetRoomInfo),
            _ => None,
        }
    }
}

/// `POST /api/video` のリクエストボディ
///
/// 未知の種別も JSON の拒否ではなくハンドラで "Invalid request type" として
/// 返すため、`type` は文字列のまま保持する。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoRequest {
    #[serde(rename = "type")]
    pub request_type: String,
    #[serde(default)]
    pub room_id: String,
    #[serde(default)]
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl VideoRequest {
    pub fn new(
        request_type: RequestType,
        room_id: impl Into<String>,
        user_id: impl Into<String>,
        data: Option<serde_json::Value>,
    ) -> Self {
        Self {
            request_type: request_type.as_str().to_string(),
            room_id: room_id.into(),
            user_id: user_id.into(),
            data,
        }
    }
}

/// 通信上のチャットメッセージ
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageDto {
    pub id: String,
    pub user_id: String,
    pub text: String,
    pub timestamp: String, // RFC 3339
}

/// create-room / join-room / get-room-info が返すルーム状態
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomInfoResponse {
    /// create-room のときだけ返す
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_id: Option<String>,
    pub participants: Vec<String>,
    pub messages: Vec<MessageDto>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Map<String, serde_json::Value>>,
    pub host_id: String,
}

/// leave-room のレスポンス
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveRoomResponse {
    pub success: bool,
}

/// send-message のレスポンス
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendMessageResponse {
    pub message: MessageDto,
}

/// 失敗したリクエストに共通のエラーボディ
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    /// 機械可読なエラー種別（"already-exists", "not-found", "invalid-request", "internal-error"）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// 一覧エンドポイント用のルーム概要
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomSummaryDto {
    pub id: String,
    pub host_id: String,
    pub participants: Vec<String>,
    pub message_count: usize,
    pub created_at: String, // RFC 3339
}
