//! ドメインエンティティから DTO への変換

use studyroom_shared::time::timestamp_to_rfc3339;

use crate::domain::{Message, Room};
use crate::infrastructure::dto::http as dto;

impl From<Message> for dto::MessageDto {
    fn from(model: Message) -> Self {
        Self {
            id: model.id.into_string(),
            user_id: model.sender_id.into_string(),
            text: model.text.into_string(),
            timestamp: timestamp_to_rfc3339(model.timestamp.value()),
        }
    }
}

impl From<Room> for dto::RoomInfoResponse {
    fn from(model: Room) -> Self {
        Self {
            room_id: None,
            participants: model
                .participants
                .into_iter()
                .map(|p| p.into_string())
                .collect(),
            messages: model.messages.into_iter().map(Into::into).collect(),
            data: model.metadata.map(|m| m.into_map()),
            host_id: model.host_id.into_string(),
        }
    }
}

impl From<Room> for dto::RoomSummaryDto {
    fn from(model: Room) -> Self {
        Self {
            id: model.id.into_string(),
            host_id: model.host_id.into_string(),
            message_count: model.messages.len(),
            participants: model
                .participants
                .into_iter()
                .map(|p| p.into_string())
                .collect(),
            created_at: timestamp_to_rfc3339(model.created_at.value()),
        }
    }
}
