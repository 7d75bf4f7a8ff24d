//! `POST /api/video`: the room lifecycle endpoint.
//!
//! One endpoint, five request types selected by the `type` field. Expired
//! rooms are swept before the request is dispatched; a failing sweep is logged
//! and does not stop the request.

use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    response::{IntoResponse, Response},
};

use crate::{
    domain::{MessageText, ParticipantId, RoomId, RoomMetadata},
    infrastructure::dto::http::{
        LeaveRoomResponse, RequestType, RoomInfoResponse, SendMessageResponse, VideoRequest,
    },
    ui::{error::ApiError, state::AppState},
};

pub async fn video_api(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<VideoRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        ApiError::invalid_request("Invalid request body", Some(rejection.body_text()))
    })?;

    sweep_expired_rooms(&state).await;

    let request_type = RequestType::parse(&request.request_type).ok_or_else(|| {
        ApiError::invalid_request(
            "Invalid request type",
            Some(format!("unknown type '{}'", request.request_type)),
        )
    })?;
    let room_id = RoomId::try_from(request.room_id)
        .map_err(|e| ApiError::invalid_request("Invalid request parameters", Some(e.to_string())))?;
    let user_id = ParticipantId::try_from(request.user_id)
        .map_err(|e| ApiError::invalid_request("Invalid request parameters", Some(e.to_string())))?;

    tracing::debug!(
        "Handling '{}' for room '{}' from '{}'",
        request_type.as_str(),
        room_id,
        user_id
    );

    match request_type {
        RequestType::CreateRoom => create_room(&state, room_id, user_id, request.data).await,
        RequestType::JoinRoom => join_room(&state, room_id, user_id).await,
        RequestType::LeaveRoom => leave_room(&state, room_id, user_id).await,
        RequestType::SendMessage => send_message(&state, room_id, user_id, request.data).await,
        RequestType::GetRoomInfo => get_room_info(&state, room_id).await,
    }
}

async fn sweep_expired_rooms(state: &AppState) {
    if let Err(e) = state.sweep_expired_rooms_usecase.execute().await {
        tracing::warn!("Expired room sweep failed, continuing with request: {}", e);
    }
}

async fn create_room(
    state: &AppState,
    room_id: RoomId,
    host_id: ParticipantId,
    data: Option<serde_json::Value>,
) -> Result<Response, ApiError> {
    let metadata = parse_metadata(data)?;
    let room = state
        .create_room_usecase
        .execute(room_id, host_id, metadata)
        .await?;

    let room_id = room.id.as_str().to_string();
    let mut response: RoomInfoResponse = room.into();
    response.room_id = Some(room_id);
    Ok(Json(response).into_response())
}

async fn join_room(
    state: &AppState,
    room_id: RoomId,
    user_id: ParticipantId,
) -> Result<Response, ApiError> {
    let room = state.join_room_usecase.execute(room_id, user_id).await?;
    Ok(Json(RoomInfoResponse::from(room)).into_response())
}

async fn leave_room(
    state: &AppState,
    room_id: RoomId,
    user_id: ParticipantId,
) -> Result<Response, ApiError> {
    // 退出は best-effort: ストアの失敗もクライアントには成功として返す
    if let Err(e) = state.leave_room_usecase.execute(room_id, user_id).await {
        tracing::error!("Failed to remove participant: {}", e);
    }
    Ok(Json(LeaveRoomResponse { success: true }).into_response())
}

async fn send_message(
    state: &AppState,
    room_id: RoomId,
    user_id: ParticipantId,
    data: Option<serde_json::Value>,
) -> Result<Response, ApiError> {
    let text = data
        .as_ref()
        .and_then(|d| d.get("text"))
        .and_then(serde_json::Value::as_str)
        .map(|t| MessageText::new(t.to_string()))
        .ok_or_else(|| {
            ApiError::invalid_request(
                "Invalid request parameters",
                Some("data.text must be a string".to_string()),
            )
        })?;

    let message = state
        .send_message_usecase
        .execute(room_id, user_id, text)
        .await?;
    Ok(Json(SendMessageResponse {
        message: message.into(),
    })
    .into_response())
}

async fn get_room_info(state: &AppState, room_id: RoomId) -> Result<Response, ApiError> {
    let room = state.get_room_info_usecase.execute(room_id).await?;
    Ok(Json(RoomInfoResponse::from(room)).into_response())
}

/// Turn create-room `data` into metadata (object or absent only)
fn parse_metadata(data: Option<serde_json::Value>) -> Result<Option<RoomMetadata>, ApiError> {
    match data {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::Object(map)) => Ok(Some(RoomMetadata::new(map))),
        Some(other) => Err(ApiError::invalid_request(
            "Invalid request parameters",
            Some(format!("data must be an object, got {}", other)),
        )),
    }
}
