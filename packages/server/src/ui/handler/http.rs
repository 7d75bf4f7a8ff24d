//! Operational HTTP endpoints.

use std::sync::Arc;

use axum::{Json, extract::State};

use crate::{
    infrastructure::dto::http::RoomSummaryDto,
    ui::{error::ApiError, state::AppState},
};

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Get list of live rooms
pub async fn get_rooms(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<RoomSummaryDto>>, ApiError> {
    let rooms = state.get_rooms_usecase.execute().await?;

    // Domain Model から DTO への変換
    let room_summaries: Vec<RoomSummaryDto> = rooms.into_iter().map(Into::into).collect();

    Ok(Json(room_summaries))
}
