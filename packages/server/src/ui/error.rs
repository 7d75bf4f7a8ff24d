//! API error type and its HTTP representation.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::{
    infrastructure::dto::http::ErrorResponse,
    usecase::{CreateRoomError, RoomAccessError},
};

/// Every failure the room API can answer with
///
/// The `Display` text is the `error` field of the response body.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ApiError {
    /// create-room on a live room id (400)
    #[error("Room already exists")]
    AlreadyExists(String),

    /// Room never created, expired, or closed (404)
    #[error("Room not found")]
    NotFound(String),

    /// Malformed body, unknown type, or missing fields (400)
    #[error("{message}")]
    InvalidRequest {
        message: String,
        details: Option<String>,
    },

    /// Unexpected failure inside the server (500)
    #[error("Internal server error")]
    Internal(String),
}

impl ApiError {
    pub fn invalid_request(message: impl Into<String>, details: Option<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
            details,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::AlreadyExists(_) | Self::InvalidRequest { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::AlreadyExists(_) => "already-exists",
            Self::NotFound(_) => "not-found",
            Self::InvalidRequest { .. } => "invalid-request",
            Self::Internal(_) => "internal-error",
        }
    }

    fn details(&self) -> Option<String> {
        match self {
            Self::InvalidRequest { details, .. } => details.clone(),
            Self::Internal(details) => Some(details.clone()),
            Self::AlreadyExists(_) | Self::NotFound(_) => None,
        }
    }

    pub fn to_body(&self) -> ErrorResponse {
        ErrorResponse {
            error: self.to_string(),
            code: Some(self.code().to_string()),
            details: self.details(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            Self::Internal(details) => tracing::error!("Room API internal error: {}", details),
            Self::AlreadyExists(room_id) => {
                tracing::warn!("Rejected create-room: room '{}' already exists", room_id)
            }
            Self::NotFound(room_id) => tracing::debug!("Room '{}' not found", room_id),
            Self::InvalidRequest { message, details } => {
                tracing::warn!("Invalid request: {} ({:?})", message, details)
            }
        }
        (self.status(), Json(self.to_body())).into_response()
    }
}

impl From<CreateRoomError> for ApiError {
    fn from(error: CreateRoomError) -> Self {
        match error {
            CreateRoomError::AlreadyExists(room_id) => Self::AlreadyExists(room_id),
            CreateRoomError::Repository(details) => Self::Internal(details),
        }
    }
}

impl From<RoomAccessError> for ApiError {
    fn from(error: RoomAccessError) -> Self {
        match error {
            RoomAccessError::NotFound(room_id) => Self::NotFound(room_id),
            RoomAccessError::Repository(details) => Self::Internal(details),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes_per_kind() {
        // テスト項目: エラー種別ごとに 400 / 404 / 500 が割り当てられる
        // given (前提条件):
        let cases = [
            (ApiError::AlreadyExists("r".to_string()), StatusCode::BAD_REQUEST),
            (ApiError::NotFound("r".to_string()), StatusCode::NOT_FOUND),
            (
                ApiError::invalid_request("Invalid request type", None),
                StatusCode::BAD_REQUEST,
            ),
            (
                ApiError::Internal("boom".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        // when (操作) / then (期待する結果):
        for (error, status) in cases {
            assert_eq!(error.status(), status);
        }
    }

    #[test]
    fn test_error_body_matches_contract() {
        // テスト項目: レスポンスボディの error / details が契約どおりになる
        // given (前提条件):
        let not_found = ApiError::NotFound("abc123xyz".to_string());
        let internal = ApiError::Internal("lock poisoned".to_string());

        // when (操作):
        let not_found_body = not_found.to_body();
        let internal_body = internal.to_body();

        // then (期待する結果):
        assert_eq!(not_found_body.error, "Room not found");
        assert_eq!(not_found_body.code.as_deref(), Some("not-found"));
        assert_eq!(not_found_body.details, None);
        assert_eq!(internal_body.error, "Internal server error");
        assert_eq!(internal_body.details.as_deref(), Some("lock poisoned"));
    }

    #[test]
    fn test_usecase_errors_are_translated() {
        // テスト項目: UseCase のエラーが対応する API エラーに変換される
        // given (前提条件):
        let exists = CreateRoomError::AlreadyExists("r".to_string());
        let storage = RoomAccessError::Repository("down".to_string());

        // when (操作):
        let exists: ApiError = exists.into();
        let storage: ApiError = storage.into();

        // then (期待する結果):
        assert_eq!(exists, ApiError::AlreadyExists("r".to_string()));
        assert_eq!(storage, ApiError::Internal("down".to_string()));
    }
}
