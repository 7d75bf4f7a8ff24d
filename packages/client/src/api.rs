//! Room API client.
//!
//! `RoomApi` is the seam the session controller talks through; `HttpRoomApi`
//! is the reqwest implementation against `POST /api/video`.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use studyroom_server::infrastructure::dto::http::{
    ErrorResponse, LeaveRoomResponse, MessageDto, RequestType, RoomInfoResponse,
    SendMessageResponse, VideoRequest,
};

use crate::error::ClientError;

/// Room lifecycle operations as seen by a client
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoomApi: Send + Sync {
    async fn create_room(
        &self,
        room_id: &str,
        user_id: &str,
        data: Option<serde_json::Map<String, serde_json::Value>>,
    ) -> Result<RoomInfoResponse, ClientError>;

    async fn join_room(&self, room_id: &str, user_id: &str)
    -> Result<RoomInfoResponse, ClientError>;

    async fn leave_room(&self, room_id: &str, user_id: &str) -> Result<(), ClientError>;

    async fn send_message(
        &self,
        room_id: &str,
        user_id: &str,
        text: &str,
    ) -> Result<MessageDto, ClientError>;

    async fn get_room_info(
        &self,
        room_id: &str,
        user_id: &str,
    ) -> Result<RoomInfoResponse, ClientError>;
}

/// `RoomApi` over HTTP
#[derive(Debug, Clone)]
pub struct HttpRoomApi {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpRoomApi {
    /// Create a client for the server at `base_url` (e.g. `http://127.0.0.1:8080`)
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: format!("{}/api/video", base_url.trim_end_matches('/')),
        }
    }

    async fn post<T: DeserializeOwned>(&self, request: &VideoRequest) -> Result<T, ClientError> {
        tracing::debug!("POST {} type={}", self.endpoint, request.request_type);

        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return response
                .json::<T>()
                .await
                .map_err(|e| ClientError::Transport(e.to_string()));
        }

        let body = response
            .json::<ErrorResponse>()
            .await
            .unwrap_or_else(|_| ErrorResponse {
                error: status.to_string(),
                code: None,
                details: None,
            });
        Err(error_from_response(status, body))
    }
}

#[async_trait]
impl RoomApi for HttpRoomApi {
    async fn create_room(
        &self,
        room_id: &str,
        user_id: &str,
        data: Option<serde_json::Map<String, serde_json::Value>>,
    ) -> Result<RoomInfoResponse, ClientError> {
        let data = data.map(serde_json::Value::Object);
        self.post(&VideoRequest::new(
            RequestType::CreateRoom,
            room_id,
            user_id,
            data,
        ))
        .await
    }

    async fn join_room(
        &self,
        room_id: &str,
        user_id: &str,
    ) -> Result<RoomInfoResponse, ClientError> {
        self.post(&VideoRequest::new(
            RequestType::JoinRoom,
            room_id,
            user_id,
            None,
        ))
        .await
    }

    async fn leave_room(&self, room_id: &str, user_id: &str) -> Result<(), ClientError> {
        let _: LeaveRoomResponse = self
            .post(&VideoRequest::new(
                RequestType::LeaveRoom,
                room_id,
                user_id,
                None,
            ))
            .await?;
        Ok(())
    }

    async fn send_message(
        &self,
        room_id: &str,
        user_id: &str,
        text: &str,
    ) -> Result<MessageDto, ClientError> {
        let data = serde_json::json!({ "text": text });
        let response: SendMessageResponse = self
            .post(&VideoRequest::new(
                RequestType::SendMessage,
                room_id,
                user_id,
                Some(data),
            ))
            .await?;
        Ok(response.message)
    }

    async fn get_room_info(
        &self,
        room_id: &str,
        user_id: &str,
    ) -> Result<RoomInfoResponse, ClientError> {
        self.post(&VideoRequest::new(
            RequestType::GetRoomInfo,
            room_id,
            user_id,
            None,
        ))
        .await
    }
}

/// Map an error response to a `ClientError`
///
/// The `code` field decides the kind; bodies without one fall back to the status.
pub fn error_from_response(status: StatusCode, body: ErrorResponse) -> ClientError {
    let message = match body.details {
        Some(details) => format!("{} ({})", body.error, details),
        None => body.error,
    };

    match body.code.as_deref() {
        Some("already-exists") => ClientError::AlreadyExists(message),
        Some("not-found") => ClientError::NotFound(message),
        Some("invalid-request") => ClientError::InvalidRequest(message),
        Some("internal-error") => ClientError::Internal(message),
        _ => match status {
            StatusCode::NOT_FOUND => ClientError::NotFound(message),
            StatusCode::BAD_REQUEST if message.starts_with("Room already exists") => {
                ClientError::AlreadyExists(message)
            }
            s if s.is_client_error() => ClientError::InvalidRequest(message),
            _ => ClientError::Internal(message),
        },
    }
}
