//! Session creation: a host opens a new room under a generated meeting id.

use uuid::Uuid;

use crate::{api::RoomApi, error::ClientError};

/// Length of a generated meeting id
pub const MEETING_ID_LEN: usize = 12;

/// Metadata stored with a room when a session is created
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionMetadata {
    pub session_name: String,
    pub description: Option<String>,
}

impl SessionMetadata {
    /// Room `data` object (`sessionName`, optional `description`)
    pub fn to_data(&self) -> serde_json::Map<String, serde_json::Value> {
        let mut data = serde_json::Map::new();
        data.insert(
            "sessionName".to_string(),
            serde_json::Value::String(self.session_name.clone()),
        );
        if let Some(description) = &self.description {
            data.insert(
                "description".to_string(),
                serde_json::Value::String(description.clone()),
            );
        }
        data
    }
}

/// Generate a meeting id of lowercase letters and digits
pub fn generate_meeting_id() -> String {
    let mut id = Uuid::new_v4().simple().to_string();
    id.truncate(MEETING_ID_LEN);
    id
}

/// Create a room for `host_id` and return its meeting id
///
/// The host then joins through a `SessionController` like everyone else.
pub async fn create_session(
    api: &dyn RoomApi,
    host_id: &str,
    metadata: &SessionMetadata,
) -> Result<String, ClientError> {
    if host_id.is_empty() {
        return Err(ClientError::InvalidParameters(
            "host id must not be empty".to_string(),
        ));
    }
    if metadata.session_name.is_empty() {
        return Err(ClientError::InvalidParameters(
            "session name must not be empty".to_string(),
        ));
    }

    let meeting_id = generate_meeting_id();
    api.create_room(&meeting_id, host_id, Some(metadata.to_data()))
        .await?;

    tracing::info!(
        "Session '{}' created as room '{}'",
        metadata.session_name,
        meeting_id
    );
    Ok(meeting_id)
}
