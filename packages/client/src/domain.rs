//! Session state and the pure reducer that drives it.
//!
//! Every change of a controller's view goes through [`SessionView::apply`],
//! which has no side effects, making the state machine easy to test.

use std::collections::HashSet;

use studyroom_server::infrastructure::dto::http::{MessageDto, RoomInfoResponse};

use crate::error::ClientError;

/// Externally observed state of a session
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Connecting,
    Connected,
    Disconnected,
    Failed(ClientError),
}

impl SessionState {
    /// `Disconnected` and `Failed` never change again
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Disconnected | Self::Failed(_))
    }
}

/// Cached copy of the room as last reported by the server
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RoomSnapshot {
    pub participants: Vec<String>,
    pub messages: Vec<MessageDto>,
    pub host_id: Option<String>,
}

impl From<RoomInfoResponse> for RoomSnapshot {
    fn from(info: RoomInfoResponse) -> Self {
        Self {
            participants: info.participants,
            messages: info.messages,
            host_id: Some(info.host_id),
        }
    }
}

/// What observers of a controller see
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionView {
    pub state: SessionState,
    pub snapshot: RoomSnapshot,
}

/// Inputs of the reducer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// join-room succeeded
    Connected(RoomSnapshot),
    /// Fresh room state from a poll (or a push transport)
    Snapshot(RoomSnapshot),
    /// send-message succeeded
    MessageSent(MessageDto),
    Failed(ClientError),
    Disconnected,
}

impl SessionView {
    /// Apply an event; returns whether the view changed
    pub fn apply(&mut self, event: SessionEvent) -> bool {
        match event {
            SessionEvent::Connected(snapshot) if self.state == SessionState::Connecting => {
                self.state = SessionState::Connected;
                self.snapshot = snapshot;
                true
            }
            SessionEvent::Snapshot(snapshot) if self.state == SessionState::Connected => {
                let changed = self.snapshot.participants != snapshot.participants
                    || self.snapshot.messages != snapshot.messages;
                self.snapshot.participants = snapshot.participants;
                self.snapshot.messages = snapshot.messages;
                if snapshot.host_id.is_some() {
                    self.snapshot.host_id = snapshot.host_id;
                }
                changed
            }
            SessionEvent::MessageSent(message) if self.state == SessionState::Connected => {
                // ポーリングで既に届いている場合は追加しない
                if self.snapshot.messages.iter().any(|m| m.id == message.id) {
                    return false;
                }
                self.snapshot.messages.push(message);
                true
            }
            SessionEvent::Failed(error) if !self.state.is_terminal() => {
                self.state = SessionState::Failed(error);
                true
            }
            SessionEvent::Disconnected if !self.state.is_terminal() => {
                self.state = SessionState::Disconnected;
                true
            }
            _ => false,
        }
    }
}

/// Validate the identifiers before any request is made
pub fn validate_parameters(room_id: &str, user_id: &str) -> Result<(), ClientError> {
    if room_id.is_empty() {
        return Err(ClientError::InvalidParameters(
            "room id must not be empty".to_string(),
        ));
    }
    if user_id.is_empty() {
        return Err(ClientError::InvalidParameters(
            "participant id must not be empty".to_string(),
        ));
    }
    Ok(())
}

/// Messages of `next` whose id does not appear in `previous`, in order
pub fn new_messages<'a>(previous: &[MessageDto], next: &'a [MessageDto]) -> Vec<&'a MessageDto> {
    let seen: HashSet<&str> = previous.iter().map(|m| m.id.as_str()).collect();
    next.iter()
        .filter(|m| !seen.contains(m.id.as_str()))
        .collect()
}

/// Participants present in `next` but not in `previous`, and the reverse
pub fn roster_diff<'a>(
    previous: &'a [String],
    next: &'a [String],
) -> (Vec<&'a String>, Vec<&'a String>) {
    let joined = next.iter().filter(|p| !previous.contains(p)).collect();
    let left = previous.iter().filter(|p| !next.contains(p)).collect();
    (joined, left)
}
