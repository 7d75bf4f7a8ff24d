//! Message formatting utilities for client display.

use studyroom_server::infrastructure::dto::http::MessageDto;

use crate::{domain::RoomSnapshot, error::ClientError};

const RULE: &str = "============================================================";
const THIN_RULE: &str = "------------------------------------------------------------";

/// Message formatter for client display
pub struct MessageFormatter;

impl MessageFormatter {
    /// Format the roster shown once the session is connected
    ///
    /// # Arguments
    ///
    /// * `room_id` - The room the session joined
    /// * `snapshot` - Room state returned by join-room
    /// * `current_user_id` - The current participant (marked as "me")
    pub fn format_room_connected(
        room_id: &str,
        snapshot: &RoomSnapshot,
        current_user_id: &str,
    ) -> String {
        let mut output = String::new();
        output.push_str(&format!("\n\n{}\n", RULE));
        output.push_str(&format!("Room: {}\n", room_id));
        output.push_str("Participants:\n");

        if snapshot.participants.is_empty() {
            output.push_str("(No participants)\n");
        } else {
            for participant in &snapshot.participants {
                let mut suffix = String::new();
                if snapshot.host_id.as_deref() == Some(participant.as_str()) {
                    suffix.push_str(" (host)");
                }
                if participant == current_user_id {
                    suffix.push_str(" (me)");
                }
                output.push_str(&format!("{}{}\n", participant, suffix));
            }
        }

        output.push_str(&format!("{}\n", RULE));
        output
    }

    pub fn format_participant_joined(user_id: &str) -> String {
        format!("\n+ {} entered\n", user_id)
    }

    pub fn format_participant_left(user_id: &str) -> String {
        format!("\n- {} left\n", user_id)
    }

    /// Format a chat message from another participant
    pub fn format_chat_message(message: &MessageDto) -> String {
        format!(
            "\n\n{rule}\n@{}: {}\nsent at {}\n{rule}\n",
            message.user_id,
            message.text,
            message.timestamp,
            rule = THIN_RULE
        )
    }

    /// Format the confirmation for a message this participant sent
    pub fn format_sent_confirmation(message: &MessageDto) -> String {
        format!("sent at {}\n", message.timestamp)
    }

    pub fn format_session_created(meeting_id: &str, session_name: &str) -> String {
        format!(
            "\nSession '{}' created. Meeting id: {}\n",
            session_name, meeting_id
        )
    }

    pub fn format_connect_failed(room_id: &str, error: &ClientError) -> String {
        format!("\nCould not join room '{}': {}\n", room_id, error)
    }
}
