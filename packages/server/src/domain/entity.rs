//! エンティティ: Room と Message

use super::{
    factory::MessageIdFactory,
    value_object::{MessageId, MessageText, ParticipantId, RoomId, RoomMetadata, Timestamp},
};

/// チャットメッセージ
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub id: MessageId,
    pub sender_id: ParticipantId,
    pub text: MessageText,
    pub timestamp: Timestamp,
}

impl Message {
    /// 新しい ID を採番してメッセージを作成
    pub fn new(sender_id: ParticipantId, text: MessageText, timestamp: Timestamp) -> Self {
        Self {
            id: MessageIdFactory::generate(),
            sender_id,
            text,
            timestamp,
        }
    }
}

/// 退出処理の結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaveOutcome {
    /// 参加者が退出し、ルームには他の参加者が残っている
    Left,
    /// 最後の参加者が退出したため、ルームを削除した
    RoomClosed,
    /// 参加者はルームにいなかった（退出済みとして扱う）
    NotInRoom,
    /// ルームが存在しなかった（退出済みとして扱う）
    RoomNotFound,
}

/// ルーム
///
/// 参加者は参加順に保持し、重複は許可しない。
/// メッセージは受理順に追加のみ行い、並べ替えや削除はしない。
#[derive(Debug, Clone, PartialEq)]
pub struct Room {
    pub id: RoomId,
    pub participants: Vec<ParticipantId>,
    pub messages: Vec<Message>,
    pub metadata: Option<RoomMetadata>,
    pub host_id: ParticipantId,
    pub created_at: Timestamp,
    /// idle ポリシーでのみ参照する最終操作時刻（参加していない人の退出では更新しない）
    pub last_activity_at: Timestamp,
}

impl Room {
    /// 作成者をホスト兼最初の参加者としてルームを作成
    pub fn new(
        id: RoomId,
        host_id: ParticipantId,
        metadata: Option<RoomMetadata>,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            participants: vec![host_id.clone()],
            messages: Vec::new(),
            metadata,
            host_id,
            created_at,
            last_activity_at: created_at,
        }
    }

    pub fn has_participant(&self, participant_id: &ParticipantId) -> bool {
        self.participants.contains(participant_id)
    }

    /// 参加者を追加（既にいる場合は何もしない）
    ///
    /// 新たに追加された場合は `true` を返す。
    pub fn add_participant(&mut self, participant_id: ParticipantId, at: Timestamp) -> bool {
        self.touch(at);
        if self.has_participant(&participant_id) {
            return false;
        }
        self.participants.push(participant_id);
        true
    }

    /// 参加者を削除（いない場合は何もしない）
    ///
    /// 削除された場合は `true` を返す。
    pub fn remove_participant(&mut self, participant_id: &ParticipantId, at: Timestamp) -> bool {
        let before = self.participants.len();
        self.participants.retain(|p| p != participant_id);
        let removed = self.participants.len() != before;
        if removed {
            self.touch(at);
        }
        removed
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    pub fn append_message(&mut self, message: Message) {
        self.touch(message.timestamp);
        self.messages.push(message);
    }

    fn touch(&mut self, at: Timestamp) {
        if at > self.last_activity_at {
            self.last_activity_at = at;
        }
    }
}
