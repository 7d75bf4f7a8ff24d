//! InMemory Room Repository 実装
//!
//! ドメイン層が定義する RoomRepository trait の具体的な実装。
//! HashMap をインメモリ DB として使用します。
//!
//! ## 排他制御
//!
//! ルームテーブル全体を 1 つの `tokio::sync::Mutex` で保護します。
//! 各操作はロックを保持したまま完了するため、同じルームへの参加・退出・送信が
//! マルチスレッドのランタイム上で並行しても参加者集合やメッセージ順序は壊れません。
//!
//! ## 制約
//!
//! プロセス内メモリのみで保持するため、サーバーを複数台起動すると
//! それぞれが別々のルーム集合を持ちます。

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    ExpiryPolicy, LeaveOutcome, Message, MessageText, ParticipantId, RepositoryError, Room,
    RoomId, RoomMetadata, RoomRepository, Timestamp,
};

/// インメモリ Room Repository 実装
pub struct InMemoryRoomRepository {
    /// ルーム ID → Room
    rooms: Arc<Mutex<HashMap<RoomId, Room>>>,
}

impl InMemoryRoomRepository {
    /// 既存のルームテーブルを共有して InMemoryRoomRepository を作成
    pub fn new(rooms: Arc<Mutex<HashMap<RoomId, Room>>>) -> Self {
        Self { rooms }
    }

    /// 空のルームテーブルで作成
    pub fn empty() -> Self {
        Self::new(Arc::new(Mutex::new(HashMap::new())))
    }
}

impl Default for InMemoryRoomRepository {
    fn default() -> Self {
        Self::empty()
    }
}

#[async_trait]
impl RoomRepository for InMemoryRoomRepository {
    async fn create_room(
        &self,
        room_id: RoomId,
        host_id: ParticipantId,
        metadata: Option<RoomMetadata>,
        now: Timestamp,
    ) -> Result<Room, RepositoryError> {
        let mut rooms = self.rooms.lock().await;
        if rooms.contains_key(&room_id) {
            return Err(RepositoryError::RoomAlreadyExists(room_id.into_string()));
        }

        let room = Room::new(room_id.clone(), host_id, metadata, now);
        rooms.insert(room_id, room.clone());
        Ok(room)
    }

    async fn get_room(&self, room_id: &RoomId) -> Result<Room, RepositoryError> {
        let rooms = self.rooms.lock().await;
        rooms
            .get(room_id)
            .cloned()
            .ok_or_else(|| RepositoryError::RoomNotFound(room_id.as_str().to_string()))
    }

    async fn add_participant(
        &self,
        room_id: &RoomId,
        participant_id: ParticipantId,
        now: Timestamp,
    ) -> Result<Room, RepositoryError> {
        let mut rooms = self.rooms.lock().await;
        let room = rooms
            .get_mut(room_id)
            .ok_or_else(|| RepositoryError::RoomNotFound(room_id.as_str().to_string()))?;

        if !room.add_participant(participant_id.clone(), now) {
            tracing::debug!(
                "Participant '{}' is already in room '{}'",
                participant_id,
                room_id
            );
        }
        Ok(room.clone())
    }

    async fn remove_participant(
        &self,
        room_id: &RoomId,
        participant_id: &ParticipantId,
        now: Timestamp,
    ) -> Result<LeaveOutcome, RepositoryError> {
        let mut rooms = self.rooms.lock().await;
        let Some(room) = rooms.get_mut(room_id) else {
            return Ok(LeaveOutcome::RoomNotFound);
        };

        if !room.remove_participant(participant_id, now) {
            return Ok(LeaveOutcome::NotInRoom);
        }

        if room.is_empty() {
            rooms.remove(room_id);
            return Ok(LeaveOutcome::RoomClosed);
        }

        Ok(LeaveOutcome::Left)
    }

    async fn append_message(
        &self,
        room_id: &RoomId,
        sender_id: ParticipantId,
        text: MessageText,
        now: Timestamp,
    ) -> Result<Message, RepositoryError> {
        let mut rooms = self.rooms.lock().await;
        let room = rooms
            .get_mut(room_id)
            .ok_or_else(|| RepositoryError::RoomNotFound(room_id.as_str().to_string()))?;

        let message = Message::new(sender_id, text, now);
        room.append_message(message.clone());
        Ok(message)
    }

    async fn sweep_expired(
        &self,
        policy: ExpiryPolicy,
        now: Timestamp,
    ) -> Result<Vec<RoomId>, RepositoryError> {
        let mut rooms = self.rooms.lock().await;
        let mut expired: Vec<RoomId> = rooms
            .values()
            .filter(|room| policy.is_expired(room, now))
            .map(|room| room.id.clone())
            .collect();
        expired.sort();

        for room_id in &expired {
            rooms.remove(room_id);
        }
        Ok(expired)
    }

    async fn list_rooms(&self) -> Result<Vec<Room>, RepositoryError> {
        let rooms = self.rooms.lock().await;
        let mut list: Vec<Room> = rooms.values().cloned().collect();
        list.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(list)
    }
}
