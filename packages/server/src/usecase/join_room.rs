//! UseCase: ルーム参加処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - JoinRoomUseCase::execute() メソッド
//!
//! ### なぜこのテストが必要か
//! - 参加が冪等であること（再参加で参加者が増えない）を保証
//! - 存在しないルームへの参加が NotFound になることを保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：新規参加、再参加
//! - 異常系：存在しないルーム

use std::sync::Arc;

use studyroom_shared::time::Clock;

use crate::domain::{ParticipantId, Room, RoomId, RoomRepository, Timestamp};

use super::error::RoomAccessError;

/// ルーム参加のユースケース
pub struct JoinRoomUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn RoomRepository>,
    clock: Arc<dyn Clock>,
}

impl JoinRoomUseCase {
    /// 新しい JoinRoomUseCase を作成
    pub fn new(repository: Arc<dyn RoomRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    /// ルーム参加を実行
    ///
    /// # Returns
    ///
    /// * `Ok(Room)` - 参加後のルーム
    /// * `Err(RoomAccessError::NotFound)` - ルームが存在しない
    pub async fn execute(
        &self,
        room_id: RoomId,
        participant_id: ParticipantId,
    ) -> Result<Room, RoomAccessError> {
        let now = Timestamp::new(self.clock.now_millis());
        let room = self
            .repository
            .add_participant(&room_id, participant_id.clone(), now)
            .await?;

        tracing::info!(
            "Participant '{}' joined room '{}' ({} participants)",
            participant_id,
            room_id,
            room.participants.len()
        );
        Ok(room)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::repository::InMemoryRoomRepository;
    use studyroom_shared::time::FixedClock;

    fn room_id(value: &str) -> RoomId {
        RoomId::new(value.to_string()).unwrap()
    }

    fn participant(value: &str) -> ParticipantId {
        ParticipantId::new(value.to_string()).unwrap()
    }

    async fn create_test_usecase() -> JoinRoomUseCase {
        let repository = Arc::new(InMemoryRoomRepository::empty());
        repository
            .create_room(room_id("abc123xyz"), participant("Alice"), None, Timestamp::new(0))
            .await
            .unwrap();
        JoinRoomUseCase::new(repository, Arc::new(FixedClock::new(1_000)))
    }

    #[tokio::test]
    async fn test_join_room_success() {
        // テスト項目: 参加者が参加順にルームへ追加される
        // given (前提条件):
        let usecase = create_test_usecase().await;

        // when (操作):
        let result = usecase.execute(room_id("abc123xyz"), participant("Bob")).await;

        // then (期待する結果):
        let room = result.unwrap();
        assert_eq!(room.participants, vec![participant("Alice"), participant("Bob")]);
        assert_eq!(room.host_id, participant("Alice"));
    }

    #[tokio::test]
    async fn test_join_room_twice_is_idempotent() {
        // テスト項目: 同じ参加者が 2 回参加しても参加者数は変わらない
        // given (前提条件):
        let usecase = create_test_usecase().await;
        usecase
            .execute(room_id("abc123xyz"), participant("Bob"))
            .await
            .unwrap();

        // when (操作):
        let room = usecase
            .execute(room_id("abc123xyz"), participant("Bob"))
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(room.participants.len(), 2);
    }

    #[tokio::test]
    async fn test_join_missing_room() {
        // テスト項目: 存在しないルームへの参加は NotFound
        // given (前提条件):
        let usecase = create_test_usecase().await;

        // when (操作):
        let result = usecase.execute(room_id("missing"), participant("Bob")).await;

        // then (期待する結果):
        assert_eq!(result, Err(RoomAccessError::NotFound("missing".to_string())));
    }
}
