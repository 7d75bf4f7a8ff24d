//! UseCase: ルーム退出処理
//!
//! 退出は best-effort です。参加していない・ルームが存在しない場合も成功として扱い、
//! 最後の参加者が退出した場合はルームを削除します。

use std::sync::Arc;

use studyroom_shared::time::Clock;

use crate::domain::{LeaveOutcome, ParticipantId, RoomId, RoomRepository, Timestamp};

use super::error::LeaveRoomError;

/// ルーム退出のユースケース
pub struct LeaveRoomUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn RoomRepository>,
    clock: Arc<dyn Clock>,
}

impl LeaveRoomUseCase {
    /// 新しい LeaveRoomUseCase を作成
    pub fn new(repository: Arc<dyn RoomRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    /// ルーム退出を実行
    pub async fn execute(
        &self,
        room_id: RoomId,
        participant_id: ParticipantId,
    ) -> Result<LeaveOutcome, LeaveRoomError> {
        let now = Timestamp::new(self.clock.now_millis());
        let outcome = self
            .repository
            .remove_participant(&room_id, &participant_id, now)
            .await?;

        match outcome {
            LeaveOutcome::Left => {
                tracing::info!("Participant '{}' left room '{}'", participant_id, room_id)
            }
            LeaveOutcome::RoomClosed => tracing::info!(
                "Participant '{}' left room '{}'; room is empty and was removed",
                participant_id,
                room_id
            ),
            LeaveOutcome::NotInRoom | LeaveOutcome::RoomNotFound => tracing::debug!(
                "Participant '{}' was not in room '{}' ({:?})",
                participant_id,
                room_id,
                outcome
            ),
        }
        Ok(outcome)
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

    async fn create_test_usecase() -> (LeaveRoomUseCase, Arc<InMemoryRoomRepository>) {
        let repository = Arc::new(InMemoryRoomRepository::empty());
        repository
            .create_room(room_id("abc123xyz"), participant("Alice"), None, Timestamp::new(0))
            .await
            .unwrap();
        repository
            .add_participant(&room_id("abc123xyz"), participant("Bob"), Timestamp::new(0))
            .await
            .unwrap();
        let usecase = LeaveRoomUseCase::new(repository.clone(), Arc::new(FixedClock::new(1_000)));
        (usecase, repository)
    }

    #[tokio::test]
    async fn test_host_leaves_room_stays_live() {
        // テスト項目: ホストが退出しても他の参加者がいればルームは残る
        // given (前提条件):
        let (usecase, repository) = create_test_usecase().await;

        // when (操作):
        let outcome = usecase
            .execute(room_id("abc123xyz"), participant("Alice"))
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(outcome, LeaveOutcome::Left);
        let room = repository.get_room(&room_id("abc123xyz")).await.unwrap();
        assert_eq!(room.participants, vec![participant("Bob")]);
        assert_eq!(room.host_id, participant("Alice"));
    }

    #[tokio::test]
    async fn test_last_participant_leaving_closes_room() {
        // テスト項目: 最後の参加者が退出するとルームが削除される
        // given (前提条件):
        let (usecase, repository) = create_test_usecase().await;
        usecase
            .execute(room_id("abc123xyz"), participant("Alice"))
            .await
            .unwrap();

        // when (操作):
        let outcome = usecase
            .execute(room_id("abc123xyz"), participant("Bob"))
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(outcome, LeaveOutcome::RoomClosed);
        assert!(repository.get_room(&room_id("abc123xyz")).await.is_err());
    }

    #[tokio::test]
    async fn test_leave_missing_room_succeeds() {
        // テスト項目: 存在しないルームからの退出も成功扱い
        // given (前提条件):
        let (usecase, _repository) = create_test_usecase().await;

        // when (操作):
        let result = usecase.execute(room_id("missing"), participant("Bob")).await;

        // then (期待する結果):
        assert_eq!(result, Ok(LeaveOutcome::RoomNotFound));
    }
}
