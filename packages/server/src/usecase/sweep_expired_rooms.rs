//! UseCase: 期限切れルームの削除
//!
//! リクエストごと（およびバックグラウンドの定期実行）に呼び出され、
//! 設定された ExpiryPolicy で期限切れと判定されたルームを参加者の有無に関係なく削除します。

use std::sync::Arc;

use studyroom_shared::time::Clock;

use crate::domain::{ExpiryPolicy, RoomId, RoomRepository, Timestamp};

use super::error::SweepError;

/// 期限切れルーム削除のユースケース
pub struct SweepExpiredRoomsUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn RoomRepository>,
    clock: Arc<dyn Clock>,
    policy: ExpiryPolicy,
}

impl SweepExpiredRoomsUseCase {
    /// 新しい SweepExpiredRoomsUseCase を作成
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        clock: Arc<dyn Clock>,
        policy: ExpiryPolicy,
    ) -> Self {
        Self {
            repository,
            clock,
            policy,
        }
    }

    /// 期限切れルームを削除し、削除したルーム ID を返す
    pub async fn execute(&self) -> Result<Vec<RoomId>, SweepError> {
        let now = Timestamp::new(self.clock.now_millis());
        let removed = self.repository.sweep_expired(self.policy, now).await?;

        for room_id in &removed {
            tracing::info!("Room '{}' expired and was removed", room_id);
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{MockRoomRepository, ParticipantId, RepositoryError},
        infrastructure::repository::InMemoryRoomRepository,
    };
    use studyroom_shared::time::FixedClock;

    const HOUR_MS: i64 = 60 * 60 * 1000;

    #[tokio::test]
    async fn test_sweep_removes_rooms_older_than_threshold() {
        // テスト項目: 24 時間を超えたルームだけが削除される
        // given (前提条件):
        let repository = Arc::new(InMemoryRoomRepository::empty());
        for (id, created_at) in [("old", 0), ("fresh", 2 * HOUR_MS)] {
            repository
                .create_room(
                    RoomId::new(id.to_string()).unwrap(),
                    ParticipantId::new("Alice".to_string()).unwrap(),
                    None,
                    Timestamp::new(created_at),
                )
                .await
                .unwrap();
        }
        let usecase = SweepExpiredRoomsUseCase::new(
            repository.clone(),
            Arc::new(FixedClock::new(25 * HOUR_MS)),
            ExpiryPolicy::default(),
        );

        // when (操作):
        let removed = usecase.execute().await.unwrap();

        // then (期待する結果):
        assert_eq!(removed, vec![RoomId::new("old".to_string()).unwrap()]);
        assert_eq!(repository.list_rooms().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_sweep_passes_policy_and_clock_to_repository() {
        // テスト項目: 設定したポリシーと現在時刻で Repository が呼ばれる
        // given (前提条件):
        let policy = ExpiryPolicy::Idle(std::time::Duration::from_secs(600));
        let mut repository = MockRoomRepository::new();
        repository
            .expect_sweep_expired()
            .withf(move |p, now| *p == policy && *now == Timestamp::new(42))
            .times(1)
            .returning(|_, _| Ok(vec![]));
        let usecase =
            SweepExpiredRoomsUseCase::new(Arc::new(repository), Arc::new(FixedClock::new(42)), policy);

        // when (操作):
        let result = usecase.execute().await;

        // then (期待する結果):
        assert_eq!(result, Ok(vec![]));
    }

    #[tokio::test]
    async fn test_sweep_failure_is_reported() {
        // テスト項目: ストアの失敗は SweepError として返される
        // given (前提条件):
        let mut repository = MockRoomRepository::new();
        repository
            .expect_sweep_expired()
            .returning(|_, _| Err(RepositoryError::Storage("unavailable".to_string())));
        let usecase = SweepExpiredRoomsUseCase::new(
            Arc::new(repository),
            Arc::new(FixedClock::new(0)),
            ExpiryPolicy::default(),
        );

        // when (操作):
        let result = usecase.execute().await;

        // then (期待する結果):
        assert!(matches!(result, Err(SweepError::Repository(_))));
    }
}
