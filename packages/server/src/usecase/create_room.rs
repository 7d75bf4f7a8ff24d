//! UseCase: ルーム作成処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - CreateRoomUseCase::execute() メソッド
//!
//! ### なぜこのテストが必要か
//! - 作成者がホスト兼最初の参加者になることを保証
//! - 既存ルーム ID での作成が「マージ」ではなく「拒否」されることを保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：新規ルームの作成
//! - 異常系：既存ルーム ID での作成、ストアの失敗

use std::sync::Arc;

use studyroom_shared::time::Clock;

use crate::domain::{ParticipantId, Room, RoomId, RoomMetadata, RoomRepository, Timestamp};

use super::error::CreateRoomError;

/// ルーム作成のユースケース
pub struct CreateRoomUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn RoomRepository>,
    clock: Arc<dyn Clock>,
}

impl CreateRoomUseCase {
    /// 新しい CreateRoomUseCase を作成
    pub fn new(repository: Arc<dyn RoomRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    /// ルーム作成を実行
    ///
    /// # Returns
    ///
    /// * `Ok(Room)` - 作成されたルーム（参加者はホストのみ）
    /// * `Err(CreateRoomError::AlreadyExists)` - 同じ ID のルームが存在する
    pub async fn execute(
        &self,
        room_id: RoomId,
        host_id: ParticipantId,
        metadata: Option<RoomMetadata>,
    ) -> Result<Room, CreateRoomError> {
        let now = Timestamp::new(self.clock.now_millis());
        let room = self
            .repository
            .create_room(room_id, host_id, metadata, now)
            .await?;

        tracing::info!("Room '{}' created by host '{}'", room.id, room.host_id);
        Ok(room)
    }
}
