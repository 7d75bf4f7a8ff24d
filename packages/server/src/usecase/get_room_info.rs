//! UseCase: ルーム情報取得処理

use std::sync::Arc;

use crate::domain::{Room, RoomId, RoomRepository};

use super::error::RoomAccessError;

/// ルーム情報取得のユースケース
pub struct GetRoomInfoUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn RoomRepository>,
}

impl GetRoomInfoUseCase {
    /// 新しい GetRoomInfoUseCase を作成
    pub fn new(repository: Arc<dyn RoomRepository>) -> Self {
        Self { repository }
    }

    /// ルーム情報を取得
    pub async fn execute(&self, room_id: RoomId) -> Result<Room, RoomAccessError> {
        Ok(self.repository.get_room(&room_id).await?)
    }
}
