//! UseCase: メッセージ送信処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SendMessageUseCase::execute() メソッド
//!
//! ### なぜこのテストが必要か
//! - サーバー側で ID と時刻が付与されることを保証
//! - 送信したメッセージがルームの履歴の末尾に追加されることを保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：メッセージ送信
//! - 異常系：存在しないルームへの送信

use std::sync::Arc;

use studyroom_shared::time::Clock;

use crate::domain::{Message, MessageText, ParticipantId, RoomId, RoomRepository, Timestamp};

use super::error::RoomAccessError;

/// メッセージ送信のユースケース
pub struct SendMessageUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn RoomRepository>,
    clock: Arc<dyn Clock>,
}

impl SendMessageUseCase {
    /// 新しい SendMessageUseCase を作成
    pub fn new(repository: Arc<dyn RoomRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    /// メッセージ送信を実行
    ///
    /// # Returns
    ///
    /// * `Ok(Message)` - 採番済みのメッセージ
    /// * `Err(RoomAccessError::NotFound)` - ルームが存在しない
    pub async fn execute(
        &self,
        room_id: RoomId,
        sender_id: ParticipantId,
        text: MessageText,
    ) -> Result<Message, RoomAccessError> {
        let now = Timestamp::new(self.clock.now_millis());
        let message = self
            .repository
            .append_message(&room_id, sender_id, text, now)
            .await?;

        tracing::debug!(
            "Message '{}' from '{}' appended to room '{}'",
            message.id.as_str(),
            message.sender_id,
            room_id
        );
        Ok(message)
    }
}
