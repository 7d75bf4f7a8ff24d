//! Repository trait 定義
//!
//! ドメイン層が必要とするデータアクセスのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;

use super::{
    ExpiryPolicy, LeaveOutcome, Message, MessageText, ParticipantId, RepositoryError, Room,
    RoomId, RoomMetadata, Timestamp,
};

/// Room Repository trait
///
/// 全ルームを保持するストアへのインターフェース。
/// UseCase 層はこの trait に依存し、Infrastructure 層の具体的な実装には依存しない。
///
/// ## 一貫性
///
/// - 各操作は他の操作と交錯せずに完了すること（実装側で排他制御を行う）
/// - 更新は直後の `get_room` から観測できること
/// - 参加者が 0 人になったルームは保持しないこと
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// ルームを作成（同じ ID のルームがあれば `RoomAlreadyExists`）
    async fn create_room(
        &self,
        room_id: RoomId,
        host_id: ParticipantId,
        metadata: Option<RoomMetadata>,
        now: Timestamp,
    ) -> Result<Room, RepositoryError>;

    /// ルームを取得
    async fn get_room(&self, room_id: &RoomId) -> Result<Room, RepositoryError>;

    /// 参加者を追加（参加済みなら何もしない）し、更新後のルームを返す
    async fn add_participant(
        &self,
        room_id: &RoomId,
        participant_id: ParticipantId,
        now: Timestamp,
    ) -> Result<Room, RepositoryError>;

    /// 参加者を削除し、0 人になったらルームも削除する
    async fn remove_participant(
        &self,
        room_id: &RoomId,
        participant_id: &ParticipantId,
        now: Timestamp,
    ) -> Result<LeaveOutcome, RepositoryError>;

    /// メッセージを採番して追加し、作成したメッセージを返す
    async fn append_message(
        &self,
        room_id: &RoomId,
        sender_id: ParticipantId,
        text: MessageText,
        now: Timestamp,
    ) -> Result<Message, RepositoryError>;

    /// ポリシー上期限切れのルームを全て削除し、削除したルーム ID を返す
    async fn sweep_expired(
        &self,
        policy: ExpiryPolicy,
        now: Timestamp,
    ) -> Result<Vec<RoomId>, RepositoryError>;

    /// 全ルームを ID 順に取得
    async fn list_rooms(&self) -> Result<Vec<Room>, RepositoryError>;
}
