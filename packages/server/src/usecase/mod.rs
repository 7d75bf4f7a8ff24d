//! UseCase 層
//!
//! ルームのライフサイクル操作（作成・参加・退出・送信・取得）と
//! 期限切れルームの削除を、Repository trait を介して実行します。

mod create_room;
mod error;
mod get_room_info;
mod get_rooms;
mod join_room;
mod leave_room;
mod send_message;
mod sweep_expired_rooms;

pub use create_room::CreateRoomUseCase;
pub use error::{CreateRoomError, LeaveRoomError, RoomAccessError, SweepError};
pub use get_room_info::GetRoomInfoUseCase;
pub use get_rooms::GetRoomsUseCase;
pub use join_room::JoinRoomUseCase;
pub use leave_room::LeaveRoomUseCase;
pub use send_message::SendMessageUseCase;
pub use sweep_expired_rooms::SweepExpiredRoomsUseCase;
