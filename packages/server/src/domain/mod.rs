//! ドメイン層
//!
//! ルーム（Room）とチャットメッセージ（Message）のモデル、値オブジェクト、
//! 有効期限ポリシー、およびデータアクセスのインターフェース（Repository trait）を定義します。
//! この層は HTTP や永続化の方式に依存しません。

pub mod entity;
pub mod error;
pub mod factory;
pub mod policy;
pub mod repository;
pub mod value_object;

pub use entity::{LeaveOutcome, Message, Room};
pub use error::{RepositoryError, ValueObjectError};
pub use factory::MessageIdFactory;
pub use policy::ExpiryPolicy;
pub use repository::RoomRepository;
pub use value_object::{MessageId, MessageText, ParticipantId, RoomId, RoomMetadata, Timestamp};

#[cfg(test)]
pub use repository::MockRoomRepository;
