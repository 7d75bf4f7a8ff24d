//! ID の採番

use uuid::Uuid;

use super::value_object::MessageId;

/// メッセージ ID のファクトリ
///
/// UUID v4 を使うため、同一ミリ秒に送信されたメッセージでも衝突しない。
pub struct MessageIdFactory;

impl MessageIdFactory {
    pub fn generate() -> MessageId {
        MessageId::new(Uuid::new_v4().to_string())
    }
}
