//! ルームの有効期限ポリシー

use std::time::Duration;

use super::entity::Room;
use super::value_object::Timestamp;

/// 期限切れ判定のデフォルト（24 時間）
pub const DEFAULT_ROOM_MAX_AGE: Duration = Duration::from_secs(24 * 60 * 60);

/// ルームを期限切れとみなす基準
///
/// - `Absolute`: 作成時刻からの経過時間。参加者の有無や活動に関係なく削除する
/// - `Idle`: 最後の操作（作成・参加・退出・送信）からの経過時間
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpiryPolicy {
    Absolute(Duration),
    Idle(Duration),
}

impl Default for ExpiryPolicy {
    fn default() -> Self {
        Self::Absolute(DEFAULT_ROOM_MAX_AGE)
    }
}

impl ExpiryPolicy {
    pub fn threshold(&self) -> Duration {
        match self {
            Self::Absolute(max_age) => *max_age,
            Self::Idle(timeout) => *timeout,
        }
    }

    /// 閾値を「超えた」ルームだけが期限切れ（ちょうど閾値のルームは残す）
    pub fn is_expired(&self, room: &Room, now: Timestamp) -> bool {
        let reference = match self {
            Self::Absolute(_) => room.created_at,
            Self::Idle(_) => room.last_activity_at,
        };
        u128::from(now.millis_since(reference)) > self.threshold().as_millis()
    }
}
