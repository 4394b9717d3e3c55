use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 站内私信；双方各自软删除
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/message.ts")]
pub struct Message {
    pub id: i64,
    pub sender_id: i64,
    pub recipient_id: i64,
    pub subject: String,
    pub body: String,
    pub read_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing, default)]
    #[ts(skip)]
    pub sender_deleted: bool,
    #[serde(skip_serializing, default)]
    #[ts(skip)]
    pub recipient_deleted: bool,
    pub created_at: DateTime<Utc>,
}

impl Message {
    pub fn is_participant(&self, user_id: i64) -> bool {
        self.sender_id == user_id || self.recipient_id == user_id
    }

    /// 该用户是否仍能看到此消息
    pub fn visible_to(&self, user_id: i64) -> bool {
        (self.sender_id == user_id && !self.sender_deleted)
            || (self.recipient_id == user_id && !self.recipient_deleted)
    }
}
