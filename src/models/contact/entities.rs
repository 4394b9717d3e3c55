use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

crate::define_string_enum! {
    #[ts(export, export_to = "../frontend/src/types/generated/contact.ts")]
    pub enum ContactStatus ("联系状态") {
        New = "new",
        Replied = "replied",
        Archived = "archived",
    }
}

/// 公开联系表单提交的留言
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/contact.ts")]
pub struct ContactMessage {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub status: ContactStatus,
    pub reply: Option<String>,
    pub replied_by: Option<i64>,
    pub replied_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}
