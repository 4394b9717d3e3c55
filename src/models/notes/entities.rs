use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/note.ts")]
pub struct Note {
    pub id: i64,
    pub class_id: i64,
    pub author_id: i64,
    pub title: String,
    /// Markdown 正文
    pub content: String,
    /// 附件下载令牌
    pub attachments: Vec<String>,
    pub pinned: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
