use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/file.ts")]
pub struct File {
    pub id: i64,
    // 下载令牌，也是附件引用
    pub token: String,
    pub original_name: String,
    #[serde(skip_serializing, default)]
    #[ts(skip)]
    pub stored_name: String,
    pub file_size: i64,
    pub file_type: String,
    pub user_id: i64,
    pub uploaded_at: chrono::DateTime<chrono::Utc>,
}
