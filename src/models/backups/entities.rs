use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/backup.ts")]
pub struct Backup {
    pub id: i64,
    pub file_name: String,
    pub file_size: i64,
    pub note: Option<String>,
    pub created_by: i64,
    pub created_at: DateTime<Utc>,
}
