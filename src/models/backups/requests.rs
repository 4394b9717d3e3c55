use serde::Deserialize;
use ts_rs::TS;

use crate::models::common::PaginationQuery;

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/backup.ts")]
pub struct CreateBackupRequest {
    pub note: Option<String>,
    /// 填写后把备份文件作为附件发送到该地址
    pub email_to: Option<String>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/backup.ts")]
pub struct EmailBackupRequest {
    pub email_to: String,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/backup.ts")]
pub struct BackupListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
}

#[derive(Debug, Clone)]
pub struct NewBackup {
    pub file_name: String,
    pub file_size: i64,
    pub note: Option<String>,
    pub created_by: i64,
}
