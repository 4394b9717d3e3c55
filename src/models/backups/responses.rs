use serde::Serialize;
use ts_rs::TS;

use super::entities::Backup;
use crate::models::common::PaginationInfo;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/backup.ts")]
pub struct BackupListResponse {
    pub items: Vec<Backup>,
    pub pagination: PaginationInfo,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/backup.ts")]
pub struct BackupCreatedResponse {
    pub backup: Backup,
    /// 每张表导出的行数
    #[ts(type = "Record<string, number>")]
    pub table_counts: std::collections::BTreeMap<String, usize>,
    pub emailed_to: Option<String>,
}
