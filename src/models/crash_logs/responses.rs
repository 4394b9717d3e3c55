use serde::Serialize;
use ts_rs::TS;

use super::entities::CrashLog;
use crate::models::common::PaginationInfo;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/crash-log.ts")]
pub struct CrashLogListResponse {
    pub items: Vec<CrashLog>,
    pub pagination: PaginationInfo,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/crash-log.ts")]
pub struct PurgeResponse {
    pub deleted: u64,
}
