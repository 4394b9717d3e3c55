use serde::Serialize;
use ts_rs::TS;

use super::entities::{SettingAudit, SystemSetting};
use crate::models::common::PaginationInfo;

/// 公开的系统信息
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/system.ts")]
pub struct SystemSettingsResponse {
    pub system_name: String,
    pub max_file_size: u64,
    pub allowed_file_types: Vec<String>,
    pub allow_registration: bool,
    pub environment: String,
    pub server_time: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/system.ts")]
pub struct AdminSettingsListResponse {
    pub settings: Vec<SystemSetting>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/system.ts")]
pub struct SettingAuditListResponse {
    pub audits: Vec<SettingAudit>,
    pub pagination: PaginationInfo,
}
