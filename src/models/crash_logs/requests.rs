use serde::Deserialize;
use ts_rs::TS;

use crate::models::common::PaginationQuery;

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/crash-log.ts")]
pub struct ReportCrashRequest {
    pub message: String,
    pub stack: Option<String>,
    pub url: Option<String>,
    pub app_version: Option<String>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/crash-log.ts")]
pub struct ResolveCrashRequest {
    #[serde(default = "default_resolved")]
    pub resolved: bool,
}

fn default_resolved() -> bool {
    true
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/crash-log.ts")]
pub struct CrashLogListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub resolved: Option<bool>,
    pub search: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct CrashLogListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub resolved: Option<bool>,
    pub search: Option<String>,
}

/// 存储层写入，user_agent 取自请求头
#[derive(Debug, Clone)]
pub struct NewCrashLog {
    pub user_id: Option<i64>,
    pub message: String,
    pub stack: Option<String>,
    pub url: Option<String>,
    pub user_agent: Option<String>,
    pub app_version: Option<String>,
}
