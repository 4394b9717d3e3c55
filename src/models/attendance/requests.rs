use chrono::{DateTime, Utc};
use serde::Deserialize;
use ts_rs::TS;

use super::entities::AttendanceStatus;
use crate::models::common::PaginationQuery;

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct CreateSessionRequest {
    pub title: String,
    /// 缺省为当前时间
    pub opens_at: Option<DateTime<Utc>>,
    /// 缺省为开始后 duration_minutes 分钟
    pub closes_at: Option<DateTime<Utc>>,
    pub duration_minutes: Option<i64>,
    #[serde(default = "default_late_after")]
    pub late_after_minutes: i32,
}

fn default_late_after() -> i32 {
    10
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct SessionListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct CheckInRequest {
    pub code: String,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct SetRecordRequest {
    pub status: AttendanceStatus,
    pub note: Option<String>,
}

/// 存储层新建场次
#[derive(Debug, Clone)]
pub struct NewSession {
    pub class_id: i64,
    pub created_by: i64,
    pub title: String,
    pub code: String,
    pub opens_at: DateTime<Utc>,
    pub closes_at: DateTime<Utc>,
    pub late_after_minutes: i32,
}

/// 存储层写入记录
#[derive(Debug, Clone)]
pub struct UpsertRecord {
    pub session_id: i64,
    pub student_id: i64,
    pub status: AttendanceStatus,
    pub checked_in_at: Option<DateTime<Utc>>,
    pub note: Option<String>,
}
