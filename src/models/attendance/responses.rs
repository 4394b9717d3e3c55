use serde::Serialize;
use ts_rs::TS;

use super::entities::{AttendanceRecord, AttendanceSession, AttendanceStatus, AttendanceTally};
use crate::models::common::PaginationInfo;
use crate::models::users::entities::UserSummary;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct SessionView {
    #[serde(flatten)]
    #[ts(flatten)]
    pub session: AttendanceSession,
    pub is_open: bool,
    /// 学生视角：本人记录
    pub my_status: Option<AttendanceStatus>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct SessionListResponse {
    pub items: Vec<SessionView>,
    pub pagination: PaginationInfo,
}

/// 名单中的一行，未签到的学生 record 为空、status 为 absent
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct RosterEntry {
    pub student: UserSummary,
    pub status: AttendanceStatus,
    pub record: Option<AttendanceRecord>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct SessionRosterResponse {
    pub session: AttendanceSession,
    pub entries: Vec<RosterEntry>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct StudentAttendanceSummary {
    pub student: UserSummary,
    #[serde(flatten)]
    #[ts(flatten)]
    pub tally: AttendanceTally,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct AttendanceSummaryResponse {
    pub session_count: i64,
    pub students: Vec<StudentAttendanceSummary>,
}
