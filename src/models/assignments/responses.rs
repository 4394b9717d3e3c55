use serde::Serialize;
use ts_rs::TS;

use super::entities::{Assignment, Submission, SubmissionStatus};
use crate::models::common::PaginationInfo;
use crate::models::users::entities::UserSummary;

/// 作业及当前学生的提交状态（教师视角时为空）
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct AssignmentView {
    #[serde(flatten)]
    #[ts(flatten)]
    pub assignment: Assignment,
    pub my_status: Option<SubmissionStatus>,
    pub my_submission: Option<Submission>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct AssignmentListResponse {
    pub items: Vec<AssignmentView>,
    pub pagination: PaginationInfo,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct SubmissionView {
    #[serde(flatten)]
    #[ts(flatten)]
    pub submission: Submission,
    pub student: Option<UserSummary>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct SubmissionListResponse {
    pub items: Vec<SubmissionView>,
    pub pagination: PaginationInfo,
}
