use chrono::{DateTime, Utc};
use serde::Deserialize;
use ts_rs::TS;

use crate::models::common::PaginationQuery;

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct CreateAssignmentRequest {
    pub title: String,
    pub description: Option<String>,
    #[serde(default = "default_max_score")]
    pub max_score: f64,
    pub due_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub allow_late: bool,
    #[serde(default)]
    pub attachments: Vec<String>,
    #[serde(default)]
    pub published: bool,
}

fn default_max_score() -> f64 {
    100.0
}

/// `due_at` 使用双层 Option：缺省表示不修改，显式 null 表示清除截止时间
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct UpdateAssignmentRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub max_score: Option<f64>,
    #[serde(default, deserialize_with = "crate::models::common::double_option")]
    #[ts(type = "string | null")]
    pub due_at: Option<Option<DateTime<Utc>>>,
    pub allow_late: Option<bool>,
    pub attachments: Option<Vec<String>>,
    pub published: Option<bool>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct AssignmentListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub search: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct AssignmentListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub class_id: i64,
    pub search: Option<String>,
    pub published_only: bool,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct SubmitAssignmentRequest {
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub attachments: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct GradeSubmissionRequest {
    pub score: f64,
    pub feedback: Option<String>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct SubmissionListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    #[serde(default)]
    pub ungraded_only: bool,
}

#[derive(Debug, Clone, Default)]
pub struct SubmissionListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub assignment_id: i64,
    pub ungraded_only: bool,
}

/// 存储层写入提交
#[derive(Debug, Clone)]
pub struct UpsertSubmission {
    pub assignment_id: i64,
    pub student_id: i64,
    pub content: String,
    pub attachments: Vec<String>,
    pub is_late: bool,
}
