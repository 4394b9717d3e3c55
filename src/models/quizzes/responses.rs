use chrono::{DateTime, Utc};
use serde::Serialize;
use ts_rs::TS;

use super::entities::{PublicQuestion, QuizAttempt, QuizQuestion, QuizSummary};
use crate::models::common::PaginationInfo;
use crate::models::users::entities::UserSummary;

/// 教师拿到完整题目，学生拿到去掉答案的题目
#[derive(Debug, Serialize, TS)]
#[serde(untagged)]
#[ts(export, export_to = "../frontend/src/types/generated/quiz.ts")]
pub enum QuestionSet {
    Full(Vec<QuizQuestion>),
    Redacted(Vec<PublicQuestion>),
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/quiz.ts")]
pub struct QuizDetailResponse {
    #[serde(flatten)]
    #[ts(flatten)]
    pub quiz: QuizSummary,
    pub questions: QuestionSet,
    /// 学生已用次数
    pub attempts_used: Option<i64>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/quiz.ts")]
pub struct QuizListResponse {
    pub items: Vec<QuizSummary>,
    pub pagination: PaginationInfo,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/quiz.ts")]
pub struct AttemptResponse {
    #[serde(flatten)]
    #[ts(flatten)]
    pub attempt: QuizAttempt,
    pub percentage: Option<f64>,
    /// 作答中返回题目（按作答 id 固定的顺序）
    pub questions: Option<Vec<PublicQuestion>>,
    /// 剩余秒数，未限时为空
    pub remaining_seconds: Option<i64>,
    pub server_time: DateTime<Utc>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/quiz.ts")]
pub struct AttemptSummary {
    #[serde(flatten)]
    #[ts(flatten)]
    pub attempt: QuizAttempt,
    pub percentage: Option<f64>,
    pub student: Option<UserSummary>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/quiz.ts")]
pub struct AttemptListResponse {
    pub items: Vec<AttemptSummary>,
    pub pagination: PaginationInfo,
}
