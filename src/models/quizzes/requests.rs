use chrono::{DateTime, Utc};
use serde::Deserialize;
use ts_rs::TS;

use super::entities::{AnswerSheet, QuizQuestion};
use crate::models::common::PaginationQuery;

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/quiz.ts")]
pub struct CreateQuizRequest {
    pub title: String,
    pub description: Option<String>,
    pub time_limit_minutes: Option<i32>,
    #[serde(default = "default_max_attempts")]
    pub max_attempts: i32,
    pub available_from: Option<DateTime<Utc>>,
    pub available_until: Option<DateTime<Utc>>,
    #[serde(default)]
    pub shuffle_questions: bool,
    #[serde(default)]
    pub published: bool,
    pub questions: Vec<QuizQuestion>,
}

fn default_max_attempts() -> i32 {
    1
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/quiz.ts")]
pub struct UpdateQuizRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "crate::models::common::double_option")]
    #[ts(type = "number | null")]
    pub time_limit_minutes: Option<Option<i32>>,
    pub max_attempts: Option<i32>,
    #[serde(default, deserialize_with = "crate::models::common::double_option")]
    #[ts(type = "string | null")]
    pub available_from: Option<Option<DateTime<Utc>>>,
    #[serde(default, deserialize_with = "crate::models::common::double_option")]
    #[ts(type = "string | null")]
    pub available_until: Option<Option<DateTime<Utc>>>,
    pub shuffle_questions: Option<bool>,
    pub published: Option<bool>,
    pub questions: Option<Vec<QuizQuestion>>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/quiz.ts")]
pub struct QuizListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub search: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct QuizListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub class_id: i64,
    pub search: Option<String>,
    pub published_only: bool,
}

/// 自动保存与交卷共用
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/quiz.ts")]
pub struct SaveAnswersRequest {
    #[serde(default)]
    #[ts(type = "Record<string, number | number[] | boolean | string>")]
    pub answers: AnswerSheet,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/quiz.ts")]
pub struct AttemptListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub student_id: Option<i64>,
}

#[derive(Debug, Clone, Default)]
pub struct AttemptListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub quiz_id: i64,
    pub student_id: Option<i64>,
}

/// 存储层新建作答
#[derive(Debug, Clone)]
pub struct NewAttempt {
    pub quiz_id: i64,
    pub student_id: i64,
    pub attempt_number: i32,
    pub max_score: f64,
    pub started_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
}

/// 存储层结束作答
#[derive(Debug, Clone)]
pub struct FinalizeAttempt {
    pub status: super::entities::AttemptStatus,
    pub answers: AnswerSheet,
    pub score: f64,
    pub results: Vec<super::entities::QuestionResult>,
    pub submitted_at: DateTime<Utc>,
}
