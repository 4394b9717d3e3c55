use serde::Deserialize;
use ts_rs::TS;

use super::entities::Difficulty;
use crate::models::common::PaginationQuery;
use crate::models::quizzes::entities::{AnswerValue, QuestionBody};

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/practice.ts")]
pub struct CreatePracticeQuestionRequest {
    pub class_id: Option<i64>,
    pub topic: String,
    #[serde(default = "default_difficulty")]
    pub difficulty: Difficulty,
    pub prompt: String,
    #[serde(flatten)]
    #[ts(flatten)]
    pub body: QuestionBody,
    pub explanation: Option<String>,
}

fn default_difficulty() -> Difficulty {
    Difficulty::Medium
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/practice.ts")]
pub struct UpdatePracticeQuestionRequest {
    pub topic: Option<String>,
    pub difficulty: Option<Difficulty>,
    pub prompt: Option<String>,
    pub body: Option<QuestionBody>,
    pub explanation: Option<String>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/practice.ts")]
pub struct PracticeListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub class_id: Option<i64>,
    pub topic: Option<String>,
    pub difficulty: Option<Difficulty>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/practice.ts")]
pub struct RandomPracticeParams {
    pub class_id: Option<i64>,
    pub topic: Option<String>,
    pub difficulty: Option<Difficulty>,
    pub count: Option<i64>,
}

/// 存储层查询
#[derive(Debug, Clone, Default)]
pub struct PracticeListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub class_id: Option<i64>,
    /// 可见范围：全局题库 + 这些班级
    pub visible_class_ids: Option<Vec<i64>>,
    pub topic: Option<String>,
    pub difficulty: Option<Difficulty>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/practice.ts")]
pub struct CheckAnswerRequest {
    pub answer: AnswerValue,
}
