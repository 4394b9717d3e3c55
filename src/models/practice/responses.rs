use serde::Serialize;
use ts_rs::TS;

use super::entities::{PracticeQuestion, PublicPracticeQuestion};
use crate::models::common::PaginationInfo;
use crate::models::quizzes::entities::AnswerValue;

#[derive(Debug, Serialize, TS)]
#[serde(untagged)]
#[ts(export, export_to = "../frontend/src/types/generated/practice.ts")]
pub enum PracticeItem {
    Full(PracticeQuestion),
    Redacted(PublicPracticeQuestion),
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/practice.ts")]
pub struct PracticeListResponse {
    pub items: Vec<PracticeItem>,
    pub pagination: PaginationInfo,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/practice.ts")]
pub struct RandomPracticeResponse {
    pub items: Vec<PublicPracticeQuestion>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/practice.ts")]
pub struct CheckAnswerResponse {
    pub correct: bool,
    pub expected: AnswerValue,
    pub explanation: Option<String>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/practice.ts")]
pub struct TopicListResponse {
    pub topics: Vec<String>,
}
