use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::quizzes::entities::{QuestionBody, QuestionKind};

crate::define_string_enum! {
    #[ts(export, export_to = "../frontend/src/types/generated/practice.ts")]
    pub enum Difficulty ("难度") {
        Easy = "easy",
        Medium = "medium",
        Hard = "hard",
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/practice.ts")]
pub struct PracticeQuestion {
    pub id: i64,
    /// 为空表示全局题库
    pub class_id: Option<i64>,
    pub created_by: i64,
    pub topic: String,
    pub difficulty: Difficulty,
    pub prompt: String,
    #[serde(flatten)]
    #[ts(flatten)]
    pub body: QuestionBody,
    pub explanation: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PracticeQuestion {
    pub fn redacted(&self) -> PublicPracticeQuestion {
        PublicPracticeQuestion {
            id: self.id,
            class_id: self.class_id,
            topic: self.topic.clone(),
            difficulty: self.difficulty,
            prompt: self.prompt.clone(),
            kind: self.body.kind(),
            options: self.body.options().map(|o| o.to_vec()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/practice.ts")]
pub struct PublicPracticeQuestion {
    pub id: i64,
    pub class_id: Option<i64>,
    pub topic: String,
    pub difficulty: Difficulty,
    pub prompt: String,
    pub kind: QuestionKind,
    pub options: Option<Vec<String>>,
}
