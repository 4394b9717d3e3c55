//! 练习题实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "practice_questions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    /// 为空表示全站公共题库
    pub class_id: Option<i64>,
    pub created_by: i64,
    pub topic: String,
    pub difficulty: String,
    #[sea_orm(column_type = "Text")]
    pub prompt: String,
    /// 题型与答案（JSON）
    #[sea_orm(column_type = "Text")]
    pub body: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub explanation: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_practice_question(self) -> crate::models::practice::entities::PracticeQuestion {
        use crate::models::common::from_timestamp;
        use crate::models::practice::entities::{Difficulty, PracticeQuestion};
        use crate::models::quizzes::entities::QuestionBody;

        PracticeQuestion {
            id: self.id,
            class_id: self.class_id,
            created_by: self.created_by,
            topic: self.topic,
            difficulty: self
                .difficulty
                .parse::<Difficulty>()
                .unwrap_or(Difficulty::Medium),
            prompt: self.prompt,
            body: serde_json::from_str(&self.body).unwrap_or(QuestionBody::ShortAnswer {
                accepted: Vec::new(),
                case_sensitive: false,
            }),
            explanation: self.explanation,
            created_at: from_timestamp(self.created_at),
            updated_at: from_timestamp(self.updated_at),
        }
    }
}
