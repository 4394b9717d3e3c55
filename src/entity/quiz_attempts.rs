//! 测验作答实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "quiz_attempts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub quiz_id: i64,
    pub student_id: i64,
    pub attempt_number: i32,
    pub status: String,
    #[sea_orm(column_type = "Text")]
    pub answers: String,
    #[sea_orm(column_type = "Double", nullable)]
    pub score: Option<f64>,
    #[sea_orm(column_type = "Double")]
    pub max_score: f64,
    #[sea_orm(column_type = "Text", nullable)]
    pub results: Option<String>,
    pub started_at: i64,
    pub expires_at: Option<i64>,
    pub submitted_at: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::quizzes::Entity",
        from = "Column::QuizId",
        to = "super::quizzes::Column::Id"
    )]
    Quiz,
}

impl Related<super::quizzes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Quiz.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_attempt(self) -> crate::models::quizzes::entities::QuizAttempt {
        use crate::models::common::from_timestamp;
        use crate::models::quizzes::entities::{AttemptStatus, QuizAttempt};

        QuizAttempt {
            id: self.id,
            quiz_id: self.quiz_id,
            student_id: self.student_id,
            attempt_number: self.attempt_number,
            status: self
                .status
                .parse::<AttemptStatus>()
                .unwrap_or(AttemptStatus::InProgress),
            answers: serde_json::from_str(&self.answers).unwrap_or_default(),
            score: self.score,
            max_score: self.max_score,
            results: self
                .results
                .and_then(|raw| serde_json::from_str(&raw).ok()),
            started_at: from_timestamp(self.started_at),
            expires_at: self.expires_at.map(from_timestamp),
            submitted_at: self.submitted_at.map(from_timestamp),
        }
    }
}
