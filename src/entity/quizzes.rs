//! 测验实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "quizzes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub class_id: i64,
    pub created_by: i64,
    pub title: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub time_limit_minutes: Option<i32>,
    pub max_attempts: i32,
    pub available_from: Option<i64>,
    pub available_until: Option<i64>,
    pub shuffle_questions: bool,
    pub published: bool,
    /// 题目列表（JSON）
    #[sea_orm(column_type = "Text")]
    pub questions: String,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::classes::Entity",
        from = "Column::ClassId",
        to = "super::classes::Column::Id"
    )]
    Class,
    #[sea_orm(has_many = "super::quiz_attempts::Entity")]
    Attempts,
}

impl Related<super::classes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Class.def()
    }
}

impl Related<super::quiz_attempts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Attempts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_quiz(self) -> crate::models::quizzes::entities::Quiz {
        use crate::models::common::from_timestamp;
        use crate::models::quizzes::entities::Quiz;

        Quiz {
            id: self.id,
            class_id: self.class_id,
            created_by: self.created_by,
            title: self.title,
            description: self.description,
            time_limit_minutes: self.time_limit_minutes,
            max_attempts: self.max_attempts,
            available_from: self.available_from.map(from_timestamp),
            available_until: self.available_until.map(from_timestamp),
            shuffle_questions: self.shuffle_questions,
            published: self.published,
            questions: serde_json::from_str(&self.questions).unwrap_or_default(),
            created_at: from_timestamp(self.created_at),
            updated_at: from_timestamp(self.updated_at),
        }
    }
}
