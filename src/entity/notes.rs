//! 课堂笔记实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "notes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub class_id: i64,
    pub author_id: i64,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    /// JSON 数组，元素为文件 token
    #[sea_orm(column_type = "Text")]
    pub attachments: String,
    pub pinned: bool,
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
}

impl Related<super::classes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Class.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_note(self) -> crate::models::notes::entities::Note {
        use crate::models::common::{from_timestamp, parse_string_list};
        use crate::models::notes::entities::Note;

        Note {
            id: self.id,
            class_id: self.class_id,
            author_id: self.author_id,
            title: self.title,
            content: self.content,
            attachments: parse_string_list(&self.attachments),
            pinned: self.pinned,
            created_at: from_timestamp(self.created_at),
            updated_at: from_timestamp(self.updated_at),
        }
    }
}
