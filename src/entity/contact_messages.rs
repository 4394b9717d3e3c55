//! 联系表单实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "contact_messages")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub email: String,
    pub subject: String,
    #[sea_orm(column_type = "Text")]
    pub message: String,
    pub status: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub reply: Option<String>,
    pub replied_by: Option<i64>,
    pub replied_at: Option<i64>,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_contact_message(self) -> crate::models::contact::entities::ContactMessage {
        use crate::models::common::from_timestamp;
        use crate::models::contact::entities::{ContactMessage, ContactStatus};

        ContactMessage {
            id: self.id,
            name: self.name,
            email: self.email,
            subject: self.subject,
            message: self.message,
            status: self
                .status
                .parse::<ContactStatus>()
                .unwrap_or(ContactStatus::New),
            reply: self.reply,
            replied_by: self.replied_by,
            replied_at: self.replied_at.map(from_timestamp),
            created_at: from_timestamp(self.created_at),
        }
    }
}
