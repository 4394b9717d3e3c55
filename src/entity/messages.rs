//! 私信实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "messages")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub sender_id: i64,
    pub recipient_id: i64,
    pub subject: String,
    #[sea_orm(column_type = "Text")]
    pub body: String,
    pub read_at: Option<i64>,
    pub sender_deleted: bool,
    pub recipient_deleted: bool,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_message(self) -> crate::models::messages::entities::Message {
        use crate::models::common::from_timestamp;
        use crate::models::messages::entities::Message;

        Message {
            id: self.id,
            sender_id: self.sender_id,
            recipient_id: self.recipient_id,
            subject: self.subject,
            body: self.body,
            read_at: self.read_at.map(from_timestamp),
            sender_deleted: self.sender_deleted,
            recipient_deleted: self.recipient_deleted,
            created_at: from_timestamp(self.created_at),
        }
    }
}
