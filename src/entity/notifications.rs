//! 站内通知实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "notifications")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub user_id: i64,
    pub notification_type: String,
    pub title: String,
    pub content: Option<String>,
    pub reference_type: Option<String>,
    pub reference_id: Option<i64>,
    pub is_read: bool,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_notification(self) -> crate::models::notifications::entities::Notification {
        use crate::models::common::from_timestamp;
        use crate::models::notifications::entities::{
            Notification, NotificationType, ReferenceType,
        };

        Notification {
            id: self.id,
            user_id: self.user_id,
            notification_type: self
                .notification_type
                .parse::<NotificationType>()
                .unwrap_or(NotificationType::System),
            title: self.title,
            content: self.content,
            reference_type: self
                .reference_type
                .and_then(|t| t.parse::<ReferenceType>().ok()),
            reference_id: self.reference_id,
            is_read: self.is_read,
            created_at: from_timestamp(self.created_at),
        }
    }
}
