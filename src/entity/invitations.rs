//! 邀请实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "invitations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub email: String,
    pub role: String,
    pub class_id: Option<i64>,
    #[sea_orm(unique)]
    pub token: String,
    pub invited_by: i64,
    pub expires_at: i64,
    pub accepted_at: Option<i64>,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_invitation(self) -> crate::models::invitations::entities::Invitation {
        use crate::models::common::from_timestamp;
        use crate::models::invitations::entities::Invitation;
        use crate::models::users::entities::UserRole;

        Invitation {
            id: self.id,
            email: self.email,
            role: self.role.parse::<UserRole>().unwrap_or(UserRole::Student),
            class_id: self.class_id,
            token: self.token,
            invited_by: self.invited_by,
            expires_at: from_timestamp(self.expires_at),
            accepted_at: self.accepted_at.map(from_timestamp),
            created_at: from_timestamp(self.created_at),
        }
    }
}
