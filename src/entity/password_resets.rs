//! 密码重置令牌实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "password_resets")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub user_id: i64,
    #[sea_orm(unique)]
    pub token: String,
    pub expires_at: i64,
    pub used_at: Option<i64>,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_password_reset(self) -> crate::models::auth::entities::PasswordReset {
        use crate::models::auth::entities::PasswordReset;
        use crate::models::common::from_timestamp;

        PasswordReset {
            id: self.id,
            user_id: self.user_id,
            token: self.token,
            expires_at: from_timestamp(self.expires_at),
            used_at: self.used_at.map(from_timestamp),
            created_at: from_timestamp(self.created_at),
        }
    }
}
