//! 备份记录实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "backups")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub file_name: String,
    pub file_size: i64,
    #[sea_orm(column_type = "Text", nullable)]
    pub note: Option<String>,
    pub created_by: i64,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_backup(self) -> crate::models::backups::entities::Backup {
        use crate::models::backups::entities::Backup;
        use crate::models::common::from_timestamp;

        Backup {
            id: self.id,
            file_name: self.file_name,
            file_size: self.file_size,
            note: self.note,
            created_by: self.created_by,
            created_at: from_timestamp(self.created_at),
        }
    }
}
