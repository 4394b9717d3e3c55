//! 前端崩溃日志实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "crash_logs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub user_id: Option<i64>,
    #[sea_orm(column_type = "Text")]
    pub message: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub stack: Option<String>,
    pub url: Option<String>,
    pub user_agent: Option<String>,
    pub app_version: Option<String>,
    pub resolved: bool,
    pub resolved_by: Option<i64>,
    pub resolved_at: Option<i64>,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_crash_log(self) -> crate::models::crash_logs::entities::CrashLog {
        use crate::models::common::from_timestamp;
        use crate::models::crash_logs::entities::CrashLog;

        CrashLog {
            id: self.id,
            user_id: self.user_id,
            message: self.message,
            stack: self.stack,
            url: self.url,
            user_agent: self.user_agent,
            app_version: self.app_version,
            resolved: self.resolved,
            resolved_by: self.resolved_by,
            resolved_at: self.resolved_at.map(from_timestamp),
            created_at: from_timestamp(self.created_at),
        }
    }
}
