//! 考勤场次实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "attendance_sessions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub class_id: i64,
    pub created_by: i64,
    pub title: String,
    pub code: String,
    pub opens_at: i64,
    pub closes_at: i64,
    pub late_after_minutes: i32,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::attendance_records::Entity")]
    Records,
}

impl Related<super::attendance_records::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Records.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_session(self) -> crate::models::attendance::entities::AttendanceSession {
        use crate::models::attendance::entities::AttendanceSession;
        use crate::models::common::from_timestamp;

        AttendanceSession {
            id: self.id,
            class_id: self.class_id,
            created_by: self.created_by,
            title: self.title,
            code: self.code,
            opens_at: from_timestamp(self.opens_at),
            closes_at: from_timestamp(self.closes_at),
            late_after_minutes: self.late_after_minutes,
            created_at: from_timestamp(self.created_at),
        }
    }
}
