//! 考勤记录实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "attendance_records")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub session_id: i64,
    pub student_id: i64,
    pub status: String,
    pub checked_in_at: Option<i64>,
    pub note: Option<String>,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::attendance_sessions::Entity",
        from = "Column::SessionId",
        to = "super::attendance_sessions::Column::Id"
    )]
    Session,
}

impl Related<super::attendance_sessions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Session.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_record(self) -> crate::models::attendance::entities::AttendanceRecord {
        use crate::models::attendance::entities::{AttendanceRecord, AttendanceStatus};
        use crate::models::common::from_timestamp;

        AttendanceRecord {
            id: self.id,
            session_id: self.session_id,
            student_id: self.student_id,
            status: self
                .status
                .parse::<AttendanceStatus>()
                .unwrap_or(AttendanceStatus::Absent),
            checked_in_at: self.checked_in_at.map(from_timestamp),
            note: self.note,
            updated_at: from_timestamp(self.updated_at),
        }
    }
}
