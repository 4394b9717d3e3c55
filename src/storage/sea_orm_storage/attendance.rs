//! 考勤存储操作

use super::SeaOrmStorage;
use crate::entity::attendance_records::{
    ActiveModel as RecordActiveModel, Column as RecordColumn, Entity as AttendanceRecords,
};
use crate::entity::attendance_sessions::{ActiveModel, Column, Entity as AttendanceSessions};
use crate::errors::{ClassHubError, Result};
use crate::models::{
    PaginatedResponse, PaginationInfo, PaginationQuery,
    attendance::{
        entities::{AttendanceRecord, AttendanceSession},
        requests::{NewSession, UpsertRecord},
    },
};
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set,
};

impl SeaOrmStorage {
    pub async fn create_attendance_session_impl(
        &self,
        req: NewSession,
    ) -> Result<AttendanceSession> {
        let model = ActiveModel {
            class_id: Set(req.class_id),
            created_by: Set(req.created_by),
            title: Set(req.title),
            code: Set(req.code),
            opens_at: Set(req.opens_at.timestamp()),
            closes_at: Set(req.closes_at.timestamp()),
            late_after_minutes: Set(req.late_after_minutes),
            created_at: Set(Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("创建考勤失败: {e}")))?;

        Ok(result.into_session())
    }

    pub async fn get_attendance_session_by_id_impl(
        &self,
        id: i64,
    ) -> Result<Option<AttendanceSession>> {
        let result = AttendanceSessions::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("查询考勤失败: {e}")))?;

        Ok(result.map(|m| m.into_session()))
    }

    pub async fn list_attendance_sessions_with_pagination_impl(
        &self,
        class_id: i64,
        page: Option<i64>,
        size: Option<i64>,
    ) -> Result<PaginatedResponse<AttendanceSession>> {
        let (page, size) = PaginationQuery::normalized(page, size);

        let paginator = AttendanceSessions::find()
            .filter(Column::ClassId.eq(class_id))
            .order_by_desc(Column::OpensAt)
            .paginate(&self.db, size);

        let total = paginator
            .num_items()
            .await
            .map_err(|e| ClassHubError::database_operation(format!("查询考勤总数失败: {e}")))?;

        let rows = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("查询考勤列表失败: {e}")))?;

        Ok(PaginatedResponse {
            items: rows.into_iter().map(|m| m.into_session()).collect(),
            pagination: PaginationInfo::new(page, size, total),
        })
    }

    pub async fn list_class_attendance_sessions_impl(
        &self,
        class_id: i64,
    ) -> Result<Vec<AttendanceSession>> {
        let rows = AttendanceSessions::find()
            .filter(Column::ClassId.eq(class_id))
            .order_by_asc(Column::OpensAt)
            .all(&self.db)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("查询考勤列表失败: {e}")))?;

        Ok(rows.into_iter().map(|m| m.into_session()).collect())
    }

    pub async fn close_attendance_session_impl(
        &self,
        id: i64,
        now: DateTime<Utc>,
    ) -> Result<Option<AttendanceSession>> {
        let Some(existing) = self.get_attendance_session_by_id_impl(id).await? else {
            return Ok(None);
        };

        if existing.closes_at <= now {
            return Ok(Some(existing));
        }

        let updated = ActiveModel {
            id: Set(id),
            closes_at: Set(now.timestamp()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .map_err(|e| ClassHubError::database_operation(format!("关闭考勤失败: {e}")))?;

        Ok(Some(updated.into_session()))
    }

    pub async fn delete_attendance_session_impl(&self, id: i64) -> Result<bool> {
        let result = AttendanceSessions::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("删除考勤失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    pub async fn upsert_attendance_record_impl(
        &self,
        req: UpsertRecord,
    ) -> Result<AttendanceRecord> {
        let now = Utc::now().timestamp();
        let existing = self
            .get_attendance_record_impl(req.session_id, req.student_id)
            .await?;

        let model = match existing {
            Some(existing) => {
                let mut model = RecordActiveModel {
                    id: Set(existing.id),
                    status: Set(req.status.to_string()),
                    note: Set(req.note),
                    updated_at: Set(now),
                    ..Default::default()
                };
                if let Some(checked_in_at) = req.checked_in_at {
                    model.checked_in_at = Set(Some(checked_in_at.timestamp()));
                }
                model
                    .update(&self.db)
                    .await
                    .map_err(|e| ClassHubError::database_operation(format!("更新考勤记录失败: {e}")))?
            }
            None => RecordActiveModel {
                session_id: Set(req.session_id),
                student_id: Set(req.student_id),
                status: Set(req.status.to_string()),
                checked_in_at: Set(req.checked_in_at.map(|d| d.timestamp())),
                note: Set(req.note),
                updated_at: Set(now),
                ..Default::default()
            }
            .insert(&self.db)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("写入考勤记录失败: {e}")))?,
        };

        Ok(model.into_record())
    }

    pub async fn get_attendance_record_impl(
        &self,
        session_id: i64,
        student_id: i64,
    ) -> Result<Option<AttendanceRecord>> {
        let result = AttendanceRecords::find()
            .filter(
                Condition::all()
                    .add(RecordColumn::SessionId.eq(session_id))
                    .add(RecordColumn::StudentId.eq(student_id)),
            )
            .one(&self.db)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("查询考勤记录失败: {e}")))?;

        Ok(result.map(|m| m.into_record()))
    }

    pub async fn list_attendance_records_impl(
        &self,
        session_ids: &[i64],
    ) -> Result<Vec<AttendanceRecord>> {
        if session_ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = AttendanceRecords::find()
            .filter(RecordColumn::SessionId.is_in(session_ids.iter().copied()))
            .all(&self.db)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("查询考勤记录失败: {e}")))?;

        Ok(rows.into_iter().map(|m| m.into_record()).collect())
    }
}
