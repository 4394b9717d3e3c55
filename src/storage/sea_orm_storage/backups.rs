//! 备份存储操作

use super::SeaOrmStorage;
use crate::entity::backups::{ActiveModel, Column, Entity as Backups};
use crate::entity::prelude::*;
use crate::errors::{ClassHubError, Result};
use crate::models::{
    PaginationInfo, PaginationQuery,
    backups::{entities::Backup, requests::NewBackup, responses::BackupListResponse},
};
use crate::storage::TableSnapshot;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder, Set,
};

/// 导出单张表，并移除敏感字段
async fn dump_table<E>(
    db: &DatabaseConnection,
    snapshot: &mut TableSnapshot,
    table: &str,
    redacted: &[&str],
) -> Result<()>
where
    E: EntityTrait,
{
    let mut rows = E::find()
        .into_json()
        .all(db)
        .await
        .map_err(|e| ClassHubError::database_operation(format!("导出表 {table} 失败: {e}")))?;

    if !redacted.is_empty() {
        for row in rows.iter_mut() {
            if let Some(obj) = row.as_object_mut() {
                for field in redacted {
                    obj.remove(*field);
                }
            }
        }
    }

    snapshot.insert(table.to_string(), rows);
    Ok(())
}

impl SeaOrmStorage {
    /// 导出业务数据快照，不含密码哈希、重置令牌与邀请令牌
    pub async fn export_snapshot_impl(&self) -> Result<TableSnapshot> {
        let db = &self.db;
        let mut snapshot = TableSnapshot::new();

        dump_table::<Users>(db, &mut snapshot, "users", &["password_hash"]).await?;
        dump_table::<Invitations>(db, &mut snapshot, "invitations", &["token"]).await?;
        dump_table::<Classes>(db, &mut snapshot, "classes", &[]).await?;
        dump_table::<ClassMembers>(db, &mut snapshot, "class_members", &[]).await?;
        dump_table::<Notes>(db, &mut snapshot, "notes", &[]).await?;
        dump_table::<Assignments>(db, &mut snapshot, "assignments", &[]).await?;
        dump_table::<Submissions>(db, &mut snapshot, "submissions", &[]).await?;
        dump_table::<Quizzes>(db, &mut snapshot, "quizzes", &[]).await?;
        dump_table::<QuizAttempts>(db, &mut snapshot, "quiz_attempts", &[]).await?;
        dump_table::<PracticeQuestions>(db, &mut snapshot, "practice_questions", &[]).await?;
        dump_table::<AttendanceSessions>(db, &mut snapshot, "attendance_sessions", &[]).await?;
        dump_table::<AttendanceRecords>(db, &mut snapshot, "attendance_records", &[]).await?;
        dump_table::<Messages>(db, &mut snapshot, "messages", &[]).await?;
        dump_table::<ContactMessages>(db, &mut snapshot, "contact_messages", &[]).await?;
        dump_table::<Notifications>(db, &mut snapshot, "notifications", &[]).await?;
        dump_table::<Files>(db, &mut snapshot, "files", &[]).await?;
        dump_table::<SystemSettings>(db, &mut snapshot, "system_settings", &[]).await?;
        dump_table::<SystemSettingsAudit>(db, &mut snapshot, "system_settings_audit", &[]).await?;
        dump_table::<CrashLogs>(db, &mut snapshot, "crash_logs", &[]).await?;

        Ok(snapshot)
    }

    /// 登记备份文件
    pub async fn create_backup_record_impl(&self, backup: NewBackup) -> Result<Backup> {
        let model = ActiveModel {
            file_name: Set(backup.file_name),
            file_size: Set(backup.file_size),
            note: Set(backup.note),
            created_by: Set(backup.created_by),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("创建备份记录失败: {e}")))?;

        Ok(result.into_backup())
    }

    pub async fn get_backup_by_id_impl(&self, id: i64) -> Result<Option<Backup>> {
        let result = Backups::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("查询备份失败: {e}")))?;

        Ok(result.map(|m| m.into_backup()))
    }

    pub async fn list_backups_with_pagination_impl(
        &self,
        page: Option<i64>,
        size: Option<i64>,
    ) -> Result<BackupListResponse> {
        let (page, size) = PaginationQuery::normalized(page, size);

        let paginator = Backups::find()
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .paginate(&self.db, size);

        let total = paginator
            .num_items()
            .await
            .map_err(|e| ClassHubError::database_operation(format!("查询备份总数失败: {e}")))?;

        let backups = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("查询备份列表失败: {e}")))?;

        Ok(BackupListResponse {
            items: backups.into_iter().map(|m| m.into_backup()).collect(),
            pagination: PaginationInfo::new(page, size, total),
        })
    }

    /// 超出保留数量的旧备份
    pub async fn list_backups_beyond_impl(&self, keep: usize) -> Result<Vec<Backup>> {
        let backups = Backups::find()
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("查询过期备份失败: {e}")))?;

        // SQLite 不接受没有 LIMIT 的 OFFSET，在内存里跳过
        Ok(backups
            .into_iter()
            .skip(keep)
            .map(|m| m.into_backup())
            .collect())
    }

    pub async fn delete_backup_record_impl(&self, id: i64) -> Result<bool> {
        let result = Backups::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("删除备份记录失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
