//! 崩溃日志存储操作

use super::SeaOrmStorage;
use crate::entity::crash_logs::{ActiveModel, Column, Entity as CrashLogs};
use crate::errors::{ClassHubError, Result};
use crate::models::{
    PaginationInfo, PaginationQuery,
    crash_logs::{
        entities::CrashLog,
        requests::{CrashLogListQuery, NewCrashLog},
        responses::CrashLogListResponse,
    },
};
use crate::utils::contains_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set,
};

impl SeaOrmStorage {
    pub async fn create_crash_log_impl(&self, log: NewCrashLog) -> Result<CrashLog> {
        let model = ActiveModel {
            user_id: Set(log.user_id),
            message: Set(log.message),
            stack: Set(log.stack),
            url: Set(log.url),
            user_agent: Set(log.user_agent),
            app_version: Set(log.app_version),
            resolved: Set(false),
            resolved_by: Set(None),
            resolved_at: Set(None),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("记录崩溃日志失败: {e}")))?;

        Ok(result.into_crash_log())
    }

    pub async fn get_crash_log_by_id_impl(&self, id: i64) -> Result<Option<CrashLog>> {
        let result = CrashLogs::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("查询崩溃日志失败: {e}")))?;

        Ok(result.map(|m| m.into_crash_log()))
    }

    pub async fn list_crash_logs_with_pagination_impl(
        &self,
        query: CrashLogListQuery,
    ) -> Result<CrashLogListResponse> {
        let (page, size) = PaginationQuery::normalized(query.page, query.size);

        let mut select = CrashLogs::find();

        if let Some(resolved) = query.resolved {
            select = select.filter(Column::Resolved.eq(resolved));
        }

        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let pattern = contains_pattern(search.trim());
            select = select.filter(
                Condition::any()
                    .add(Column::Message.like(pattern.clone()))
                    .add(Column::Url.like(pattern.clone())),
            );
        }

        let paginator = select
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .paginate(&self.db, size);

        let total = paginator
            .num_items()
            .await
            .map_err(|e| ClassHubError::database_operation(format!("查询崩溃日志总数失败: {e}")))?;

        let logs = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("查询崩溃日志列表失败: {e}")))?;

        Ok(CrashLogListResponse {
            items: logs.into_iter().map(|m| m.into_crash_log()).collect(),
            pagination: PaginationInfo::new(page, size, total),
        })
    }

    /// 标记解决状态，取消标记时清空处理人
    pub async fn set_crash_log_resolved_impl(
        &self,
        id: i64,
        resolved: bool,
        resolved_by: i64,
    ) -> Result<Option<CrashLog>> {
        if self.get_crash_log_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let (by, at) = if resolved {
            (Some(resolved_by), Some(chrono::Utc::now().timestamp()))
        } else {
            (None, None)
        };

        let model = ActiveModel {
            id: Set(id),
            resolved: Set(resolved),
            resolved_by: Set(by),
            resolved_at: Set(at),
            ..Default::default()
        };

        let updated = model
            .update(&self.db)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("更新崩溃日志失败: {e}")))?;

        Ok(Some(updated.into_crash_log()))
    }

    pub async fn delete_crash_log_impl(&self, id: i64) -> Result<bool> {
        let result = CrashLogs::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("删除崩溃日志失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 清除所有已解决的日志
    pub async fn purge_resolved_crash_logs_impl(&self) -> Result<u64> {
        let result = CrashLogs::delete_many()
            .filter(Column::Resolved.eq(true))
            .exec(&self.db)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("清理崩溃日志失败: {e}")))?;

        Ok(result.rows_affected)
    }
}
