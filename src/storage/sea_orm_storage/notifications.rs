//! 通知存储操作

use super::SeaOrmStorage;
use crate::entity::notifications::{ActiveModel, Column, Entity as Notifications};
use crate::errors::{ClassHubError, Result};
use crate::models::{
    PaginationInfo, PaginationQuery,
    notifications::{
        entities::Notification,
        requests::{NewNotification, NotificationListQuery},
        responses::NotificationListResponse,
    },
};
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 同一条通知批量发给多名用户
    pub async fn create_notifications_impl(
        &self,
        user_ids: &[i64],
        req: NewNotification,
    ) -> Result<u64> {
        if user_ids.is_empty() {
            return Ok(0);
        }

        let now = chrono::Utc::now().timestamp();
        let reference_type = req.reference_type.map(|t| t.to_string());

        let models = user_ids.iter().map(|user_id| ActiveModel {
            user_id: Set(*user_id),
            notification_type: Set(req.notification_type.to_string()),
            title: Set(req.title.clone()),
            content: Set(req.content.clone()),
            reference_type: Set(reference_type.clone()),
            reference_id: Set(req.reference_id),
            is_read: Set(false),
            created_at: Set(now),
            ..Default::default()
        });

        Notifications::insert_many(models)
            .exec(&self.db)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("批量创建通知失败: {e}")))?;

        Ok(user_ids.len() as u64)
    }

    /// 通过 ID 获取通知
    pub async fn get_notification_by_id_impl(&self, id: i64) -> Result<Option<Notification>> {
        let result = Notifications::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("查询通知失败: {e}")))?;

        Ok(result.map(|m| m.into_notification()))
    }

    /// 列出用户通知（分页）
    pub async fn list_notifications_with_pagination_impl(
        &self,
        query: NotificationListQuery,
    ) -> Result<NotificationListResponse> {
        let (page, size) = PaginationQuery::normalized(query.page, query.size);

        let mut select = Notifications::find().filter(Column::UserId.eq(query.user_id));

        // 未读筛选
        if query.unread_only {
            select = select.filter(Column::IsRead.eq(false));
        }

        let paginator = select
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .paginate(&self.db, size);

        let total = paginator
            .num_items()
            .await
            .map_err(|e| ClassHubError::database_operation(format!("查询通知总数失败: {e}")))?;

        let notifications = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("查询通知列表失败: {e}")))?;

        Ok(NotificationListResponse {
            items: notifications
                .into_iter()
                .map(|m| m.into_notification())
                .collect(),
            pagination: PaginationInfo::new(page, size, total),
        })
    }

    /// 获取用户未读通知数量
    pub async fn count_unread_notifications_impl(&self, user_id: i64) -> Result<i64> {
        let count = Notifications::find()
            .filter(Column::UserId.eq(user_id))
            .filter(Column::IsRead.eq(false))
            .count(&self.db)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("查询未读通知数量失败: {e}")))?;

        Ok(count as i64)
    }

    /// 标记通知为已读
    pub async fn mark_notification_read_impl(&self, id: i64, user_id: i64) -> Result<bool> {
        let result = Notifications::update_many()
            .col_expr(Column::IsRead, sea_orm::sea_query::Expr::value(true))
            .filter(Column::Id.eq(id))
            .filter(Column::UserId.eq(user_id))
            .exec(&self.db)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("标记通知已读失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 标记用户所有通知为已读
    pub async fn mark_all_notifications_read_impl(&self, user_id: i64) -> Result<i64> {
        let result = Notifications::update_many()
            .col_expr(Column::IsRead, sea_orm::sea_query::Expr::value(true))
            .filter(Column::UserId.eq(user_id))
            .filter(Column::IsRead.eq(false))
            .exec(&self.db)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("标记全部通知已读失败: {e}")))?;

        Ok(result.rows_affected as i64)
    }

    /// 删除通知
    pub async fn delete_notification_impl(&self, id: i64, user_id: i64) -> Result<bool> {
        let result = Notifications::delete_many()
            .filter(Column::Id.eq(id))
            .filter(Column::UserId.eq(user_id))
            .exec(&self.db)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("删除通知失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
