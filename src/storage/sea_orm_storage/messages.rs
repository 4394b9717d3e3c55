//! 私信与联系表单存储操作

use super::SeaOrmStorage;
use crate::entity::contact_messages::{
    ActiveModel as ContactActiveModel, Column as ContactColumn, Entity as ContactMessages,
};
use crate::entity::messages::{ActiveModel, Column, Entity as Messages};
use crate::errors::{ClassHubError, Result};
use crate::models::{
    PaginatedResponse, PaginationInfo, PaginationQuery,
    contact::{
        entities::{ContactMessage, ContactStatus},
        requests::{ContactListQuery, CreateContactRequest},
        responses::ContactListResponse,
    },
    messages::{
        entities::Message,
        requests::{Mailbox, MessageListQuery, SendMessageRequest},
    },
};
use crate::utils::contains_pattern;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set, sea_query::Expr,
};

impl SeaOrmStorage {
    pub async fn create_message_impl(
        &self,
        sender_id: i64,
        req: SendMessageRequest,
    ) -> Result<Message> {
        let model = ActiveModel {
            sender_id: Set(sender_id),
            recipient_id: Set(req.recipient_id),
            subject: Set(req.subject),
            body: Set(req.body),
            read_at: Set(None),
            sender_deleted: Set(false),
            recipient_deleted: Set(false),
            created_at: Set(Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("发送私信失败: {e}")))?;

        Ok(result.into_message())
    }

    pub async fn get_message_by_id_impl(&self, id: i64) -> Result<Option<Message>> {
        let result = Messages::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("查询私信失败: {e}")))?;

        Ok(result.map(|m| m.into_message()))
    }

    pub async fn list_messages_with_pagination_impl(
        &self,
        query: MessageListQuery,
    ) -> Result<PaginatedResponse<Message>> {
        let (page, size) = PaginationQuery::normalized(query.page, query.size);

        let mut select = match query.mailbox {
            Mailbox::Inbox => Messages::find()
                .filter(Column::RecipientId.eq(query.user_id))
                .filter(Column::RecipientDeleted.eq(false)),
            Mailbox::Sent => Messages::find()
                .filter(Column::SenderId.eq(query.user_id))
                .filter(Column::SenderDeleted.eq(false)),
        };

        if query.unread_only {
            select = select.filter(Column::ReadAt.is_null());
        }

        let paginator = select
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .paginate(&self.db, size);

        let total = paginator
            .num_items()
            .await
            .map_err(|e| ClassHubError::database_operation(format!("查询私信总数失败: {e}")))?;

        let rows = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("查询私信列表失败: {e}")))?;

        Ok(PaginatedResponse {
            items: rows.into_iter().map(|m| m.into_message()).collect(),
            pagination: PaginationInfo::new(page, size, total),
        })
    }

    pub async fn mark_message_read_impl(&self, id: i64) -> Result<bool> {
        let result = Messages::update_many()
            .col_expr(Column::ReadAt, Expr::value(Utc::now().timestamp()))
            .filter(Column::Id.eq(id))
            .filter(Column::ReadAt.is_null())
            .exec(&self.db)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("标记私信已读失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 单侧软删除，双方均删除后移除记录
    pub async fn delete_message_for_impl(&self, id: i64, user_id: i64) -> Result<bool> {
        let Some(message) = self.get_message_by_id_impl(id).await? else {
            return Ok(false);
        };

        let sender_deleted = message.sender_deleted || message.sender_id == user_id;
        let recipient_deleted = message.recipient_deleted || message.recipient_id == user_id;

        if sender_deleted && recipient_deleted {
            let result = Messages::delete_by_id(id)
                .exec(&self.db)
                .await
                .map_err(|e| ClassHubError::database_operation(format!("删除私信失败: {e}")))?;
            return Ok(result.rows_affected > 0);
        }

        ActiveModel {
            id: Set(id),
            sender_deleted: Set(sender_deleted),
            recipient_deleted: Set(recipient_deleted),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .map_err(|e| ClassHubError::database_operation(format!("删除私信失败: {e}")))?;

        Ok(true)
    }

    pub async fn count_unread_messages_impl(&self, user_id: i64) -> Result<i64> {
        let count = Messages::find()
            .filter(Column::RecipientId.eq(user_id))
            .filter(Column::RecipientDeleted.eq(false))
            .filter(Column::ReadAt.is_null())
            .count(&self.db)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("统计未读私信失败: {e}")))?;

        Ok(count as i64)
    }

    pub async fn create_contact_message_impl(
        &self,
        req: CreateContactRequest,
    ) -> Result<ContactMessage> {
        let model = ContactActiveModel {
            name: Set(req.name),
            email: Set(req.email),
            subject: Set(req.subject),
            message: Set(req.message),
            status: Set(ContactStatus::New.to_string()),
            reply: Set(None),
            replied_by: Set(None),
            replied_at: Set(None),
            created_at: Set(Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("提交联系表单失败: {e}")))?;

        Ok(result.into_contact_message())
    }

    pub async fn get_contact_message_by_id_impl(&self, id: i64) -> Result<Option<ContactMessage>> {
        let result = ContactMessages::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("查询联系表单失败: {e}")))?;

        Ok(result.map(|m| m.into_contact_message()))
    }

    pub async fn list_contact_messages_with_pagination_impl(
        &self,
        query: ContactListQuery,
    ) -> Result<ContactListResponse> {
        let (page, size) = PaginationQuery::normalized(query.page, query.size);

        let mut select = ContactMessages::find();

        if let Some(status) = query.status {
            select = select.filter(ContactColumn::Status.eq(status.to_string()));
        }

        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let pattern = contains_pattern(search.trim());
            select = select.filter(
                Condition::any()
                    .add(ContactColumn::Name.like(pattern.clone()))
                    .add(ContactColumn::Email.like(pattern.clone()))
                    .add(ContactColumn::Subject.like(pattern.clone())),
            );
        }

        let paginator = select
            .order_by_desc(ContactColumn::CreatedAt)
            .paginate(&self.db, size);

        let total = paginator
            .num_items()
            .await
            .map_err(|e| ClassHubError::database_operation(format!("查询联系表单总数失败: {e}")))?;

        let rows = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("查询联系表单列表失败: {e}")))?;

        Ok(ContactListResponse {
            items: rows.into_iter().map(|m| m.into_contact_message()).collect(),
            pagination: PaginationInfo::new(page, size, total),
        })
    }

    pub async fn reply_contact_message_impl(
        &self,
        id: i64,
        reply: &str,
        replied_by: i64,
    ) -> Result<Option<ContactMessage>> {
        if self.get_contact_message_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let updated = ContactActiveModel {
            id: Set(id),
            status: Set(ContactStatus::Replied.to_string()),
            reply: Set(Some(reply.to_string())),
            replied_by: Set(Some(replied_by)),
            replied_at: Set(Some(Utc::now().timestamp())),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .map_err(|e| ClassHubError::database_operation(format!("回复联系表单失败: {e}")))?;

        Ok(Some(updated.into_contact_message()))
    }

    pub async fn update_contact_status_impl(
        &self,
        id: i64,
        status: ContactStatus,
    ) -> Result<Option<ContactMessage>> {
        if self.get_contact_message_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let updated = ContactActiveModel {
            id: Set(id),
            status: Set(status.to_string()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .map_err(|e| ClassHubError::database_operation(format!("更新联系表单状态失败: {e}")))?;

        Ok(Some(updated.into_contact_message()))
    }

    pub async fn delete_contact_message_impl(&self, id: i64) -> Result<bool> {
        let result = ContactMessages::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("删除联系表单失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
