//! 密码重置令牌与邀请存储操作

use super::SeaOrmStorage;
use crate::entity::invitations::{
    ActiveModel as InvitationActiveModel, Column as InvitationColumn, Entity as Invitations,
};
use crate::entity::password_resets::{
    ActiveModel as ResetActiveModel, Column as ResetColumn, Entity as PasswordResets,
};
use crate::errors::{ClassHubError, Result};
use crate::models::{
    PaginationInfo, PaginationQuery,
    auth::entities::PasswordReset,
    invitations::{
        entities::Invitation,
        requests::{InvitationListQuery, NewInvitation},
        responses::{InvitationListResponse, InvitationResponse},
    },
};
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set, sea_query::Expr,
};

impl SeaOrmStorage {
    /// 创建密码重置令牌
    pub async fn create_password_reset_impl(
        &self,
        user_id: i64,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<PasswordReset> {
        let model = ResetActiveModel {
            user_id: Set(user_id),
            token: Set(token.to_string()),
            expires_at: Set(expires_at.timestamp()),
            used_at: Set(None),
            created_at: Set(Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("创建重置令牌失败: {e}")))?;

        Ok(result.into_password_reset())
    }

    pub async fn get_password_reset_by_token_impl(
        &self,
        token: &str,
    ) -> Result<Option<PasswordReset>> {
        let result = PasswordResets::find()
            .filter(ResetColumn::Token.eq(token))
            .one(&self.db)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("查询重置令牌失败: {e}")))?;

        Ok(result.map(|m| m.into_password_reset()))
    }

    /// 使用令牌，并作废同一用户的其它未使用令牌
    pub async fn consume_password_reset_impl(&self, id: i64, user_id: i64) -> Result<bool> {
        let now = Utc::now().timestamp();

        let result = PasswordResets::update_many()
            .col_expr(ResetColumn::UsedAt, Expr::value(now))
            .filter(
                Condition::all()
                    .add(ResetColumn::Id.eq(id))
                    .add(ResetColumn::UsedAt.is_null()),
            )
            .exec(&self.db)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("更新重置令牌失败: {e}")))?;

        if result.rows_affected == 0 {
            return Ok(false);
        }

        PasswordResets::update_many()
            .col_expr(ResetColumn::UsedAt, Expr::value(now))
            .filter(
                Condition::all()
                    .add(ResetColumn::UserId.eq(user_id))
                    .add(ResetColumn::UsedAt.is_null()),
            )
            .exec(&self.db)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("作废重置令牌失败: {e}")))?;

        Ok(true)
    }

    /// 创建邀请
    pub async fn create_invitation_impl(&self, req: NewInvitation) -> Result<Invitation> {
        let model = InvitationActiveModel {
            email: Set(req.email),
            role: Set(req.role.to_string()),
            class_id: Set(req.class_id),
            token: Set(req.token),
            invited_by: Set(req.invited_by),
            expires_at: Set(req.expires_at.timestamp()),
            accepted_at: Set(None),
            created_at: Set(Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("创建邀请失败: {e}")))?;

        Ok(result.into_invitation())
    }

    pub async fn get_invitation_by_id_impl(&self, id: i64) -> Result<Option<Invitation>> {
        let result = Invitations::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("查询邀请失败: {e}")))?;

        Ok(result.map(|m| m.into_invitation()))
    }

    pub async fn get_invitation_by_token_impl(&self, token: &str) -> Result<Option<Invitation>> {
        let result = Invitations::find()
            .filter(InvitationColumn::Token.eq(token))
            .one(&self.db)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("查询邀请失败: {e}")))?;

        Ok(result.map(|m| m.into_invitation()))
    }

    /// 分页列出邀请，状态按当前时间计算
    pub async fn list_invitations_with_pagination_impl(
        &self,
        query: InvitationListQuery,
    ) -> Result<InvitationListResponse> {
        let (page, size) = PaginationQuery::normalized(query.page, query.size);

        let mut select = Invitations::find();

        if let Some(invited_by) = query.invited_by {
            select = select.filter(InvitationColumn::InvitedBy.eq(invited_by));
        }

        if let Some(class_id) = query.class_id {
            select = select.filter(InvitationColumn::ClassId.eq(class_id));
        }

        let paginator = select
            .order_by_desc(InvitationColumn::CreatedAt)
            .paginate(&self.db, size);

        let total = paginator
            .num_items()
            .await
            .map_err(|e| ClassHubError::database_operation(format!("查询邀请总数失败: {e}")))?;

        let rows = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("查询邀请列表失败: {e}")))?;

        let now = Utc::now();
        let items = rows
            .into_iter()
            .map(|m| {
                let invitation = m.into_invitation();
                InvitationResponse {
                    status: invitation.status_at(now),
                    invitation,
                }
            })
            .collect();

        Ok(InvitationListResponse {
            items,
            pagination: PaginationInfo::new(page, size, total),
        })
    }

    /// 标记邀请已接受，已接受过的返回 false
    pub async fn mark_invitation_accepted_impl(&self, id: i64) -> Result<bool> {
        let result = Invitations::update_many()
            .col_expr(
                InvitationColumn::AcceptedAt,
                Expr::value(Utc::now().timestamp()),
            )
            .filter(
                Condition::all()
                    .add(InvitationColumn::Id.eq(id))
                    .add(InvitationColumn::AcceptedAt.is_null()),
            )
            .exec(&self.db)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("更新邀请失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 撤销接受标记，账号创建失败时让邀请重新可用
    pub async fn release_invitation_impl(&self, id: i64) -> Result<bool> {
        let result = Invitations::update_many()
            .col_expr(InvitationColumn::AcceptedAt, Expr::value(Option::<i64>::None))
            .filter(
                Condition::all()
                    .add(InvitationColumn::Id.eq(id))
                    .add(InvitationColumn::AcceptedAt.is_not_null()),
            )
            .exec(&self.db)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("撤销邀请失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    pub async fn delete_invitation_impl(&self, id: i64) -> Result<bool> {
        let result = Invitations::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("删除邀请失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
