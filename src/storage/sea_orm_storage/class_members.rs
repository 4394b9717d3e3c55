//! 班级成员存储操作

use super::SeaOrmStorage;
use crate::entity::class_members::{ActiveModel, Column, Entity as ClassMembers};
use crate::entity::users::{Column as UserColumn, Entity as Users};
use crate::errors::{ClassHubError, Result};
use crate::models::{
    PaginationInfo, PaginationQuery,
    class_members::{
        entities::{ClassMember, ClassMemberDetail, ClassMemberRole},
        requests::ClassMemberQuery,
        responses::ClassMemberListResponse,
    },
    users::entities::User,
};
use crate::utils::contains_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use std::collections::HashMap;

impl SeaOrmStorage {
    /// 加入班级
    pub async fn add_class_member_impl(
        &self,
        class_id: i64,
        user_id: i64,
        role: ClassMemberRole,
    ) -> Result<ClassMember> {
        let model = ActiveModel {
            class_id: Set(class_id),
            user_id: Set(user_id),
            role: Set(role.to_string()),
            joined_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("加入班级失败: {e}")))?;

        Ok(result.into_class_member())
    }

    /// 获取用户在班级中的成员记录
    pub async fn get_class_member_impl(
        &self,
        class_id: i64,
        user_id: i64,
    ) -> Result<Option<ClassMember>> {
        let result = ClassMembers::find()
            .filter(
                Condition::all()
                    .add(Column::ClassId.eq(class_id))
                    .add(Column::UserId.eq(user_id)),
            )
            .one(&self.db)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("查询班级成员失败: {e}")))?;

        Ok(result.map(|m| m.into_class_member()))
    }

    /// 修改成员角色
    pub async fn update_class_member_role_impl(
        &self,
        class_id: i64,
        user_id: i64,
        role: ClassMemberRole,
    ) -> Result<Option<ClassMember>> {
        let Some(existing) = self.get_class_member_impl(class_id, user_id).await? else {
            return Ok(None);
        };

        let updated = ActiveModel {
            id: Set(existing.id),
            role: Set(role.to_string()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .map_err(|e| ClassHubError::database_operation(format!("更新班级成员失败: {e}")))?;

        Ok(Some(updated.into_class_member()))
    }

    /// 移出班级
    pub async fn remove_class_member_impl(&self, class_id: i64, user_id: i64) -> Result<bool> {
        let result = ClassMembers::delete_many()
            .filter(
                Condition::all()
                    .add(Column::ClassId.eq(class_id))
                    .add(Column::UserId.eq(user_id)),
            )
            .exec(&self.db)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("移出班级失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 分页列出班级成员（附带用户摘要）
    pub async fn list_class_members_with_pagination_impl(
        &self,
        class_id: i64,
        query: ClassMemberQuery,
    ) -> Result<ClassMemberListResponse> {
        let (page, size) = PaginationQuery::normalized(query.page, query.size);

        let mut select = ClassMembers::find().filter(Column::ClassId.eq(class_id));

        if let Some(role) = query.role {
            select = select.filter(Column::Role.eq(role.to_string()));
        }

        // 按用户名、显示名或邮箱搜索
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let pattern = contains_pattern(search.trim());
            let user_ids: Vec<i64> = Users::find()
                .select_only()
                .column(UserColumn::Id)
                .filter(
                    Condition::any()
                        .add(UserColumn::Username.like(pattern.clone()))
                        .add(UserColumn::DisplayName.like(pattern.clone()))
                        .add(UserColumn::Email.like(pattern.clone())),
                )
                .into_tuple()
                .all(&self.db)
                .await
                .map_err(|e| ClassHubError::database_operation(format!("搜索用户失败: {e}")))?;
            select = select.filter(Column::UserId.is_in(user_ids));
        }

        let paginator = select
            .order_by_asc(Column::JoinedAt)
            .paginate(&self.db, size);

        let total = paginator
            .num_items()
            .await
            .map_err(|e| ClassHubError::database_operation(format!("查询班级成员总数失败: {e}")))?;

        let members: Vec<ClassMember> = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("查询班级成员列表失败: {e}")))?
            .into_iter()
            .map(|m| m.into_class_member())
            .collect();

        let user_ids: Vec<i64> = members.iter().map(|m| m.user_id).collect();
        let users: HashMap<i64, User> = self
            .get_users_by_ids_impl(&user_ids)
            .await?
            .into_iter()
            .map(|u| (u.id, u))
            .collect();

        let items = members
            .into_iter()
            .filter_map(|member| {
                let user = users.get(&member.user_id)?.summary();
                Some(ClassMemberDetail { member, user })
            })
            .collect();

        Ok(ClassMemberListResponse {
            items,
            pagination: PaginationInfo::new(page, size, total),
        })
    }

    /// 获取班级成员数量
    pub async fn count_class_members_impl(&self, class_id: i64) -> Result<i64> {
        let count = ClassMembers::find()
            .filter(Column::ClassId.eq(class_id))
            .count(&self.db)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("查询班级成员数量失败: {e}")))?;

        Ok(count as i64)
    }

    /// 列出班级中的用户，可按角色过滤
    pub async fn list_class_users_impl(
        &self,
        class_id: i64,
        role: Option<ClassMemberRole>,
    ) -> Result<Vec<User>> {
        let mut select = ClassMembers::find()
            .select_only()
            .column(Column::UserId)
            .filter(Column::ClassId.eq(class_id));

        if let Some(role) = role {
            select = select.filter(Column::Role.eq(role.to_string()));
        }

        let user_ids: Vec<i64> = select
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("查询班级成员失败: {e}")))?;

        let mut users = self.get_users_by_ids_impl(&user_ids).await?;
        users.sort_by(|a, b| a.display_name().cmp(b.display_name()));
        Ok(users)
    }
}
