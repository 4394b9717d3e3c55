//! 班级存储操作

use super::SeaOrmStorage;
use crate::entity::class_members::{
    ActiveModel as MemberActiveModel, Column as MemberColumn, Entity as ClassMembers,
};
use crate::entity::classes::{ActiveModel, Column, Entity as Classes};
use crate::errors::{ClassHubError, Result};
use crate::models::{
    PaginationInfo, PaginationQuery,
    class_members::entities::ClassMemberRole,
    classes::{
        entities::Class,
        requests::{ClassListQuery, UpdateClassRequest},
        responses::ClassListResponse,
    },
};
use crate::utils::contains_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// 创建班级，负责教授以 professor 身份写入成员表
    pub async fn create_class_impl(
        &self,
        professor_id: i64,
        name: &str,
        description: Option<String>,
        invite_code: &str,
    ) -> Result<Class> {
        let now = chrono::Utc::now().timestamp();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| ClassHubError::database_operation(format!("开启事务失败: {e}")))?;

        let class = ActiveModel {
            professor_id: Set(professor_id),
            name: Set(name.to_string()),
            description: Set(description),
            invite_code: Set(invite_code.to_string()),
            archived: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| ClassHubError::database_operation(format!("创建班级失败: {e}")))?;

        MemberActiveModel {
            class_id: Set(class.id),
            user_id: Set(professor_id),
            role: Set(ClassMemberRole::Professor.to_string()),
            joined_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| ClassHubError::database_operation(format!("写入班级教授失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| ClassHubError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(class.into_class())
    }

    /// 通过 ID 获取班级
    pub async fn get_class_by_id_impl(&self, class_id: i64) -> Result<Option<Class>> {
        let result = Classes::find_by_id(class_id)
            .one(&self.db)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("查询班级失败: {e}")))?;

        Ok(result.map(|m| m.into_class()))
    }

    /// 通过邀请码获取班级
    pub async fn get_class_by_invite_code_impl(&self, invite_code: &str) -> Result<Option<Class>> {
        let result = Classes::find()
            .filter(Column::InviteCode.eq(invite_code))
            .one(&self.db)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("查询班级失败: {e}")))?;

        Ok(result.map(|m| m.into_class()))
    }

    /// 分页列出班级
    pub async fn list_classes_with_pagination_impl(
        &self,
        query: ClassListQuery,
    ) -> Result<ClassListResponse> {
        let (page, size) = PaginationQuery::normalized(query.page, query.size);

        let mut select = Classes::find();

        // 成员筛选
        if let Some(member_id) = query.member_id {
            let class_ids = self.list_user_class_ids_impl(member_id).await?;
            if class_ids.is_empty() {
                return Ok(ClassListResponse {
                    items: vec![],
                    pagination: PaginationInfo::new(page, size, 0),
                });
            }
            select = select.filter(Column::Id.is_in(class_ids));
        }

        if !query.include_archived {
            select = select.filter(Column::Archived.eq(false));
        }

        // 搜索条件
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let pattern = contains_pattern(search.trim());
            select = select.filter(Column::Name.like(pattern));
        }

        let paginator = select
            .order_by_desc(Column::CreatedAt)
            .paginate(&self.db, size);

        let total = paginator
            .num_items()
            .await
            .map_err(|e| ClassHubError::database_operation(format!("查询班级总数失败: {e}")))?;

        let classes = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("查询班级列表失败: {e}")))?;

        Ok(ClassListResponse {
            items: classes.into_iter().map(|m| m.into_class()).collect(),
            pagination: PaginationInfo::new(page, size, total),
        })
    }

    /// 更新班级信息
    pub async fn update_class_impl(
        &self,
        class_id: i64,
        update: UpdateClassRequest,
    ) -> Result<Option<Class>> {
        if self.get_class_by_id_impl(class_id).await?.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(class_id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(name) = update.name {
            model.name = Set(name);
        }

        if let Some(description) = update.description {
            model.description = Set(Some(description));
        }

        if let Some(archived) = update.archived {
            model.archived = Set(archived);
        }

        let updated = model
            .update(&self.db)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("更新班级失败: {e}")))?;

        Ok(Some(updated.into_class()))
    }

    /// 重新生成邀请码
    pub async fn update_class_invite_code_impl(
        &self,
        class_id: i64,
        invite_code: &str,
    ) -> Result<Option<Class>> {
        if self.get_class_by_id_impl(class_id).await?.is_none() {
            return Ok(None);
        }

        let updated = ActiveModel {
            id: Set(class_id),
            invite_code: Set(invite_code.to_string()),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .map_err(|e| ClassHubError::database_operation(format!("更新邀请码失败: {e}")))?;

        Ok(Some(updated.into_class()))
    }

    /// 删除班级
    pub async fn delete_class_impl(&self, class_id: i64) -> Result<bool> {
        let result = Classes::delete_by_id(class_id)
            .exec(&self.db)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("删除班级失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 用户所在班级 ID 列表
    pub async fn list_user_class_ids_impl(&self, user_id: i64) -> Result<Vec<i64>> {
        let ids: Vec<i64> = ClassMembers::find()
            .select_only()
            .column(MemberColumn::ClassId)
            .filter(MemberColumn::UserId.eq(user_id))
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("查询用户班级失败: {e}")))?;

        Ok(ids)
    }
}
