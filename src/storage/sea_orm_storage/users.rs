//! 用户存储操作

use super::SeaOrmStorage;
use crate::entity::users::{ActiveModel, Column, Entity as Users};
use crate::errors::{ClassHubError, Result};
use crate::models::{
    PaginationInfo, PaginationQuery,
    users::{
        entities::{User, UserStatus},
        requests::{CreateUserRequest, UpdateUserRequest, UserListQuery},
        responses::UserListResponse,
    },
};
use crate::utils::contains_pattern;
use sea_orm::sea_query::{Expr, IntoCondition};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set,
};

fn db_err(context: &'static str) -> impl Fn(sea_orm::DbErr) -> ClassHubError {
    move |e| ClassHubError::database_operation(format!("{context}: {e}"))
}

/// 空字符串表示清除资料字段
fn optional_text(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

impl SeaOrmStorage {
    async fn find_user_where(&self, condition: impl IntoCondition) -> Result<Option<User>> {
        let model = Users::find()
            .filter(condition)
            .one(&self.db)
            .await
            .map_err(db_err("查询用户失败"))?;
        Ok(model.map(|m| m.into_user()))
    }

    pub async fn create_user_impl(&self, req: CreateUserRequest) -> Result<User> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            username: Set(req.username),
            email: Set(req.email.to_lowercase()),
            password_hash: Set(req.password),
            role: Set(req.role.to_string()),
            status: Set(UserStatus::Active.to_string()),
            display_name: Set(req.display_name.and_then(optional_text)),
            avatar_url: Set(req.avatar_url.and_then(optional_text)),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(db_err("创建用户失败"))?;

        Ok(model.into_user())
    }

    pub async fn get_user_by_id_impl(&self, id: i64) -> Result<Option<User>> {
        self.find_user_where(Column::Id.eq(id)).await
    }

    pub async fn get_users_by_ids_impl(&self, ids: &[i64]) -> Result<Vec<User>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = Users::find()
            .filter(Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await
            .map_err(db_err("批量查询用户失败"))?;

        Ok(models.into_iter().map(|m| m.into_user()).collect())
    }

    pub async fn get_user_by_username_impl(&self, username: &str) -> Result<Option<User>> {
        self.find_user_where(Column::Username.eq(username)).await
    }

    /// 邮箱以小写存储
    pub async fn get_user_by_email_impl(&self, email: &str) -> Result<Option<User>> {
        self.find_user_where(Column::Email.eq(email.to_lowercase()))
            .await
    }

    /// 登录时的标识可以是用户名或邮箱
    pub async fn get_user_by_username_or_email_impl(
        &self,
        identifier: &str,
    ) -> Result<Option<User>> {
        let model = Users::find()
            .filter(
                Condition::any()
                    .add(Column::Username.eq(identifier))
                    .add(Column::Email.eq(identifier.to_lowercase())),
            )
            .one(&self.db)
            .await
            .map_err(db_err("查询用户失败"))?;
        Ok(model.map(|m| m.into_user()))
    }

    pub async fn list_users_with_pagination_impl(
        &self,
        query: UserListQuery,
    ) -> Result<UserListResponse> {
        let (page, size) = PaginationQuery::normalized(query.page, query.size);

        let mut condition = Condition::all();
        if let Some(search) = query.search.as_deref().map(str::trim)
            && !search.is_empty()
        {
            let pattern = contains_pattern(search);
            condition = condition.add(
                Condition::any()
                    .add(Column::Username.like(pattern.clone()))
                    .add(Column::Email.like(pattern.clone()))
                    .add(Column::DisplayName.like(pattern)),
            );
        }
        if let Some(role) = query.role {
            condition = condition.add(Column::Role.eq(role.to_string()));
        }
        if let Some(status) = query.status {
            condition = condition.add(Column::Status.eq(status.to_string()));
        }

        let paginator = Users::find()
            .filter(condition)
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(db_err("统计用户失败"))?;
        let models = paginator
            .fetch_page(page - 1)
            .await
            .map_err(db_err("查询用户列表失败"))?;

        Ok(UserListResponse {
            items: models.into_iter().map(|m| m.into_user()).collect(),
            pagination: PaginationInfo::new(page, size, total),
        })
    }

    pub async fn update_last_login_impl(&self, id: i64) -> Result<bool> {
        let result = Users::update_many()
            .col_expr(Column::LastLogin, Expr::value(chrono::Utc::now().timestamp()))
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(db_err("更新最后登录时间失败"))?;

        Ok(result.rows_affected > 0)
    }

    /// 只写入请求中出现的字段；用户不存在时返回 None
    pub async fn update_user_impl(
        &self,
        id: i64,
        update: UpdateUserRequest,
    ) -> Result<Option<User>> {
        let Some(existing) = Users::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err("查询用户失败"))?
        else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();
        if let Some(email) = update.email {
            model.email = Set(email.to_lowercase());
        }
        if let Some(password) = update.password {
            model.password_hash = Set(password);
        }
        if let Some(role) = update.role {
            model.role = Set(role.to_string());
        }
        if let Some(status) = update.status {
            model.status = Set(status.to_string());
        }
        if let Some(display_name) = update.display_name {
            model.display_name = Set(optional_text(display_name));
        }
        if let Some(avatar_url) = update.avatar_url {
            model.avatar_url = Set(optional_text(avatar_url));
        }
        model.updated_at = Set(chrono::Utc::now().timestamp());

        let updated = model
            .update(&self.db)
            .await
            .map_err(db_err("更新用户失败"))?;
        Ok(Some(updated.into_user()))
    }

    pub async fn delete_user_impl(&self, id: i64) -> Result<bool> {
        let result = Users::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err("删除用户失败"))?;
        Ok(result.rows_affected > 0)
    }

    pub async fn count_users_impl(&self) -> Result<u64> {
        Users::find()
            .count(&self.db)
            .await
            .map_err(db_err("统计用户数量失败"))
    }
}

#[cfg(test)]
mod tests {
    use super::optional_text;

    #[test]
    fn test_optional_text_clears_blank_values() {
        assert_eq!(optional_text("  Ada ".into()), Some("Ada".to_string()));
        assert_eq!(optional_text("   ".into()), None);
    }
}
