//! 文件存储操作

use super::SeaOrmStorage;
use crate::entity::files::{ActiveModel, Column, Entity as Files};
use crate::errors::{ClassHubError, Result};
use crate::models::files::{entities::File, requests::NewFile};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};

impl SeaOrmStorage {
    /// 登记上传文件
    pub async fn create_file_impl(&self, req: NewFile) -> Result<File> {
        let model = ActiveModel {
            token: Set(req.token),
            original_name: Set(req.original_name),
            stored_name: Set(req.stored_name),
            file_size: Set(req.file_size),
            file_type: Set(req.file_type),
            user_id: Set(req.user_id),
            uploaded_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("上传文件记录失败: {e}")))?;

        Ok(result.into_file())
    }

    /// 通过 token 获取文件
    pub async fn get_file_by_token_impl(&self, token: &str) -> Result<Option<File>> {
        let result = Files::find()
            .filter(Column::Token.eq(token))
            .one(&self.db)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("查询文件失败: {e}")))?;

        Ok(result.map(|m| m.into_file()))
    }
}
