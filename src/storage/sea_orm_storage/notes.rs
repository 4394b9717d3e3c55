//! 笔记存储操作

use super::SeaOrmStorage;
use crate::entity::notes::{ActiveModel, Column, Entity as Notes};
use crate::errors::{ClassHubError, Result};
use crate::models::{
    PaginationInfo, PaginationQuery,
    notes::{
        entities::Note,
        requests::{CreateNoteRequest, NoteListQuery, UpdateNoteRequest},
        responses::NoteListResponse,
    },
};
use crate::utils::contains_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set,
};

impl SeaOrmStorage {
    pub async fn create_note_impl(
        &self,
        class_id: i64,
        author_id: i64,
        req: CreateNoteRequest,
    ) -> Result<Note> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            class_id: Set(class_id),
            author_id: Set(author_id),
            title: Set(req.title),
            content: Set(req.content),
            attachments: Set(serde_json::to_string(&req.attachments)?),
            pinned: Set(req.pinned),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("创建笔记失败: {e}")))?;

        Ok(result.into_note())
    }

    pub async fn get_note_by_id_impl(&self, id: i64) -> Result<Option<Note>> {
        let result = Notes::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("查询笔记失败: {e}")))?;

        Ok(result.map(|m| m.into_note()))
    }

    /// 置顶在前，其余按创建时间倒序
    pub async fn list_notes_with_pagination_impl(
        &self,
        query: NoteListQuery,
    ) -> Result<NoteListResponse> {
        let (page, size) = PaginationQuery::normalized(query.page, query.size);

        let mut select = Notes::find().filter(Column::ClassId.eq(query.class_id));

        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let pattern = contains_pattern(search.trim());
            select = select.filter(
                Condition::any()
                    .add(Column::Title.like(pattern.clone()))
                    .add(Column::Content.like(pattern.clone())),
            );
        }

        let paginator = select
            .order_by_desc(Column::Pinned)
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .paginate(&self.db, size);

        let total = paginator
            .num_items()
            .await
            .map_err(|e| ClassHubError::database_operation(format!("查询笔记总数失败: {e}")))?;

        let notes = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("查询笔记列表失败: {e}")))?;

        Ok(NoteListResponse {
            items: notes.into_iter().map(|m| m.into_note()).collect(),
            pagination: PaginationInfo::new(page, size, total),
        })
    }

    pub async fn update_note_impl(&self, id: i64, update: UpdateNoteRequest) -> Result<Option<Note>> {
        if self.get_note_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(title) = update.title {
            model.title = Set(title);
        }

        if let Some(content) = update.content {
            model.content = Set(content);
        }

        if let Some(attachments) = update.attachments {
            model.attachments = Set(serde_json::to_string(&attachments)?);
        }

        if let Some(pinned) = update.pinned {
            model.pinned = Set(pinned);
        }

        let updated = model
            .update(&self.db)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("更新笔记失败: {e}")))?;

        Ok(Some(updated.into_note()))
    }

    pub async fn delete_note_impl(&self, id: i64) -> Result<bool> {
        let result = Notes::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("删除笔记失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
