//! 练习题存储操作

use super::SeaOrmStorage;
use crate::entity::practice_questions::{ActiveModel, Column, Entity as PracticeQuestions};
use crate::errors::{ClassHubError, Result};
use crate::models::{
    PaginatedResponse, PaginationInfo, PaginationQuery,
    practice::{
        entities::PracticeQuestion,
        requests::{
            CreatePracticeQuestionRequest, PracticeListQuery, UpdatePracticeQuestionRequest,
        },
    },
};
use rand::seq::SliceRandom;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Select, Set,
};

/// 可见范围与筛选条件
fn apply_filters(
    mut select: Select<PracticeQuestions>,
    query: &PracticeListQuery,
) -> Select<PracticeQuestions> {
    if let Some(ref visible) = query.visible_class_ids {
        let mut scope = Condition::any().add(Column::ClassId.is_null());
        if !visible.is_empty() {
            scope = scope.add(Column::ClassId.is_in(visible.iter().copied()));
        }
        select = select.filter(scope);
    }

    if let Some(class_id) = query.class_id {
        select = select.filter(Column::ClassId.eq(class_id));
    }

    if let Some(ref topic) = query.topic
        && !topic.trim().is_empty()
    {
        select = select.filter(Column::Topic.eq(topic.trim()));
    }

    if let Some(difficulty) = query.difficulty {
        select = select.filter(Column::Difficulty.eq(difficulty.to_string()));
    }

    select
}

impl SeaOrmStorage {
    pub async fn create_practice_question_impl(
        &self,
        created_by: i64,
        req: CreatePracticeQuestionRequest,
    ) -> Result<PracticeQuestion> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            class_id: Set(req.class_id),
            created_by: Set(created_by),
            topic: Set(req.topic.trim().to_string()),
            difficulty: Set(req.difficulty.to_string()),
            prompt: Set(req.prompt),
            body: Set(serde_json::to_string(&req.body)?),
            explanation: Set(req.explanation),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("创建练习题失败: {e}")))?;

        Ok(result.into_practice_question())
    }

    pub async fn get_practice_question_by_id_impl(
        &self,
        id: i64,
    ) -> Result<Option<PracticeQuestion>> {
        let result = PracticeQuestions::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("查询练习题失败: {e}")))?;

        Ok(result.map(|m| m.into_practice_question()))
    }

    pub async fn list_practice_questions_with_pagination_impl(
        &self,
        query: PracticeListQuery,
    ) -> Result<PaginatedResponse<PracticeQuestion>> {
        let (page, size) = PaginationQuery::normalized(query.page, query.size);

        let paginator = apply_filters(PracticeQuestions::find(), &query)
            .order_by_asc(Column::Topic)
            .order_by_desc(Column::CreatedAt)
            .paginate(&self.db, size);

        let total = paginator
            .num_items()
            .await
            .map_err(|e| ClassHubError::database_operation(format!("查询练习题总数失败: {e}")))?;

        let rows = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("查询练习题列表失败: {e}")))?;

        Ok(PaginatedResponse {
            items: rows
                .into_iter()
                .map(|m| m.into_practice_question())
                .collect(),
            pagination: PaginationInfo::new(page, size, total),
        })
    }

    /// 先取候选 ID，再在内存中随机抽取
    pub async fn random_practice_questions_impl(
        &self,
        query: PracticeListQuery,
        count: usize,
    ) -> Result<Vec<PracticeQuestion>> {
        let mut ids: Vec<i64> = apply_filters(PracticeQuestions::find(), &query)
            .select_only()
            .column(Column::Id)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("查询练习题失败: {e}")))?;

        ids.shuffle(&mut rand::rng());
        ids.truncate(count);

        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = PracticeQuestions::find()
            .filter(Column::Id.is_in(ids.clone()))
            .all(&self.db)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("查询练习题失败: {e}")))?;

        // 保持抽取顺序
        let mut questions: Vec<PracticeQuestion> = rows
            .into_iter()
            .map(|m| m.into_practice_question())
            .collect();
        questions.sort_by_key(|q| ids.iter().position(|id| *id == q.id));

        Ok(questions)
    }

    pub async fn update_practice_question_impl(
        &self,
        id: i64,
        update: UpdatePracticeQuestionRequest,
    ) -> Result<Option<PracticeQuestion>> {
        if self.get_practice_question_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(topic) = update.topic {
            model.topic = Set(topic.trim().to_string());
        }

        if let Some(difficulty) = update.difficulty {
            model.difficulty = Set(difficulty.to_string());
        }

        if let Some(prompt) = update.prompt {
            model.prompt = Set(prompt);
        }

        if let Some(body) = update.body {
            model.body = Set(serde_json::to_string(&body)?);
        }

        if let Some(explanation) = update.explanation {
            model.explanation = Set(Some(explanation));
        }

        let updated = model
            .update(&self.db)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("更新练习题失败: {e}")))?;

        Ok(Some(updated.into_practice_question()))
    }

    pub async fn delete_practice_question_impl(&self, id: i64) -> Result<bool> {
        let result = PracticeQuestions::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("删除练习题失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    pub async fn list_practice_topics_impl(
        &self,
        visible_class_ids: Option<Vec<i64>>,
    ) -> Result<Vec<String>> {
        let query = PracticeListQuery {
            visible_class_ids,
            ..Default::default()
        };

        let topics: Vec<String> = apply_filters(PracticeQuestions::find(), &query)
            .select_only()
            .column(Column::Topic)
            .distinct()
            .order_by_asc(Column::Topic)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("查询练习主题失败: {e}")))?;

        Ok(topics)
    }
}
