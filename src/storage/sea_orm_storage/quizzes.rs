//! 测验与作答存储操作

use super::SeaOrmStorage;
use crate::entity::quiz_attempts::{
    ActiveModel as AttemptActiveModel, Column as AttemptColumn, Entity as QuizAttempts,
};
use crate::entity::quizzes::{ActiveModel, Column, Entity as Quizzes};
use crate::errors::{ClassHubError, Result};
use crate::models::{
    PaginatedResponse, PaginationInfo, PaginationQuery,
    quizzes::{
        entities::{AnswerSheet, AttemptStatus, Quiz, QuizAttempt},
        requests::{
            AttemptListQuery, CreateQuizRequest, FinalizeAttempt, NewAttempt, QuizListQuery,
            UpdateQuizRequest,
        },
    },
};
use crate::utils::contains_pattern;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set, sea_query::Expr,
};

impl SeaOrmStorage {
    pub async fn create_quiz_impl(
        &self,
        class_id: i64,
        created_by: i64,
        req: CreateQuizRequest,
    ) -> Result<Quiz> {
        let now = Utc::now().timestamp();

        let model = ActiveModel {
            class_id: Set(class_id),
            created_by: Set(created_by),
            title: Set(req.title),
            description: Set(req.description),
            time_limit_minutes: Set(req.time_limit_minutes),
            max_attempts: Set(req.max_attempts),
            available_from: Set(req.available_from.map(|d| d.timestamp())),
            available_until: Set(req.available_until.map(|d| d.timestamp())),
            shuffle_questions: Set(req.shuffle_questions),
            published: Set(req.published),
            questions: Set(serde_json::to_string(&req.questions)?),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("创建测验失败: {e}")))?;

        Ok(result.into_quiz())
    }

    pub async fn get_quiz_by_id_impl(&self, id: i64) -> Result<Option<Quiz>> {
        let result = Quizzes::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("查询测验失败: {e}")))?;

        Ok(result.map(|m| m.into_quiz()))
    }

    pub async fn list_quizzes_with_pagination_impl(
        &self,
        query: QuizListQuery,
    ) -> Result<PaginatedResponse<Quiz>> {
        let (page, size) = PaginationQuery::normalized(query.page, query.size);

        let mut select = Quizzes::find().filter(Column::ClassId.eq(query.class_id));

        if query.published_only {
            select = select.filter(Column::Published.eq(true));
        }

        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let pattern = contains_pattern(search.trim());
            select = select.filter(Column::Title.like(pattern));
        }

        let paginator = select
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .paginate(&self.db, size);

        let total = paginator
            .num_items()
            .await
            .map_err(|e| ClassHubError::database_operation(format!("查询测验总数失败: {e}")))?;

        let rows = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("查询测验列表失败: {e}")))?;

        Ok(PaginatedResponse {
            items: rows.into_iter().map(|m| m.into_quiz()).collect(),
            pagination: PaginationInfo::new(page, size, total),
        })
    }

    pub async fn update_quiz_impl(&self, id: i64, update: UpdateQuizRequest) -> Result<Option<Quiz>> {
        if self.get_quiz_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(title) = update.title {
            model.title = Set(title);
        }

        if let Some(description) = update.description {
            model.description = Set(Some(description));
        }

        if let Some(time_limit) = update.time_limit_minutes {
            model.time_limit_minutes = Set(time_limit);
        }

        if let Some(max_attempts) = update.max_attempts {
            model.max_attempts = Set(max_attempts);
        }

        if let Some(available_from) = update.available_from {
            model.available_from = Set(available_from.map(|d| d.timestamp()));
        }

        if let Some(available_until) = update.available_until {
            model.available_until = Set(available_until.map(|d| d.timestamp()));
        }

        if let Some(shuffle) = update.shuffle_questions {
            model.shuffle_questions = Set(shuffle);
        }

        if let Some(published) = update.published {
            model.published = Set(published);
        }

        if let Some(questions) = update.questions {
            model.questions = Set(serde_json::to_string(&questions)?);
        }

        let updated = model
            .update(&self.db)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("更新测验失败: {e}")))?;

        Ok(Some(updated.into_quiz()))
    }

    pub async fn delete_quiz_impl(&self, id: i64) -> Result<bool> {
        let result = Quizzes::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("删除测验失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    pub async fn create_attempt_impl(&self, req: NewAttempt) -> Result<QuizAttempt> {
        let model = AttemptActiveModel {
            quiz_id: Set(req.quiz_id),
            student_id: Set(req.student_id),
            attempt_number: Set(req.attempt_number),
            status: Set(AttemptStatus::InProgress.to_string()),
            answers: Set("{}".to_string()),
            score: Set(None),
            max_score: Set(req.max_score),
            results: Set(None),
            started_at: Set(req.started_at.timestamp()),
            expires_at: Set(req.expires_at.map(|d| d.timestamp())),
            submitted_at: Set(None),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("创建作答失败: {e}")))?;

        Ok(result.into_attempt())
    }

    pub async fn get_attempt_by_id_impl(&self, id: i64) -> Result<Option<QuizAttempt>> {
        let result = QuizAttempts::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("查询作答失败: {e}")))?;

        Ok(result.map(|m| m.into_attempt()))
    }

    pub async fn get_in_progress_attempt_impl(
        &self,
        quiz_id: i64,
        student_id: i64,
    ) -> Result<Option<QuizAttempt>> {
        let result = QuizAttempts::find()
            .filter(
                Condition::all()
                    .add(AttemptColumn::QuizId.eq(quiz_id))
                    .add(AttemptColumn::StudentId.eq(student_id))
                    .add(AttemptColumn::Status.eq(AttemptStatus::InProgress.to_string())),
            )
            .order_by_desc(AttemptColumn::AttemptNumber)
            .one(&self.db)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("查询作答失败: {e}")))?;

        Ok(result.map(|m| m.into_attempt()))
    }

    pub async fn count_attempts_impl(&self, quiz_id: i64, student_id: i64) -> Result<i64> {
        let count = QuizAttempts::find()
            .filter(AttemptColumn::QuizId.eq(quiz_id))
            .filter(AttemptColumn::StudentId.eq(student_id))
            .count(&self.db)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("统计作答次数失败: {e}")))?;

        Ok(count as i64)
    }

    /// 仅更新作答中的记录
    pub async fn save_attempt_answers_impl(
        &self,
        id: i64,
        answers: AnswerSheet,
    ) -> Result<Option<QuizAttempt>> {
        let result = QuizAttempts::update_many()
            .col_expr(AttemptColumn::Answers, Expr::value(serde_json::to_string(&answers)?))
            .filter(AttemptColumn::Id.eq(id))
            .filter(AttemptColumn::Status.eq(AttemptStatus::InProgress.to_string()))
            .exec(&self.db)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("保存作答失败: {e}")))?;

        if result.rows_affected == 0 {
            return Ok(None);
        }

        self.get_attempt_by_id_impl(id).await
    }

    /// 条件更新：仅 in_progress 的作答会被结束
    pub async fn finalize_attempt_impl(
        &self,
        id: i64,
        finalize: FinalizeAttempt,
    ) -> Result<Option<QuizAttempt>> {
        let result = QuizAttempts::update_many()
            .col_expr(AttemptColumn::Status, Expr::value(finalize.status.to_string()))
            .col_expr(
                AttemptColumn::Answers,
                Expr::value(serde_json::to_string(&finalize.answers)?),
            )
            .col_expr(AttemptColumn::Score, Expr::value(finalize.score))
            .col_expr(
                AttemptColumn::Results,
                Expr::value(serde_json::to_string(&finalize.results)?),
            )
            .col_expr(
                AttemptColumn::SubmittedAt,
                Expr::value(finalize.submitted_at.timestamp()),
            )
            .filter(AttemptColumn::Id.eq(id))
            .filter(AttemptColumn::Status.eq(AttemptStatus::InProgress.to_string()))
            .exec(&self.db)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("结束作答失败: {e}")))?;

        if result.rows_affected == 0 {
            return Ok(None);
        }

        self.get_attempt_by_id_impl(id).await
    }

    pub async fn list_attempts_with_pagination_impl(
        &self,
        query: AttemptListQuery,
    ) -> Result<PaginatedResponse<QuizAttempt>> {
        let (page, size) = PaginationQuery::normalized(query.page, query.size);

        let mut select = QuizAttempts::find().filter(AttemptColumn::QuizId.eq(query.quiz_id));

        if let Some(student_id) = query.student_id {
            select = select.filter(AttemptColumn::StudentId.eq(student_id));
        }

        let paginator = select
            .order_by_desc(AttemptColumn::StartedAt)
            .order_by_desc(AttemptColumn::Id)
            .paginate(&self.db, size);

        let total = paginator
            .num_items()
            .await
            .map_err(|e| ClassHubError::database_operation(format!("查询作答总数失败: {e}")))?;

        let rows = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("查询作答列表失败: {e}")))?;

        Ok(PaginatedResponse {
            items: rows.into_iter().map(|m| m.into_attempt()).collect(),
            pagination: PaginationInfo::new(page, size, total),
        })
    }
}
