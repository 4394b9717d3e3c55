//! 作业与提交存储操作

use super::SeaOrmStorage;
use crate::entity::assignments::{ActiveModel, Column, Entity as Assignments};
use crate::entity::submissions::{
    ActiveModel as SubmissionActiveModel, Column as SubmissionColumn, Entity as Submissions,
};
use crate::errors::{ClassHubError, Result};
use crate::models::{
    PaginatedResponse, PaginationInfo, PaginationQuery,
    assignments::{
        entities::{Assignment, Submission},
        requests::{
            AssignmentListQuery, CreateAssignmentRequest, SubmissionListQuery,
            UpdateAssignmentRequest, UpsertSubmission,
        },
    },
};
use crate::utils::contains_pattern;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

impl SeaOrmStorage {
    pub async fn create_assignment_impl(
        &self,
        class_id: i64,
        created_by: i64,
        req: CreateAssignmentRequest,
    ) -> Result<Assignment> {
        let now = Utc::now().timestamp();

        let model = ActiveModel {
            class_id: Set(class_id),
            created_by: Set(created_by),
            title: Set(req.title),
            description: Set(req.description),
            max_score: Set(req.max_score),
            due_at: Set(req.due_at.map(|d| d.timestamp())),
            allow_late: Set(req.allow_late),
            attachments: Set(serde_json::to_string(&req.attachments)?),
            published: Set(req.published),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("创建作业失败: {e}")))?;

        Ok(result.into_assignment())
    }

    pub async fn get_assignment_by_id_impl(&self, id: i64) -> Result<Option<Assignment>> {
        let result = Assignments::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("查询作业失败: {e}")))?;

        Ok(result.map(|m| m.into_assignment()))
    }

    pub async fn list_assignments_with_pagination_impl(
        &self,
        query: AssignmentListQuery,
    ) -> Result<PaginatedResponse<Assignment>> {
        let (page, size) = PaginationQuery::normalized(query.page, query.size);

        let mut select = Assignments::find().filter(Column::ClassId.eq(query.class_id));

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
            .map_err(|e| ClassHubError::database_operation(format!("查询作业总数失败: {e}")))?;

        let rows = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("查询作业列表失败: {e}")))?;

        Ok(PaginatedResponse {
            items: rows.into_iter().map(|m| m.into_assignment()).collect(),
            pagination: PaginationInfo::new(page, size, total),
        })
    }

    pub async fn update_assignment_impl(
        &self,
        id: i64,
        update: UpdateAssignmentRequest,
    ) -> Result<Option<Assignment>> {
        if self.get_assignment_by_id_impl(id).await?.is_none() {
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

        if let Some(max_score) = update.max_score {
            model.max_score = Set(max_score);
        }

        if let Some(due_at) = update.due_at {
            model.due_at = Set(due_at.map(|d| d.timestamp()));
        }

        if let Some(allow_late) = update.allow_late {
            model.allow_late = Set(allow_late);
        }

        if let Some(attachments) = update.attachments {
            model.attachments = Set(serde_json::to_string(&attachments)?);
        }

        if let Some(published) = update.published {
            model.published = Set(published);
        }

        let updated = model
            .update(&self.db)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("更新作业失败: {e}")))?;

        Ok(Some(updated.into_assignment()))
    }

    pub async fn delete_assignment_impl(&self, id: i64) -> Result<bool> {
        let result = Assignments::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("删除作业失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 学生待完成作业数：所在班级中已发布、未截止且未提交
    pub async fn count_pending_assignments_impl(
        &self,
        student_id: i64,
        now: DateTime<Utc>,
    ) -> Result<i64> {
        let class_ids = self.list_user_class_ids_impl(student_id).await?;
        if class_ids.is_empty() {
            return Ok(0);
        }

        let submitted: Vec<i64> = Submissions::find()
            .select_only()
            .column(SubmissionColumn::AssignmentId)
            .filter(SubmissionColumn::StudentId.eq(student_id))
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("查询提交记录失败: {e}")))?;

        let mut select = Assignments::find()
            .filter(Column::ClassId.is_in(class_ids))
            .filter(Column::Published.eq(true))
            .filter(
                Condition::any()
                    .add(Column::DueAt.is_null())
                    .add(Column::DueAt.gte(now.timestamp())),
            );

        if !submitted.is_empty() {
            select = select.filter(Column::Id.is_not_in(submitted));
        }

        let count = select
            .count(&self.db)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("统计待完成作业失败: {e}")))?;

        Ok(count as i64)
    }

    /// 写入提交，已存在则覆盖内容并刷新提交时间
    pub async fn upsert_submission_impl(&self, req: UpsertSubmission) -> Result<Submission> {
        let now = Utc::now().timestamp();
        let attachments = serde_json::to_string(&req.attachments)?;

        let existing = self
            .get_student_submission_impl(req.assignment_id, req.student_id)
            .await?;

        let model = match existing {
            Some(existing) => SubmissionActiveModel {
                id: Set(existing.id),
                content: Set(req.content),
                attachments: Set(attachments),
                is_late: Set(req.is_late),
                submitted_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            }
            .update(&self.db)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("更新提交失败: {e}")))?,
            None => SubmissionActiveModel {
                assignment_id: Set(req.assignment_id),
                student_id: Set(req.student_id),
                content: Set(req.content),
                attachments: Set(attachments),
                is_late: Set(req.is_late),
                score: Set(None),
                feedback: Set(None),
                graded_by: Set(None),
                graded_at: Set(None),
                submitted_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            }
            .insert(&self.db)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("创建提交失败: {e}")))?,
        };

        Ok(model.into_submission())
    }

    pub async fn get_submission_by_id_impl(&self, id: i64) -> Result<Option<Submission>> {
        let result = Submissions::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("查询提交失败: {e}")))?;

        Ok(result.map(|m| m.into_submission()))
    }

    pub async fn get_student_submission_impl(
        &self,
        assignment_id: i64,
        student_id: i64,
    ) -> Result<Option<Submission>> {
        let result = Submissions::find()
            .filter(
                Condition::all()
                    .add(SubmissionColumn::AssignmentId.eq(assignment_id))
                    .add(SubmissionColumn::StudentId.eq(student_id)),
            )
            .one(&self.db)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("查询提交失败: {e}")))?;

        Ok(result.map(|m| m.into_submission()))
    }

    pub async fn list_student_submissions_impl(
        &self,
        student_id: i64,
        assignment_ids: &[i64],
    ) -> Result<Vec<Submission>> {
        if assignment_ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = Submissions::find()
            .filter(SubmissionColumn::StudentId.eq(student_id))
            .filter(SubmissionColumn::AssignmentId.is_in(assignment_ids.iter().copied()))
            .all(&self.db)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("查询提交失败: {e}")))?;

        Ok(rows.into_iter().map(|m| m.into_submission()).collect())
    }

    pub async fn list_submissions_with_pagination_impl(
        &self,
        query: SubmissionListQuery,
    ) -> Result<PaginatedResponse<Submission>> {
        let (page, size) = PaginationQuery::normalized(query.page, query.size);

        let mut select =
            Submissions::find().filter(SubmissionColumn::AssignmentId.eq(query.assignment_id));

        if query.ungraded_only {
            select = select.filter(SubmissionColumn::GradedAt.is_null());
        }

        let paginator = select
            .order_by_desc(SubmissionColumn::SubmittedAt)
            .paginate(&self.db, size);

        let total = paginator
            .num_items()
            .await
            .map_err(|e| ClassHubError::database_operation(format!("查询提交总数失败: {e}")))?;

        let rows = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("查询提交列表失败: {e}")))?;

        Ok(PaginatedResponse {
            items: rows.into_iter().map(|m| m.into_submission()).collect(),
            pagination: PaginationInfo::new(page, size, total),
        })
    }

    pub async fn grade_submission_impl(
        &self,
        id: i64,
        score: f64,
        feedback: Option<String>,
        graded_by: i64,
    ) -> Result<Option<Submission>> {
        if self.get_submission_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let now = Utc::now().timestamp();
        let updated = SubmissionActiveModel {
            id: Set(id),
            score: Set(Some(score)),
            feedback: Set(feedback),
            graded_by: Set(Some(graded_by)),
            graded_at: Set(Some(now)),
            updated_at: Set(now),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .map_err(|e| ClassHubError::database_operation(format!("批改提交失败: {e}")))?;

        Ok(Some(updated.into_submission()))
    }
}
