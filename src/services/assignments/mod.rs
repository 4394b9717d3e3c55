pub mod create;
pub mod delete;
pub mod get;
pub mod grade;
pub mod list;
pub mod submissions;
pub mod submit;
pub mod update;

use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use super::access::{ClassAccess, load_class_access};
use super::{declare_service, finish, internal, reject};
use crate::config::AppConfig;
use crate::mail::{EmailTemplate, Mailer};
use crate::models::{
    ErrorCode,
    assignments::{
        entities::Assignment,
        requests::{
            AssignmentListParams, CreateAssignmentRequest, GradeSubmissionRequest,
            SubmissionListParams, SubmitAssignmentRequest, UpdateAssignmentRequest,
        },
    },
    classes::entities::Class,
    notifications::{
        entities::{NotificationType, ReferenceType},
        requests::NewNotification,
    },
    users::entities::User,
};
use crate::services::notifications::publish::notify_class_students;
use crate::storage::Storage;

declare_service!(AssignmentService);

const ASSIGNMENT_TITLE_MAX: usize = 200;

impl AssignmentService {
    pub async fn list_assignments(
        &self,
        request: &HttpRequest,
        class_id: i64,
        query: AssignmentListParams,
    ) -> ActixResult<HttpResponse> {
        finish(list::list_assignments(self, request, class_id, query).await)
    }

    pub async fn create_assignment(
        &self,
        request: &HttpRequest,
        class_id: i64,
        assignment: CreateAssignmentRequest,
    ) -> ActixResult<HttpResponse> {
        finish(create::create_assignment(self, request, class_id, assignment).await)
    }

    pub async fn get_assignment(
        &self,
        request: &HttpRequest,
        assignment_id: i64,
    ) -> ActixResult<HttpResponse> {
        finish(get::get_assignment(self, request, assignment_id).await)
    }

    pub async fn update_assignment(
        &self,
        request: &HttpRequest,
        assignment_id: i64,
        update: UpdateAssignmentRequest,
    ) -> ActixResult<HttpResponse> {
        finish(update::update_assignment(self, request, assignment_id, update).await)
    }

    pub async fn delete_assignment(
        &self,
        request: &HttpRequest,
        assignment_id: i64,
    ) -> ActixResult<HttpResponse> {
        finish(delete::delete_assignment(self, request, assignment_id).await)
    }

    // 学生提交或覆盖提交
    pub async fn submit(
        &self,
        request: &HttpRequest,
        assignment_id: i64,
        submission: SubmitAssignmentRequest,
    ) -> ActixResult<HttpResponse> {
        finish(submit::submit(self, request, assignment_id, submission).await)
    }

    pub async fn list_submissions(
        &self,
        request: &HttpRequest,
        assignment_id: i64,
        query: SubmissionListParams,
    ) -> ActixResult<HttpResponse> {
        finish(submissions::list_submissions(self, request, assignment_id, query).await)
    }

    pub async fn get_submission(
        &self,
        request: &HttpRequest,
        submission_id: i64,
    ) -> ActixResult<HttpResponse> {
        finish(submissions::get_submission(self, request, submission_id).await)
    }

    pub async fn grade_submission(
        &self,
        request: &HttpRequest,
        submission_id: i64,
        grade: GradeSubmissionRequest,
    ) -> ActixResult<HttpResponse> {
        finish(grade::grade_submission(self, request, submission_id, grade).await)
    }
}

/// 加载作业；学生看不到未发布的作业
pub(super) async fn load_assignment(
    storage: &dyn Storage,
    user: &User,
    assignment_id: i64,
) -> Result<(Assignment, Class, ClassAccess), HttpResponse> {
    let not_found =
        || reject(StatusCode::NOT_FOUND, ErrorCode::AssignmentNotFound, "Assignment not found");

    let assignment = storage
        .get_assignment_by_id(assignment_id)
        .await
        .map_err(internal("Failed to get assignment"))?
        .ok_or_else(not_found)?;
    let (class, access) = load_class_access(storage, user, assignment.class_id).await?;
    if !assignment.published && !access.can_manage_content() {
        return Err(not_found());
    }
    Ok((assignment, class, access))
}

pub(super) fn require_manager(access: &ClassAccess) -> Result<(), HttpResponse> {
    if access.can_manage_content() {
        Ok(())
    } else {
        Err(reject(
            StatusCode::FORBIDDEN,
            ErrorCode::ClassPermissionDenied,
            "Only professors and assistants of this class can manage assignments",
        ))
    }
}

pub(super) fn validate_max_score(max_score: f64) -> Result<(), HttpResponse> {
    if max_score.is_finite() && max_score > 0.0 {
        Ok(())
    } else {
        Err(reject(
            StatusCode::BAD_REQUEST,
            ErrorCode::BadRequest,
            "max_score must be a positive number",
        ))
    }
}

/// 作业发布时通知学生
pub(super) async fn announce(
    storage: &dyn Storage,
    mailer: Arc<dyn Mailer>,
    class: &Class,
    assignment: &Assignment,
) {
    let due_at = assignment
        .due_at
        .map(|d| d.format("%Y-%m-%d %H:%M UTC").to_string());
    notify_class_students(
        storage,
        mailer,
        class.id,
        NewNotification {
            notification_type: NotificationType::AssignmentPublished,
            title: assignment.title.clone(),
            content: Some(match &due_at {
                Some(due) => format!("New assignment in {}, due {}", class.name, due),
                None => format!("New assignment in {}", class.name),
            }),
            reference_type: Some(ReferenceType::Assignment),
            reference_id: Some(assignment.id),
        },
        Some(EmailTemplate::AssignmentPublished {
            class_name: class.name.clone(),
            title: assignment.title.clone(),
            due_at,
            link: AppConfig::get()
                .public_link(&format!("classes/{}/assignments/{}", class.id, assignment.id)),
        }),
    )
    .await;
}
