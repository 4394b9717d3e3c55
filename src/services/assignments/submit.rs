use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse};
use chrono::Utc;

use super::{AssignmentService, load_assignment};
use crate::models::{
    ApiResponse, ErrorCode,
    assignments::requests::{SubmitAssignmentRequest, UpsertSubmission},
};
use crate::services::access::ensure_not_archived;
use crate::services::{Reply, current_user, internal, reject};

/// 提交内容的最大字符数
const SUBMISSION_CONTENT_MAX: usize = 50_000;

/// 批改前可重复提交并覆盖；批改后拒绝
pub async fn submit(
    service: &AssignmentService,
    request: &HttpRequest,
    assignment_id: i64,
    submission: SubmitAssignmentRequest,
) -> Reply {
    let user = current_user(request)?;
    let storage = service.get_storage(request);

    let (assignment, class, access) =
        load_assignment(storage.as_ref(), &user, assignment_id).await?;
    if !access.is_student() {
        return Err(reject(
            StatusCode::FORBIDDEN,
            ErrorCode::ClassPermissionDenied,
            "Only students of this class can submit",
        ));
    }
    ensure_not_archived(&class)?;

    if submission.content.trim().is_empty() && submission.attachments.is_empty() {
        return Err(reject(
            StatusCode::BAD_REQUEST,
            ErrorCode::BadRequest,
            "Submission must have content or attachments",
        ));
    }
    if submission.content.chars().count() > SUBMISSION_CONTENT_MAX {
        return Err(reject(
            StatusCode::BAD_REQUEST,
            ErrorCode::BadRequest,
            "Submission content is too long",
        ));
    }

    let is_late = assignment
        .submission_window(Utc::now())
        .map_err(|msg| reject(StatusCode::CONFLICT, ErrorCode::AssignmentClosed, msg))?;

    let existing = storage
        .get_student_submission(assignment.id, user.id)
        .await
        .map_err(internal("Failed to load submission"))?;
    if existing.as_ref().is_some_and(|s| s.is_graded()) {
        return Err(reject(
            StatusCode::CONFLICT,
            ErrorCode::SubmissionAlreadyGraded,
            "Submission has already been graded",
        ));
    }

    let saved = storage
        .upsert_submission(UpsertSubmission {
            assignment_id: assignment.id,
            student_id: user.id,
            content: submission.content,
            attachments: submission.attachments,
            is_late,
        })
        .await
        .map_err(internal("Failed to save submission"))?;

    tracing::info!(
        "Student {} submitted assignment {} (late: {})",
        user.id,
        assignment.id,
        is_late
    );
    let (status, message) = if existing.is_some() {
        (StatusCode::OK, "Submission updated")
    } else {
        (StatusCode::CREATED, "Submission received")
    };
    Ok(HttpResponse::build(status).json(ApiResponse::success(saved, message)))
}
