use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse};

use super::submissions::load_submission;
use super::{AssignmentService, require_manager};
use crate::models::{
    ApiResponse, ErrorCode,
    assignments::requests::GradeSubmissionRequest,
    notifications::{
        entities::{NotificationType, ReferenceType},
        requests::NewNotification,
    },
};
use crate::services::notifications::publish::notify_user;
use crate::services::{Reply, current_user, internal, reject};

fn check_score(score: f64, max_score: f64) -> Result<(), String> {
    if score.is_finite() && (0.0..=max_score).contains(&score) {
        Ok(())
    } else {
        Err(format!("Score must be between 0 and {max_score}"))
    }
}

/// 可重复批改，以最后一次为准
pub async fn grade_submission(
    service: &AssignmentService,
    request: &HttpRequest,
    submission_id: i64,
    grade: GradeSubmissionRequest,
) -> Reply {
    let user = current_user(request)?;
    let storage = service.get_storage(request);

    let (submission, assignment, access) =
        load_submission(storage.as_ref(), &user, submission_id).await?;
    require_manager(&access)?;
    check_score(grade.score, assignment.max_score)
        .map_err(|msg| reject(StatusCode::BAD_REQUEST, ErrorCode::GradeOutOfRange, msg))?;

    let feedback = grade
        .feedback
        .map(|f| f.trim().to_string())
        .filter(|f| !f.is_empty());
    let graded = storage
        .grade_submission(submission.id, grade.score, feedback, user.id)
        .await
        .map_err(internal("Failed to grade submission"))?
        .ok_or_else(|| {
            reject(
                StatusCode::NOT_FOUND,
                ErrorCode::SubmissionNotFound,
                "Submission not found",
            )
        })?;

    notify_user(
        storage.as_ref(),
        graded.student_id,
        NewNotification {
            notification_type: NotificationType::SubmissionGraded,
            title: assignment.title.clone(),
            content: Some(format!("Score: {} / {}", grade.score, assignment.max_score)),
            reference_type: Some(ReferenceType::Submission),
            reference_id: Some(graded.id),
        },
    )
    .await;

    Ok(HttpResponse::Ok().json(ApiResponse::success(graded, "Submission graded")))
}

#[cfg(test)]
mod tests {
    use super::check_score;

    #[test]
    fn test_score_range() {
        assert!(check_score(0.0, 100.0).is_ok());
        assert!(check_score(100.0, 100.0).is_ok());
        assert!(check_score(100.5, 100.0).is_err());
        assert!(check_score(-1.0, 100.0).is_err());
        assert!(check_score(f64::NAN, 100.0).is_err());
    }
}
