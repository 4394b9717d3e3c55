use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse};

use super::{ASSIGNMENT_TITLE_MAX, AssignmentService, announce, validate_max_score};
use crate::models::{ApiResponse, ErrorCode, assignments::requests::CreateAssignmentRequest};
use crate::services::access::{ensure_not_archived, require_content_manager};
use crate::services::{Reply, current_user, get_mailer, internal, reject};
use crate::utils::validate::validate_required_text;

pub async fn create_assignment(
    service: &AssignmentService,
    request: &HttpRequest,
    class_id: i64,
    assignment: CreateAssignmentRequest,
) -> Reply {
    let user = current_user(request)?;
    let storage = service.get_storage(request);

    let (class, _) = require_content_manager(storage.as_ref(), &user, class_id).await?;
    ensure_not_archived(&class)?;
    validate_required_text("Title", &assignment.title, ASSIGNMENT_TITLE_MAX)
        .map_err(|msg| reject(StatusCode::BAD_REQUEST, ErrorCode::BadRequest, msg))?;
    validate_max_score(assignment.max_score)?;

    let assignment = CreateAssignmentRequest {
        title: assignment.title.trim().to_string(),
        ..assignment
    };
    let created = storage
        .create_assignment(class_id, user.id, assignment)
        .await
        .map_err(internal("Failed to create assignment"))?;

    if created.published {
        announce(storage.as_ref(), get_mailer(request), &class, &created).await;
    }

    Ok(HttpResponse::Created().json(ApiResponse::success(created, "Assignment created")))
}
