use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse};

use super::{
    ASSIGNMENT_TITLE_MAX, AssignmentService, announce, load_assignment, require_manager,
    validate_max_score,
};
use crate::models::{ApiResponse, ErrorCode, assignments::requests::UpdateAssignmentRequest};
use crate::services::{Reply, current_user, get_mailer, internal, reject};
use crate::utils::validate::validate_required_text;

pub async fn update_assignment(
    service: &AssignmentService,
    request: &HttpRequest,
    assignment_id: i64,
    update: UpdateAssignmentRequest,
) -> Reply {
    let user = current_user(request)?;
    let storage = service.get_storage(request);

    let (before, class, access) = load_assignment(storage.as_ref(), &user, assignment_id).await?;
    require_manager(&access)?;

    if let Some(title) = &update.title {
        validate_required_text("Title", title, ASSIGNMENT_TITLE_MAX)
            .map_err(|msg| reject(StatusCode::BAD_REQUEST, ErrorCode::BadRequest, msg))?;
    }
    if let Some(max_score) = update.max_score {
        validate_max_score(max_score)?;
    }

    let update = UpdateAssignmentRequest {
        title: update.title.map(|t| t.trim().to_string()),
        ..update
    };
    let updated = storage
        .update_assignment(assignment_id, update)
        .await
        .map_err(internal("Failed to update assignment"))?
        .ok_or_else(|| {
            reject(
                StatusCode::NOT_FOUND,
                ErrorCode::AssignmentNotFound,
                "Assignment not found",
            )
        })?;

    // 草稿转为发布时才通知
    if !before.published && updated.published {
        announce(storage.as_ref(), get_mailer(request), &class, &updated).await;
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success(updated, "Assignment updated")))
}
