use actix_web::{HttpRequest, HttpResponse};

use super::{AssignmentService, load_assignment, require_manager};
use crate::models::ApiResponse;
use crate::services::{Reply, current_user, internal};

pub async fn delete_assignment(
    service: &AssignmentService,
    request: &HttpRequest,
    assignment_id: i64,
) -> Reply {
    let user = current_user(request)?;
    let storage = service.get_storage(request);

    let (_, _, access) = load_assignment(storage.as_ref(), &user, assignment_id).await?;
    require_manager(&access)?;

    storage
        .delete_assignment(assignment_id)
        .await
        .map_err(internal("Failed to delete assignment"))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Assignment deleted")))
}
