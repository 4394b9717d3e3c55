use actix_web::{HttpRequest, HttpResponse};
use chrono::Utc;

use super::{AssignmentService, load_assignment};
use crate::models::{
    ApiResponse,
    assignments::{entities::submission_status, responses::AssignmentView},
};
use crate::services::{Reply, current_user, internal};

pub async fn get_assignment(
    service: &AssignmentService,
    request: &HttpRequest,
    assignment_id: i64,
) -> Reply {
    let user = current_user(request)?;
    let storage = service.get_storage(request);

    let (assignment, _, access) = load_assignment(storage.as_ref(), &user, assignment_id).await?;

    let view = if access.is_student() {
        let mine = storage
            .get_student_submission(assignment.id, user.id)
            .await
            .map_err(internal("Failed to load submission"))?;
        AssignmentView {
            my_status: Some(submission_status(&assignment, mine.as_ref(), Utc::now())),
            my_submission: mine,
            assignment,
        }
    } else {
        AssignmentView {
            assignment,
            my_status: None,
            my_submission: None,
        }
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(view, "Assignment retrieved successfully")))
}
