use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse};

use super::ClassService;
use crate::models::{
    ApiResponse, ErrorCode,
    class_members::entities::ClassMemberRole,
    classes::requests::JoinClassRequest,
};
use crate::services::{Reply, current_user, internal, reject};
use crate::utils::random_code::normalize_code;

pub async fn join_class(
    service: &ClassService,
    request: &HttpRequest,
    join_data: JoinClassRequest,
) -> Reply {
    let user = current_user(request)?;
    let storage = service.get_storage(request);

    let class = storage
        .get_class_by_invite_code(&normalize_code(&join_data.invite_code))
        .await
        .map_err(internal("Failed to get class"))?
        .filter(|c| !c.archived)
        .ok_or_else(|| {
            reject(
                StatusCode::NOT_FOUND,
                ErrorCode::ClassInviteCodeInvalid,
                "Invalid invite code",
            )
        })?;

    let existing = storage
        .get_class_member(class.id, user.id)
        .await
        .map_err(internal("Failed to check membership"))?;
    if existing.is_some() || class.professor_id == user.id {
        return Err(reject(
            StatusCode::CONFLICT,
            ErrorCode::ClassAlreadyJoined,
            "You have already joined this class",
        ));
    }

    let member = storage
        .add_class_member(class.id, user.id, ClassMemberRole::Student)
        .await
        .map_err(internal("Failed to join class"))?;

    tracing::info!("User {} joined class {}", user.id, class.id);
    Ok(HttpResponse::Created().json(ApiResponse::success(member, "Joined class successfully")))
}
