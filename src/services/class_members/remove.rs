use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse};

use super::ClassMemberService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access::load_class_access;
use crate::services::{Reply, current_user, internal, reject};

pub async fn remove_member(
    service: &ClassMemberService,
    request: &HttpRequest,
    class_id: i64,
    user_id: i64,
) -> Reply {
    let user = current_user(request)?;
    let storage = service.get_storage(request);

    let (class, access) = load_class_access(storage.as_ref(), &user, class_id).await?;
    let leaving_self = user.id == user_id;
    if !leaving_self && !access.can_manage_class() {
        return Err(reject(
            StatusCode::FORBIDDEN,
            ErrorCode::ClassPermissionDenied,
            "Only the class owner or an admin can remove members",
        ));
    }
    if class.professor_id == user_id {
        return Err(reject(
            StatusCode::CONFLICT,
            ErrorCode::ClassOwnerImmutable,
            "The class owner cannot be removed",
        ));
    }

    let removed = storage
        .remove_class_member(class_id, user_id)
        .await
        .map_err(internal("Failed to remove class member"))?;
    if !removed {
        return Err(reject(
            StatusCode::NOT_FOUND,
            ErrorCode::ClassMemberNotFound,
            "Class member not found",
        ));
    }

    let message = if leaving_self { "Left class" } else { "Class member removed" };
    Ok(HttpResponse::Ok().json(ApiResponse::success_empty(message)))
}
