use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse};

use super::ClassMemberService;
use crate::models::{ApiResponse, ErrorCode, class_members::requests::UpdateClassMemberRequest};
use crate::services::access::load_class_access;
use crate::services::{Reply, current_user, internal, reject};

pub async fn update_member(
    service: &ClassMemberService,
    request: &HttpRequest,
    class_id: i64,
    user_id: i64,
    update_data: UpdateClassMemberRequest,
) -> Reply {
    let user = current_user(request)?;
    let storage = service.get_storage(request);

    let (class, access) = load_class_access(storage.as_ref(), &user, class_id).await?;
    if !access.can_manage_class() {
        return Err(reject(
            StatusCode::FORBIDDEN,
            ErrorCode::ClassPermissionDenied,
            "Only the class owner or an admin can change member roles",
        ));
    }
    if class.professor_id == user_id {
        return Err(reject(
            StatusCode::CONFLICT,
            ErrorCode::ClassOwnerImmutable,
            "The class owner's role cannot be changed",
        ));
    }

    let member = storage
        .update_class_member_role(class_id, user_id, update_data.role)
        .await
        .map_err(internal("Failed to update class member"))?
        .ok_or_else(|| {
            reject(
                StatusCode::NOT_FOUND,
                ErrorCode::ClassMemberNotFound,
                "Class member not found",
            )
        })?;

    tracing::info!(
        "Member {} of class {} set to {} by {}",
        user_id,
        class_id,
        member.role,
        user.id
    );
    Ok(HttpResponse::Ok().json(ApiResponse::success(member, "Class member updated")))
}
