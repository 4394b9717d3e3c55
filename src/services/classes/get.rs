use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse};

use super::ClassService;
use crate::models::{
    ApiResponse, ErrorCode,
    classes::responses::{ClassDetailResponse, ClassPreviewResponse},
};
use crate::services::access::load_class_access;
use crate::services::{Reply, current_user, internal, reject};
use crate::utils::random_code::normalize_code;

pub async fn get_class(service: &ClassService, request: &HttpRequest, class_id: i64) -> Reply {
    let user = current_user(request)?;
    let storage = service.get_storage(request);

    let (class, access) = load_class_access(storage.as_ref(), &user, class_id).await?;

    let professor = storage
        .get_user_by_id(class.professor_id)
        .await
        .map_err(internal("Failed to get professor"))?
        .map(|p| p.summary());
    let member_count = storage
        .count_class_members(class_id)
        .await
        .map_err(internal("Failed to count class members"))?;

    let detail = ClassDetailResponse {
        class,
        professor,
        member_count,
        my_role: access.member_role(),
    };
    Ok(HttpResponse::Ok().json(ApiResponse::success(detail, "Class retrieved successfully")))
}

/// 邀请码预览，只返回加入前需要的信息
pub async fn get_class_by_code(
    service: &ClassService,
    request: &HttpRequest,
    code: String,
) -> Reply {
    let storage = service.get_storage(request);

    let class = storage
        .get_class_by_invite_code(&normalize_code(&code))
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

    let professor_name = storage
        .get_user_by_id(class.professor_id)
        .await
        .map_err(internal("Failed to get professor"))?
        .map(|p| p.display_name().to_string());

    let preview = ClassPreviewResponse {
        id: class.id,
        name: class.name,
        description: class.description,
        professor_name,
    };
    Ok(HttpResponse::Ok().json(ApiResponse::success(preview, "Class retrieved successfully")))
}
