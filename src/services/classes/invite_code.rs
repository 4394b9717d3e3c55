use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse};

use super::ClassService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access::load_class_access;
use crate::services::{Reply, current_user, internal, reject};
use crate::storage::Storage;
use crate::utils::random_code::generate_invite_code;

const MAX_CODE_ATTEMPTS: usize = 8;

/// 生成尚未被占用的邀请码
pub(crate) async fn fresh_invite_code(storage: &dyn Storage) -> Result<String, HttpResponse> {
    for _ in 0..MAX_CODE_ATTEMPTS {
        let code = generate_invite_code();
        let taken = storage
            .get_class_by_invite_code(&code)
            .await
            .map_err(internal("Failed to check invite code"))?
            .is_some();
        if !taken {
            return Ok(code);
        }
    }
    tracing::error!("Could not find a free invite code after {MAX_CODE_ATTEMPTS} attempts");
    Err(reject(
        StatusCode::INTERNAL_SERVER_ERROR,
        ErrorCode::ClassUpdateFailed,
        "Failed to generate invite code",
    ))
}

pub async fn regenerate_invite_code(
    service: &ClassService,
    request: &HttpRequest,
    class_id: i64,
) -> Reply {
    let user = current_user(request)?;
    let storage = service.get_storage(request);

    let (_, access) = load_class_access(storage.as_ref(), &user, class_id).await?;
    if !access.can_manage_class() {
        return Err(reject(
            StatusCode::FORBIDDEN,
            ErrorCode::ClassPermissionDenied,
            "Only the class owner can regenerate the invite code",
        ));
    }

    let code = fresh_invite_code(storage.as_ref()).await?;
    let class = storage
        .update_class_invite_code(class_id, &code)
        .await
        .map_err(internal("Failed to update invite code"))?
        .ok_or_else(|| reject(StatusCode::NOT_FOUND, ErrorCode::ClassNotFound, "Class not found"))?;

    tracing::info!("Invite code of class {} regenerated by {}", class_id, user.id);
    Ok(HttpResponse::Ok().json(ApiResponse::success(class, "Invite code regenerated")))
}
