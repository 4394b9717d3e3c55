use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse};

use super::ClassService;
use crate::models::{ApiResponse, ErrorCode, classes::requests::UpdateClassRequest};
use crate::services::access::load_class_access;
use crate::services::{Reply, current_user, internal, reject};
use crate::utils::validate::validate_required_text;

pub async fn update_class(
    service: &ClassService,
    request: &HttpRequest,
    class_id: i64,
    update_data: UpdateClassRequest,
) -> Reply {
    let user = current_user(request)?;
    let storage = service.get_storage(request);

    let (_, access) = load_class_access(storage.as_ref(), &user, class_id).await?;
    if !access.can_manage_class() {
        return Err(reject(
            StatusCode::FORBIDDEN,
            ErrorCode::ClassPermissionDenied,
            "Only the class owner or an admin can update this class",
        ));
    }

    if let Some(name) = &update_data.name {
        validate_required_text("Class name", name, 100)
            .map_err(|msg| reject(StatusCode::BAD_REQUEST, ErrorCode::BadRequest, msg))?;
    }
    let update = UpdateClassRequest {
        name: update_data.name.map(|n| n.trim().to_string()),
        ..update_data
    };

    let class = storage
        .update_class(class_id, update)
        .await
        .map_err(internal("Failed to update class"))?
        .ok_or_else(|| reject(StatusCode::NOT_FOUND, ErrorCode::ClassNotFound, "Class not found"))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(class, "Class updated successfully")))
}
