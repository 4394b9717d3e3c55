use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse};

use super::ClassService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access::load_class_access;
use crate::services::{Reply, current_user, internal, reject};

pub async fn delete_class(service: &ClassService, request: &HttpRequest, class_id: i64) -> Reply {
    let user = current_user(request)?;
    let storage = service.get_storage(request);

    let (class, access) = load_class_access(storage.as_ref(), &user, class_id).await?;
    if !access.can_manage_class() {
        return Err(reject(
            StatusCode::FORBIDDEN,
            ErrorCode::ClassPermissionDenied,
            "Only the class owner or an admin can delete this class",
        ));
    }

    let deleted = storage
        .delete_class(class_id)
        .await
        .map_err(internal("Failed to delete class"))?;
    if !deleted {
        return Err(reject(StatusCode::NOT_FOUND, ErrorCode::ClassNotFound, "Class not found"));
    }

    tracing::info!("Class {} ({}) deleted by {}", class.id, class.name, user.id);
    Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Class deleted successfully")))
}
