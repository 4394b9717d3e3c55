use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse};

use super::NotificationService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{Reply, current_user, internal, reject};

pub async fn delete_notification(
    service: &NotificationService,
    request: &HttpRequest,
    notification_id: i64,
) -> Reply {
    let user = current_user(request)?;
    let storage = service.get_storage(request);

    let deleted = storage
        .delete_notification(notification_id, user.id)
        .await
        .map_err(internal("Failed to delete notification"))?;
    if !deleted {
        return Err(reject(
            StatusCode::NOT_FOUND,
            ErrorCode::NotificationNotFound,
            "Notification not found",
        ));
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Notification deleted")))
}
