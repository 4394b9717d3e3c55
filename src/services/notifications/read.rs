use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse};

use super::NotificationService;
use crate::models::{ApiResponse, ErrorCode, notifications::responses::MarkAllReadResponse};
use crate::services::{Reply, current_user, internal, reject};

pub async fn mark_as_read(
    service: &NotificationService,
    request: &HttpRequest,
    notification_id: i64,
) -> Reply {
    let user = current_user(request)?;
    let storage = service.get_storage(request);

    // 只能标记自己的通知
    let updated = storage
        .mark_notification_read(notification_id, user.id)
        .await
        .map_err(internal("Failed to mark notification as read"))?;
    if !updated {
        return Err(reject(
            StatusCode::NOT_FOUND,
            ErrorCode::NotificationNotFound,
            "Notification not found",
        ));
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Notification marked as read")))
}

pub async fn mark_all_as_read(service: &NotificationService, request: &HttpRequest) -> Reply {
    let user = current_user(request)?;
    let storage = service.get_storage(request);

    let marked_count = storage
        .mark_all_notifications_read(user.id)
        .await
        .map_err(internal("Failed to mark all notifications as read"))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        MarkAllReadResponse { marked_count },
        "All notifications marked as read",
    )))
}
