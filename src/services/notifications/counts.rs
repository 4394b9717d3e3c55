use actix_web::{HttpRequest, HttpResponse};
use chrono::Utc;

use super::NotificationService;
use crate::models::{
    ApiResponse, notifications::responses::NotificationCountsResponse,
    users::entities::UserRole,
};
use crate::services::{Reply, current_user, internal};

pub async fn get_counts(service: &NotificationService, request: &HttpRequest) -> Reply {
    let user = current_user(request)?;
    let storage = service.get_storage(request);

    let unread_notifications = storage
        .count_unread_notifications(user.id)
        .await
        .map_err(internal("Failed to count unread notifications"))?;
    let unread_messages = storage
        .count_unread_messages(user.id)
        .await
        .map_err(internal("Failed to count unread messages"))?;
    // 只有学生有待完成作业
    let pending_assignments = if user.role == UserRole::Student {
        storage
            .count_pending_assignments(user.id, Utc::now())
            .await
            .map_err(internal("Failed to count pending assignments"))?
    } else {
        0
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        NotificationCountsResponse {
            unread_notifications,
            unread_messages,
            pending_assignments,
        },
        "Counts retrieved",
    )))
}
