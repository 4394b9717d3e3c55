use actix_web::{HttpRequest, HttpResponse};

use super::NotificationService;
use crate::models::{
    ApiResponse,
    notifications::requests::{NotificationListParams, NotificationListQuery},
};
use crate::services::{Reply, current_user, internal};

pub async fn list_notifications(
    service: &NotificationService,
    request: &HttpRequest,
    query: NotificationListParams,
) -> Reply {
    let user = current_user(request)?;
    let storage = service.get_storage(request);

    let list_query = NotificationListQuery {
        page: Some(query.pagination.page),
        size: Some(query.pagination.size),
        user_id: user.id,
        unread_only: query.unread_only,
    };
    let response = storage
        .list_notifications_with_pagination(list_query)
        .await
        .map_err(internal("Failed to list notifications"))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(response, "Notifications retrieved")))
}
