use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::notifications::requests::NotificationListParams;
use crate::services::NotificationService;
use crate::utils::SafeIDI64;

static NOTIFICATION_SERVICE: Lazy<NotificationService> = Lazy::new(NotificationService::new_lazy);

pub async fn list_notifications(
    req: HttpRequest,
    query: web::Query<NotificationListParams>,
) -> ActixResult<HttpResponse> {
    NOTIFICATION_SERVICE
        .list_notifications(&req, query.into_inner())
        .await
}

pub async fn get_counts(req: HttpRequest) -> ActixResult<HttpResponse> {
    NOTIFICATION_SERVICE.get_counts(&req).await
}

pub async fn mark_as_read(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    NOTIFICATION_SERVICE.mark_as_read(&req, id.0).await
}

pub async fn mark_all_as_read(req: HttpRequest) -> ActixResult<HttpResponse> {
    NOTIFICATION_SERVICE.mark_all_as_read(&req).await
}

pub async fn delete_notification(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    NOTIFICATION_SERVICE.delete_notification(&req, id.0).await
}

pub fn configure_notifications_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/notifications")
            .wrap(middlewares::RequireJWT)
            .route("", web::get().to(list_notifications))
            // 前端每 30 秒轮询
            .route("/counts", web::get().to(get_counts))
            .route("/read-all", web::put().to(mark_all_as_read))
            .route("/{id}/read", web::put().to(mark_as_read))
            .route("/{id}", web::delete().to(delete_notification)),
    );
}
