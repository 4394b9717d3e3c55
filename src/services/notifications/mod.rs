pub mod counts;
pub mod delete;
pub mod list;
pub(crate) mod publish;
pub mod read;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{declare_service, finish};
use crate::models::notifications::requests::NotificationListParams;

declare_service!(NotificationService);

impl NotificationService {
    pub async fn list_notifications(
        &self,
        request: &HttpRequest,
        query: NotificationListParams,
    ) -> ActixResult<HttpResponse> {
        finish(list::list_notifications(self, request, query).await)
    }

    // 角标计数（前端轮询）
    pub async fn get_counts(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        finish(counts::get_counts(self, request).await)
    }

    pub async fn mark_as_read(
        &self,
        request: &HttpRequest,
        notification_id: i64,
    ) -> ActixResult<HttpResponse> {
        finish(read::mark_as_read(self, request, notification_id).await)
    }

    pub async fn mark_all_as_read(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        finish(read::mark_all_as_read(self, request).await)
    }

    pub async fn delete_notification(
        &self,
        request: &HttpRequest,
        notification_id: i64,
    ) -> ActixResult<HttpResponse> {
        finish(delete::delete_notification(self, request, notification_id).await)
    }
}
