pub mod delete;
pub mod get;
pub mod list;
pub mod send;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{declare_service, finish};
use crate::models::messages::requests::{Mailbox, MessageListParams, SendMessageRequest};

declare_service!(MessageService);

impl MessageService {
    pub async fn list_messages(
        &self,
        request: &HttpRequest,
        mailbox: Mailbox,
        query: MessageListParams,
    ) -> ActixResult<HttpResponse> {
        finish(list::list_messages(self, request, mailbox, query).await)
    }

    pub async fn unread_count(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        finish(list::unread_count(self, request).await)
    }

    pub async fn get_message(
        &self,
        request: &HttpRequest,
        message_id: i64,
    ) -> ActixResult<HttpResponse> {
        finish(get::get_message(self, request, message_id).await)
    }

    pub async fn send_message(
        &self,
        request: &HttpRequest,
        message: SendMessageRequest,
    ) -> ActixResult<HttpResponse> {
        finish(send::send_message(self, request, message).await)
    }

    pub async fn delete_message(
        &self,
        request: &HttpRequest,
        message_id: i64,
    ) -> ActixResult<HttpResponse> {
        finish(delete::delete_message(self, request, message_id).await)
    }
}
