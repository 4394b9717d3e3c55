use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::messages::requests::{Mailbox, MessageListParams, SendMessageRequest};
use crate::services::MessageService;
use crate::utils::SafeIDI64;

static MESSAGE_SERVICE: Lazy<MessageService> = Lazy::new(MessageService::new_lazy);

pub async fn inbox(
    req: HttpRequest,
    query: web::Query<MessageListParams>,
) -> ActixResult<HttpResponse> {
    MESSAGE_SERVICE
        .list_messages(&req, Mailbox::Inbox, query.into_inner())
        .await
}

pub async fn sent(
    req: HttpRequest,
    query: web::Query<MessageListParams>,
) -> ActixResult<HttpResponse> {
    MESSAGE_SERVICE
        .list_messages(&req, Mailbox::Sent, query.into_inner())
        .await
}

pub async fn unread_count(req: HttpRequest) -> ActixResult<HttpResponse> {
    MESSAGE_SERVICE.unread_count(&req).await
}

pub async fn send_message(
    req: HttpRequest,
    message: web::Json<SendMessageRequest>,
) -> ActixResult<HttpResponse> {
    MESSAGE_SERVICE.send_message(&req, message.into_inner()).await
}

pub async fn get_message(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    MESSAGE_SERVICE.get_message(&req, id.0).await
}

pub async fn delete_message(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    MESSAGE_SERVICE.delete_message(&req, id.0).await
}

pub fn configure_messages_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/messages")
            .wrap(middlewares::RequireJWT)
            .route("", web::post().to(send_message))
            .route("/inbox", web::get().to(inbox))
            .route("/sent", web::get().to(sent))
            .route("/unread-count", web::get().to(unread_count))
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_message))
                    .route(web::delete().to(delete_message)),
            ),
    );
}
