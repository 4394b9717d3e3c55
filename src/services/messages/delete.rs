use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse};

use super::{MessageService, get::load_visible};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{Reply, current_user, internal, reject};

pub async fn delete_message(
    service: &MessageService,
    request: &HttpRequest,
    message_id: i64,
) -> Reply {
    let user = current_user(request)?;
    let storage = service.get_storage(request);

    let message = load_visible(storage.as_ref(), &user, message_id).await?;
    let deleted = storage
        .delete_message_for(message.id, user.id)
        .await
        .map_err(internal("Failed to delete message"))?;
    if !deleted {
        return Err(reject(StatusCode::NOT_FOUND, ErrorCode::MessageNotFound, "Message not found"));
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Message deleted")))
}
