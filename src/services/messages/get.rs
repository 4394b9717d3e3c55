use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse};
use chrono::Utc;

use super::{MessageService, list::with_participants};
use crate::models::{ApiResponse, ErrorCode, messages::entities::Message, users::entities::User};
use crate::services::{Reply, current_user, internal, reject};
use crate::storage::Storage;

/// 已从自己一侧删除的消息视为不存在
pub(super) async fn load_visible(
    storage: &dyn Storage,
    user: &User,
    message_id: i64,
) -> Result<Message, HttpResponse> {
    storage
        .get_message_by_id(message_id)
        .await
        .map_err(internal("Failed to get message"))?
        .filter(|m| m.visible_to(user.id))
        .ok_or_else(|| reject(StatusCode::NOT_FOUND, ErrorCode::MessageNotFound, "Message not found"))
}

pub async fn get_message(service: &MessageService, request: &HttpRequest, message_id: i64) -> Reply {
    let user = current_user(request)?;
    let storage = service.get_storage(request);

    let mut message = load_visible(storage.as_ref(), &user, message_id).await?;

    // 收件人首次查看时标记已读
    if message.recipient_id == user.id && message.read_at.is_none() {
        storage
            .mark_message_read(message.id)
            .await
            .map_err(internal("Failed to mark message as read"))?;
        message.read_at = Some(Utc::now());
    }

    let view = with_participants(storage.as_ref(), vec![message])
        .await?
        .pop()
        .ok_or_else(|| reject(StatusCode::NOT_FOUND, ErrorCode::MessageNotFound, "Message not found"))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(view, "Message retrieved")))
}
