use std::collections::HashMap;

use actix_web::{HttpRequest, HttpResponse};

use super::MessageService;
use crate::models::{
    ApiResponse,
    messages::{
        entities::Message,
        requests::{Mailbox, MessageListParams, MessageListQuery},
        responses::{MessageListResponse, MessageView, UnreadMessageCountResponse},
    },
    users::entities::User,
};
use crate::services::{Reply, current_user, internal};
use crate::storage::Storage;

/// 为消息补上双方的用户摘要
pub(super) async fn with_participants(
    storage: &dyn Storage,
    messages: Vec<Message>,
) -> Result<Vec<MessageView>, HttpResponse> {
    let mut ids: Vec<i64> = messages
        .iter()
        .flat_map(|m| [m.sender_id, m.recipient_id])
        .collect();
    ids.sort_unstable();
    ids.dedup();

    let users: HashMap<i64, User> = storage
        .get_users_by_ids(&ids)
        .await
        .map_err(internal("Failed to load message participants"))?
        .into_iter()
        .map(|u| (u.id, u))
        .collect();

    Ok(messages
        .into_iter()
        .map(|message| MessageView {
            sender: users.get(&message.sender_id).map(User::summary),
            recipient: users.get(&message.recipient_id).map(User::summary),
            message,
        })
        .collect())
}

pub async fn list_messages(
    service: &MessageService,
    request: &HttpRequest,
    mailbox: Mailbox,
    query: MessageListParams,
) -> Reply {
    let user = current_user(request)?;
    let storage = service.get_storage(request);

    let page = storage
        .list_messages_with_pagination(MessageListQuery {
            page: Some(query.pagination.page),
            size: Some(query.pagination.size),
            user_id: user.id,
            mailbox,
            unread_only: query.unread_only,
        })
        .await
        .map_err(internal("Failed to list messages"))?;

    let items = with_participants(storage.as_ref(), page.items).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        MessageListResponse {
            items,
            pagination: page.pagination,
        },
        "Messages retrieved",
    )))
}

pub async fn unread_count(service: &MessageService, request: &HttpRequest) -> Reply {
    let user = current_user(request)?;
    let storage = service.get_storage(request);

    let unread_count = storage
        .count_unread_messages(user.id)
        .await
        .map_err(internal("Failed to count unread messages"))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        UnreadMessageCountResponse { unread_count },
        "Unread count retrieved",
    )))
}
