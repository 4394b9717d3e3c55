use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse};

use super::{ContactService, manage::not_found};
use crate::mail::{EmailTemplate, OutgoingEmail};
use crate::models::{ApiResponse, ErrorCode, contact::requests::ReplyContactRequest};
use crate::services::system::DynamicConfig;
use crate::services::{Reply, current_user, get_mailer, internal, reject};
use crate::utils::validate::validate_required_text;

pub const REPLY_MAX: usize = 10_000;

/// 回复邮件同步发送，发送失败时不记录回复
pub async fn reply_contact(
    service: &ContactService,
    request: &HttpRequest,
    id: i64,
    reply: ReplyContactRequest,
) -> Reply {
    let user = current_user(request)?;
    let storage = service.get_storage(request);

    let text = reply.reply.trim().to_string();
    validate_required_text("reply", &text, REPLY_MAX)
        .map_err(|msg| reject(StatusCode::BAD_REQUEST, ErrorCode::BadRequest, msg))?;

    let contact = storage
        .get_contact_message_by_id(id)
        .await
        .map_err(internal("Failed to get contact message"))?
        .ok_or_else(not_found)?;

    let subject = if contact.subject.is_empty() {
        "Your message".to_string()
    } else {
        contact.subject.clone()
    };
    let template = EmailTemplate::ContactReply {
        name: contact.name.clone(),
        subject,
        original_message: contact.message.clone(),
        reply: text.clone(),
    };
    let system_name = DynamicConfig::system_name().await;
    let rendered = template.render(&system_name).map_err(internal("Failed to render email"))?;

    let mut email = OutgoingEmail::from_rendered(contact.email.clone(), rendered);
    email.to_name = Some(contact.name.clone());
    if let Err(e) = get_mailer(request).send(email).await {
        tracing::error!("Failed to send contact reply to {}: {e}", contact.email);
        return Err(reject(
            StatusCode::BAD_GATEWAY,
            ErrorCode::MailDeliveryFailed,
            format!("Failed to send reply email: {}", e.message()),
        ));
    }

    let updated = storage
        .reply_contact_message(contact.id, &text, user.id)
        .await
        .map_err(internal("Failed to save contact reply"))?
        .ok_or_else(not_found)?;

    tracing::info!("Contact message {} replied by {}", updated.id, user.id);
    Ok(HttpResponse::Ok().json(ApiResponse::success(updated, "Reply sent")))
}
