use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse};

use super::MessageService;
use crate::models::{
    ApiResponse, ErrorCode,
    messages::requests::SendMessageRequest,
    users::entities::{UserRole, UserStatus},
};
use crate::services::{Reply, current_user, internal, reject};
use crate::utils::validate::validate_required_text;

pub const SUBJECT_MAX: usize = 200;
pub const BODY_MAX: usize = 10_000;

/// 学生只能给同班的人（同学或该班教师）发消息，教师和管理员不受限
fn may_message(sender_role: UserRole, sender_classes: &[i64], recipient_classes: &[i64]) -> bool {
    if sender_role != UserRole::Student {
        return true;
    }
    sender_classes.iter().any(|id| recipient_classes.contains(id))
}

fn invalid_recipient(message: &str) -> HttpResponse {
    reject(StatusCode::BAD_REQUEST, ErrorCode::MessageRecipientInvalid, message)
}

pub async fn send_message(
    service: &MessageService,
    request: &HttpRequest,
    mut message: SendMessageRequest,
) -> Reply {
    let user = current_user(request)?;
    let storage = service.get_storage(request);

    message.subject = message.subject.trim().to_string();
    message.body = message.body.trim().to_string();
    if message.subject.chars().count() > SUBJECT_MAX {
        return Err(reject(
            StatusCode::BAD_REQUEST,
            ErrorCode::BadRequest,
            format!("subject must be at most {SUBJECT_MAX} characters"),
        ));
    }
    validate_required_text("body", &message.body, BODY_MAX)
        .map_err(|msg| reject(StatusCode::BAD_REQUEST, ErrorCode::BadRequest, msg))?;

    if message.recipient_id == user.id {
        return Err(invalid_recipient("Cannot send a message to yourself"));
    }
    let recipient = storage
        .get_user_by_id(message.recipient_id)
        .await
        .map_err(internal("Failed to get recipient"))?
        .filter(|u| u.status == UserStatus::Active)
        .ok_or_else(|| invalid_recipient("Recipient not found"))?;

    if user.role == UserRole::Student {
        let sender_classes = storage
            .list_user_class_ids(user.id)
            .await
            .map_err(internal("Failed to load classes"))?;
        let recipient_classes = storage
            .list_user_class_ids(recipient.id)
            .await
            .map_err(internal("Failed to load classes"))?;
        if !may_message(user.role, &sender_classes, &recipient_classes) {
            return Err(reject(
                StatusCode::FORBIDDEN,
                ErrorCode::MessageRecipientInvalid,
                "You can only message members of your classes",
            ));
        }
    }

    let created = storage
        .create_message(user.id, message)
        .await
        .map_err(internal("Failed to send message"))?;

    tracing::info!("User {} sent message {} to {}", user.id, created.id, recipient.id);
    Ok(HttpResponse::Created().json(ApiResponse::success(created, "Message sent")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_student_needs_shared_class() {
        assert!(may_message(UserRole::Student, &[1, 2], &[2, 9]));
        assert!(!may_message(UserRole::Student, &[1, 2], &[3]));
        assert!(!may_message(UserRole::Student, &[], &[]));
    }

    #[test]
    fn test_staff_may_message_anyone() {
        assert!(may_message(UserRole::Professor, &[], &[5]));
        assert!(may_message(UserRole::Admin, &[], &[]));
    }
}
