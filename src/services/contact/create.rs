use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse};

use super::ContactService;
use crate::models::{ApiResponse, ErrorCode, contact::requests::CreateContactRequest};
use crate::services::{Reply, client_ip, internal, reject};
use crate::utils::validate::{normalize_email, validate_email, validate_required_text};

pub const NAME_MAX: usize = 100;
pub const SUBJECT_MAX: usize = 200;
pub const MESSAGE_MAX: usize = 5_000;

/// 清理并校验表单字段
fn sanitize(mut contact: CreateContactRequest) -> Result<CreateContactRequest, String> {
    contact.name = contact.name.trim().to_string();
    contact.subject = contact.subject.trim().to_string();
    contact.message = contact.message.trim().to_string();
    contact.email = normalize_email(&contact.email);

    validate_required_text("name", &contact.name, NAME_MAX)?;
    validate_email(&contact.email).map_err(str::to_string)?;
    if contact.subject.chars().count() > SUBJECT_MAX {
        return Err(format!("subject must be at most {SUBJECT_MAX} characters"));
    }
    validate_required_text("message", &contact.message, MESSAGE_MAX)?;
    Ok(contact)
}

pub async fn create_contact(
    service: &ContactService,
    request: &HttpRequest,
    contact: CreateContactRequest,
) -> Reply {
    let storage = service.get_storage(request);

    let contact =
        sanitize(contact).map_err(|msg| reject(StatusCode::BAD_REQUEST, ErrorCode::BadRequest, msg))?;

    let created = storage
        .create_contact_message(contact)
        .await
        .map_err(internal("Failed to save contact message"))?;

    tracing::info!(
        "Contact message {} received from {}",
        created.id,
        client_ip(request).unwrap_or_else(|| "unknown".to_string())
    );
    Ok(HttpResponse::Created().json(ApiResponse::success(
        created,
        "Thank you, your message has been received",
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(name: &str, email: &str, message: &str) -> CreateContactRequest {
        CreateContactRequest {
            name: name.to_string(),
            email: email.to_string(),
            subject: "  Hello ".to_string(),
            message: message.to_string(),
        }
    }

    #[test]
    fn test_sanitize_trims_and_normalizes() {
        let clean = sanitize(form(" Ann ", " Ann@Example.COM ", " hi ")).unwrap();
        assert_eq!(clean.name, "Ann");
        assert_eq!(clean.email, "ann@example.com");
        assert_eq!(clean.subject, "Hello");
        assert_eq!(clean.message, "hi");
    }

    #[test]
    fn test_sanitize_rejects_bad_fields() {
        assert!(sanitize(form("", "ann@example.com", "hi")).is_err());
        assert!(sanitize(form("Ann", "not-an-email", "hi")).is_err());
        assert!(sanitize(form("Ann", "ann@example.com", "   ")).is_err());
        assert!(sanitize(form("Ann", "ann@example.com", &"x".repeat(MESSAGE_MAX + 1))).is_err());
    }
}
