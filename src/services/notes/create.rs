use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse};

use super::{NOTE_TITLE_MAX, NoteService};
use crate::config::AppConfig;
use crate::mail::EmailTemplate;
use crate::models::{
    ApiResponse, ErrorCode,
    notes::requests::CreateNoteRequest,
    notifications::{
        entities::{NotificationType, ReferenceType},
        requests::NewNotification,
    },
};
use crate::services::access::{ensure_not_archived, require_content_manager};
use crate::services::notifications::publish::notify_class_students;
use crate::services::{Reply, current_user, get_mailer, internal, reject};
use crate::utils::validate::validate_required_text;

pub async fn create_note(
    service: &NoteService,
    request: &HttpRequest,
    class_id: i64,
    note: CreateNoteRequest,
) -> Reply {
    let user = current_user(request)?;
    let storage = service.get_storage(request);

    let (class, _) = require_content_manager(storage.as_ref(), &user, class_id).await?;
    ensure_not_archived(&class)?;
    validate_required_text("Title", &note.title, NOTE_TITLE_MAX)
        .map_err(|msg| reject(StatusCode::BAD_REQUEST, ErrorCode::BadRequest, msg))?;

    let note = CreateNoteRequest {
        title: note.title.trim().to_string(),
        ..note
    };
    let created = storage
        .create_note(class_id, user.id, note)
        .await
        .map_err(internal("Failed to create note"))?;

    notify_class_students(
        storage.as_ref(),
        get_mailer(request),
        class_id,
        NewNotification {
            notification_type: NotificationType::NotePublished,
            title: created.title.clone(),
            content: Some(format!("New note in {}", class.name)),
            reference_type: Some(ReferenceType::Note),
            reference_id: Some(created.id),
        },
        Some(EmailTemplate::NotePublished {
            class_name: class.name.clone(),
            title: created.title.clone(),
            link: AppConfig::get().public_link(&format!("classes/{}/notes/{}", class_id, created.id)),
        }),
    )
    .await;

    Ok(HttpResponse::Created().json(ApiResponse::success(created, "Note published")))
}
