use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse};

use super::get::load_note;
use super::{NOTE_TITLE_MAX, NoteService};
use crate::models::{ApiResponse, ErrorCode, notes::requests::UpdateNoteRequest};
use crate::services::{Reply, current_user, internal, reject};
use crate::utils::validate::validate_required_text;

pub async fn update_note(
    service: &NoteService,
    request: &HttpRequest,
    note_id: i64,
    update: UpdateNoteRequest,
) -> Reply {
    let user = current_user(request)?;
    let storage = service.get_storage(request);

    let (_, access) = load_note(storage.as_ref(), &user, note_id).await?;
    if !access.can_manage_content() {
        return Err(reject(
            StatusCode::FORBIDDEN,
            ErrorCode::ClassPermissionDenied,
            "Only professors and assistants of this class can edit notes",
        ));
    }
    if let Some(title) = &update.title {
        validate_required_text("Title", title, NOTE_TITLE_MAX)
            .map_err(|msg| reject(StatusCode::BAD_REQUEST, ErrorCode::BadRequest, msg))?;
    }

    let update = UpdateNoteRequest {
        title: update.title.map(|t| t.trim().to_string()),
        ..update
    };
    let note = storage
        .update_note(note_id, update)
        .await
        .map_err(internal("Failed to update note"))?
        .ok_or_else(|| reject(StatusCode::NOT_FOUND, ErrorCode::NoteNotFound, "Note not found"))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(note, "Note updated")))
}
