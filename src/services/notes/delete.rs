use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse};

use super::NoteService;
use super::get::load_note;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{Reply, current_user, internal, reject};

pub async fn delete_note(service: &NoteService, request: &HttpRequest, note_id: i64) -> Reply {
    let user = current_user(request)?;
    let storage = service.get_storage(request);

    let (_, access) = load_note(storage.as_ref(), &user, note_id).await?;
    if !access.can_manage_content() {
        return Err(reject(
            StatusCode::FORBIDDEN,
            ErrorCode::ClassPermissionDenied,
            "Only professors and assistants of this class can delete notes",
        ));
    }

    storage
        .delete_note(note_id)
        .await
        .map_err(internal("Failed to delete note"))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Note deleted")))
}
