use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse};

use super::NoteService;
use crate::models::notes::entities::Note;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access::{ClassAccess, load_class_access};
use crate::services::{Reply, current_user, internal, reject};
use crate::storage::Storage;
use crate::models::users::entities::User;

/// 加载笔记及当前用户在其班级中的访问级别
pub(super) async fn load_note(
    storage: &dyn Storage,
    user: &User,
    note_id: i64,
) -> Result<(Note, ClassAccess), HttpResponse> {
    let note = storage
        .get_note_by_id(note_id)
        .await
        .map_err(internal("Failed to get note"))?
        .ok_or_else(|| reject(StatusCode::NOT_FOUND, ErrorCode::NoteNotFound, "Note not found"))?;
    let (_, access) = load_class_access(storage, user, note.class_id).await?;
    Ok((note, access))
}

pub async fn get_note(service: &NoteService, request: &HttpRequest, note_id: i64) -> Reply {
    let user = current_user(request)?;
    let storage = service.get_storage(request);

    let (note, _) = load_note(storage.as_ref(), &user, note_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(note, "Note retrieved successfully")))
}
