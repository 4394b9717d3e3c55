pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{declare_service, finish};
use crate::models::notes::requests::{CreateNoteRequest, NoteListParams, UpdateNoteRequest};

declare_service!(NoteService);

const NOTE_TITLE_MAX: usize = 200;

impl NoteService {
    pub async fn list_notes(
        &self,
        request: &HttpRequest,
        class_id: i64,
        query: NoteListParams,
    ) -> ActixResult<HttpResponse> {
        finish(list::list_notes(self, request, class_id, query).await)
    }

    // 新建即发布
    pub async fn create_note(
        &self,
        request: &HttpRequest,
        class_id: i64,
        note: CreateNoteRequest,
    ) -> ActixResult<HttpResponse> {
        finish(create::create_note(self, request, class_id, note).await)
    }

    pub async fn get_note(&self, request: &HttpRequest, note_id: i64) -> ActixResult<HttpResponse> {
        finish(get::get_note(self, request, note_id).await)
    }

    pub async fn update_note(
        &self,
        request: &HttpRequest,
        note_id: i64,
        update: UpdateNoteRequest,
    ) -> ActixResult<HttpResponse> {
        finish(update::update_note(self, request, note_id, update).await)
    }

    pub async fn delete_note(
        &self,
        request: &HttpRequest,
        note_id: i64,
    ) -> ActixResult<HttpResponse> {
        finish(delete::delete_note(self, request, note_id).await)
    }
}
