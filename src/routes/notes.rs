use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::notes::requests::{CreateNoteRequest, NoteListParams, UpdateNoteRequest};
use crate::services::NoteService;
use crate::utils::{SafeClassIdI64, SafeIDI64};

static NOTE_SERVICE: Lazy<NoteService> = Lazy::new(NoteService::new_lazy);

pub async fn list_notes(
    req: HttpRequest,
    class_id: SafeClassIdI64,
    query: web::Query<NoteListParams>,
) -> ActixResult<HttpResponse> {
    NOTE_SERVICE.list_notes(&req, class_id.0, query.into_inner()).await
}

pub async fn create_note(
    req: HttpRequest,
    class_id: SafeClassIdI64,
    note: web::Json<CreateNoteRequest>,
) -> ActixResult<HttpResponse> {
    NOTE_SERVICE.create_note(&req, class_id.0, note.into_inner()).await
}

pub async fn get_note(req: HttpRequest, note_id: SafeIDI64) -> ActixResult<HttpResponse> {
    NOTE_SERVICE.get_note(&req, note_id.0).await
}

pub async fn update_note(
    req: HttpRequest,
    note_id: SafeIDI64,
    update: web::Json<UpdateNoteRequest>,
) -> ActixResult<HttpResponse> {
    NOTE_SERVICE.update_note(&req, note_id.0, update.into_inner()).await
}

pub async fn delete_note(req: HttpRequest, note_id: SafeIDI64) -> ActixResult<HttpResponse> {
    NOTE_SERVICE.delete_note(&req, note_id.0).await
}

/// 挂在 `/api/v1/classes` 下
pub fn configure_class_scoped(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/{class_id}/notes")
            .route(web::get().to(list_notes))
            .route(web::post().to(create_note)),
    );
}

pub fn configure_notes_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/notes")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_note))
                    .route(web::put().to(update_note))
                    .route(web::delete().to(delete_note)),
            ),
    );
}
