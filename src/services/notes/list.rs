use actix_web::{HttpRequest, HttpResponse};

use super::NoteService;
use crate::models::{
    ApiResponse,
    notes::requests::{NoteListParams, NoteListQuery},
};
use crate::services::access::load_class_access;
use crate::services::{Reply, current_user, internal};

/// 置顶优先，其次按创建时间倒序
pub async fn list_notes(
    service: &NoteService,
    request: &HttpRequest,
    class_id: i64,
    query: NoteListParams,
) -> Reply {
    let user = current_user(request)?;
    let storage = service.get_storage(request);

    load_class_access(storage.as_ref(), &user, class_id).await?;

    let response = storage
        .list_notes_with_pagination(NoteListQuery {
            page: Some(query.pagination.page),
            size: Some(query.pagination.size),
            class_id,
            search: query.search,
        })
        .await
        .map_err(internal("Failed to list notes"))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(response, "Notes retrieved successfully")))
}
