use actix_web::{HttpRequest, HttpResponse};

use super::QuizService;
use crate::models::{
    ApiResponse,
    quizzes::{
        entities::Quiz,
        requests::{QuizListParams, QuizListQuery},
        responses::QuizListResponse,
    },
};
use crate::services::access::load_class_access;
use crate::services::{Reply, current_user, internal};

pub async fn list_quizzes(
    service: &QuizService,
    request: &HttpRequest,
    class_id: i64,
    query: QuizListParams,
) -> Reply {
    let user = current_user(request)?;
    let storage = service.get_storage(request);

    let (_, access) = load_class_access(storage.as_ref(), &user, class_id).await?;

    let page = storage
        .list_quizzes_with_pagination(QuizListQuery {
            page: Some(query.pagination.page),
            size: Some(query.pagination.size),
            class_id,
            search: query.search,
            published_only: !access.can_manage_content(),
        })
        .await
        .map_err(internal("Failed to list quizzes"))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        QuizListResponse {
            items: page.items.iter().map(Quiz::summary).collect(),
            pagination: page.pagination,
        },
        "Quizzes retrieved successfully",
    )))
}
