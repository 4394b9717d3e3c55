use actix_web::{HttpRequest, HttpResponse};

use super::{QuizService, load_quiz, require_manager};
use crate::models::ApiResponse;
use crate::services::{Reply, current_user, internal};

pub async fn delete_quiz(service: &QuizService, request: &HttpRequest, quiz_id: i64) -> Reply {
    let user = current_user(request)?;
    let storage = service.get_storage(request);

    let (_, _, access) = load_quiz(storage.as_ref(), &user, quiz_id).await?;
    require_manager(&access)?;

    storage
        .delete_quiz(quiz_id)
        .await
        .map_err(internal("Failed to delete quiz"))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Quiz deleted")))
}
