use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse};

use super::grading::{prepare_questions, validate_settings};
use super::{QUIZ_TITLE_MAX, QuizService, announce, invalid_quiz, load_quiz, require_manager};
use crate::models::{ApiResponse, ErrorCode, quizzes::requests::UpdateQuizRequest};
use crate::services::{Reply, current_user, get_mailer, internal, reject};
use crate::utils::validate::validate_required_text;

pub async fn update_quiz(
    service: &QuizService,
    request: &HttpRequest,
    quiz_id: i64,
    update: UpdateQuizRequest,
) -> Reply {
    let user = current_user(request)?;
    let storage = service.get_storage(request);

    let (before, class, access) = load_quiz(storage.as_ref(), &user, quiz_id).await?;
    require_manager(&access)?;

    if let Some(title) = &update.title {
        validate_required_text("Title", title, QUIZ_TITLE_MAX)
            .map_err(|msg| reject(StatusCode::BAD_REQUEST, ErrorCode::BadRequest, msg))?;
    }
    // 合并后整体校验
    validate_settings(
        update.time_limit_minutes.unwrap_or(before.time_limit_minutes),
        update.max_attempts.unwrap_or(before.max_attempts),
        update.available_from.unwrap_or(before.available_from),
        update.available_until.unwrap_or(before.available_until),
    )
    .map_err(invalid_quiz)?;

    let questions = match update.questions {
        Some(questions) => Some(prepare_questions(questions).map_err(invalid_quiz)?),
        None => None,
    };
    let update = UpdateQuizRequest {
        title: update.title.map(|t| t.trim().to_string()),
        questions,
        ..update
    };

    let updated = storage
        .update_quiz(quiz_id, update)
        .await
        .map_err(internal("Failed to update quiz"))?
        .ok_or_else(|| reject(StatusCode::NOT_FOUND, ErrorCode::QuizNotFound, "Quiz not found"))?;

    if !before.published && updated.published {
        announce(storage.as_ref(), get_mailer(request), &class, &updated).await;
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success(updated, "Quiz updated")))
}
