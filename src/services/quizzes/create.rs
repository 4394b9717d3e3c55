use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse};

use super::grading::{prepare_questions, validate_settings};
use super::{QUIZ_TITLE_MAX, QuizService, announce, invalid_quiz};
use crate::models::{ApiResponse, ErrorCode, quizzes::requests::CreateQuizRequest};
use crate::services::access::{ensure_not_archived, require_content_manager};
use crate::services::{Reply, current_user, get_mailer, internal, reject};
use crate::utils::validate::validate_required_text;

pub async fn create_quiz(
    service: &QuizService,
    request: &HttpRequest,
    class_id: i64,
    quiz: CreateQuizRequest,
) -> Reply {
    let user = current_user(request)?;
    let storage = service.get_storage(request);

    let (class, _) = require_content_manager(storage.as_ref(), &user, class_id).await?;
    ensure_not_archived(&class)?;
    validate_required_text("Title", &quiz.title, QUIZ_TITLE_MAX)
        .map_err(|msg| reject(StatusCode::BAD_REQUEST, ErrorCode::BadRequest, msg))?;
    validate_settings(
        quiz.time_limit_minutes,
        quiz.max_attempts,
        quiz.available_from,
        quiz.available_until,
    )
    .map_err(invalid_quiz)?;

    let quiz = CreateQuizRequest {
        title: quiz.title.trim().to_string(),
        questions: prepare_questions(quiz.questions).map_err(invalid_quiz)?,
        ..quiz
    };
    let created = storage
        .create_quiz(class_id, user.id, quiz)
        .await
        .map_err(internal("Failed to create quiz"))?;

    if created.published {
        announce(storage.as_ref(), get_mailer(request), &class, &created).await;
    }

    Ok(HttpResponse::Created().json(ApiResponse::success(created, "Quiz created")))
}
