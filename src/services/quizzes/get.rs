use actix_web::{HttpRequest, HttpResponse};

use super::{QuizService, load_quiz};
use crate::models::{
    ApiResponse,
    quizzes::{
        entities::QuizQuestion,
        responses::{QuestionSet, QuizDetailResponse},
    },
};
use crate::services::{Reply, current_user, internal};

/// 教师拿到含答案的题目；学生只拿到题面
pub async fn get_quiz(service: &QuizService, request: &HttpRequest, quiz_id: i64) -> Reply {
    let user = current_user(request)?;
    let storage = service.get_storage(request);

    let (quiz, _, access) = load_quiz(storage.as_ref(), &user, quiz_id).await?;

    let (questions, attempts_used) = if access.can_manage_content() {
        (QuestionSet::Full(quiz.questions.clone()), None)
    } else {
        let used = storage
            .count_attempts(quiz.id, user.id)
            .await
            .map_err(internal("Failed to count attempts"))?;
        (
            QuestionSet::Redacted(quiz.questions.iter().map(QuizQuestion::redacted).collect()),
            Some(used),
        )
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        QuizDetailResponse {
            quiz: quiz.summary(),
            questions,
            attempts_used,
        },
        "Quiz retrieved successfully",
    )))
}
