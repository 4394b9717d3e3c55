use actix_web::{HttpRequest, HttpResponse};

use super::{PracticeService, load_visible_question};
use crate::models::{
    ApiResponse,
    practice::{requests::CheckAnswerRequest, responses::CheckAnswerResponse},
};
use crate::services::{Reply, current_user};

/// 练习题即时判分，返回标准答案与解析
pub async fn check_answer(
    service: &PracticeService,
    request: &HttpRequest,
    question_id: i64,
    answer: CheckAnswerRequest,
) -> Reply {
    let user = current_user(request)?;
    let storage = service.get_storage(request);

    let question = load_visible_question(storage.as_ref(), &user, question_id).await?;

    let response = CheckAnswerResponse {
        correct: question.body.is_correct(&answer.answer),
        expected: question.body.expected_answer(),
        explanation: question.explanation,
    };
    Ok(HttpResponse::Ok().json(ApiResponse::success(response, "Answer checked")))
}
