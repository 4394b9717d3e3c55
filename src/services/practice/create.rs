use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse};

use super::{PracticeService, validate_topic};
use crate::models::{
    ApiResponse, ErrorCode, practice::requests::CreatePracticeQuestionRequest,
    users::entities::UserRole,
};
use crate::services::access::load_class_access;
use crate::services::{Reply, current_user, internal, reject};

/// 管理员可创建全局题目；教授为自己任教的班级创建
pub async fn create_question(
    service: &PracticeService,
    request: &HttpRequest,
    question: CreatePracticeQuestionRequest,
) -> Reply {
    let user = current_user(request)?;
    let storage = service.get_storage(request);

    match (user.role, question.class_id) {
        (UserRole::Admin, _) => {}
        (UserRole::Professor, Some(class_id)) => {
            let (_, access) = load_class_access(storage.as_ref(), &user, class_id).await?;
            if !access.can_manage_content() {
                return Err(reject(
                    StatusCode::FORBIDDEN,
                    ErrorCode::ClassPermissionDenied,
                    "You do not teach this class",
                ));
            }
        }
        (UserRole::Professor, None) => {
            return Err(reject(
                StatusCode::FORBIDDEN,
                ErrorCode::Forbidden,
                "Only admins can add questions to the global bank",
            ));
        }
        (UserRole::Student, _) => {
            return Err(reject(
                StatusCode::FORBIDDEN,
                ErrorCode::Forbidden,
                "Students cannot create practice questions",
            ));
        }
    }

    validate_topic(&question.topic)?;
    if question.prompt.trim().is_empty() {
        return Err(reject(
            StatusCode::BAD_REQUEST,
            ErrorCode::BadRequest,
            "Prompt must not be empty",
        ));
    }
    question
        .body
        .validate()
        .map_err(|msg| reject(StatusCode::BAD_REQUEST, ErrorCode::QuizInvalid, msg))?;

    let question = CreatePracticeQuestionRequest {
        topic: question.topic.trim().to_string(),
        ..question
    };
    let created = storage
        .create_practice_question(user.id, question)
        .await
        .map_err(internal("Failed to create practice question"))?;

    Ok(HttpResponse::Created().json(ApiResponse::success(created, "Practice question created")))
}
