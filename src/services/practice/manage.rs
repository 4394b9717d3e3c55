use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse};

use super::{PracticeService, can_edit, load_visible_question, validate_topic};
use crate::models::{
    ApiResponse, ErrorCode,
    practice::{requests::UpdatePracticeQuestionRequest, responses::PracticeItem},
};
use crate::services::{Reply, current_user, internal, reject};

fn not_author() -> actix_web::HttpResponse {
    reject(
        StatusCode::FORBIDDEN,
        ErrorCode::Forbidden,
        "Only the author or an admin can change this question",
    )
}

pub async fn get_question(
    service: &PracticeService,
    request: &HttpRequest,
    question_id: i64,
) -> Reply {
    let user = current_user(request)?;
    let storage = service.get_storage(request);

    let question = load_visible_question(storage.as_ref(), &user, question_id).await?;
    let item = if can_edit(&user, &question) {
        PracticeItem::Full(question)
    } else {
        PracticeItem::Redacted(question.redacted())
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(item, "Practice question retrieved")))
}

pub async fn update_question(
    service: &PracticeService,
    request: &HttpRequest,
    question_id: i64,
    update: UpdatePracticeQuestionRequest,
) -> Reply {
    let user = current_user(request)?;
    let storage = service.get_storage(request);

    let question = load_visible_question(storage.as_ref(), &user, question_id).await?;
    if !can_edit(&user, &question) {
        return Err(not_author());
    }
    if let Some(topic) = &update.topic {
        validate_topic(topic)?;
    }
    if update.prompt.as_ref().is_some_and(|p| p.trim().is_empty()) {
        return Err(reject(
            StatusCode::BAD_REQUEST,
            ErrorCode::BadRequest,
            "Prompt must not be empty",
        ));
    }
    if let Some(body) = &update.body {
        body.validate()
            .map_err(|msg| reject(StatusCode::BAD_REQUEST, ErrorCode::QuizInvalid, msg))?;
    }

    let update = UpdatePracticeQuestionRequest {
        topic: update.topic.map(|t| t.trim().to_string()),
        ..update
    };
    let updated = storage
        .update_practice_question(question_id, update)
        .await
        .map_err(internal("Failed to update practice question"))?
        .ok_or_else(|| {
            reject(
                StatusCode::NOT_FOUND,
                ErrorCode::PracticeQuestionNotFound,
                "Practice question not found",
            )
        })?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(updated, "Practice question updated")))
}

pub async fn delete_question(
    service: &PracticeService,
    request: &HttpRequest,
    question_id: i64,
) -> Reply {
    let user = current_user(request)?;
    let storage = service.get_storage(request);

    let question = load_visible_question(storage.as_ref(), &user, question_id).await?;
    if !can_edit(&user, &question) {
        return Err(not_author());
    }

    storage
        .delete_practice_question(question_id)
        .await
        .map_err(internal("Failed to delete practice question"))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Practice question deleted")))
}
