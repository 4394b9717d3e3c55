use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse};

use super::{PracticeService, can_edit, visible_class_ids};
use crate::models::{
    ApiResponse, ErrorCode,
    practice::{
        entities::PracticeQuestion,
        requests::{PracticeListParams, PracticeListQuery, RandomPracticeParams},
        responses::{PracticeItem, PracticeListResponse, RandomPracticeResponse, TopicListResponse},
    },
};
use crate::services::{Reply, current_user, internal, reject};

const DEFAULT_RANDOM_COUNT: i64 = 10;
const MAX_RANDOM_COUNT: i64 = 50;

fn random_count(requested: Option<i64>) -> Result<usize, String> {
    match requested.unwrap_or(DEFAULT_RANDOM_COUNT) {
        n @ 1..=MAX_RANDOM_COUNT => Ok(n as usize),
        n => Err(format!("count must be between 1 and {MAX_RANDOM_COUNT}, got {n}")),
    }
}

fn check_class_filter(class_id: Option<i64>, visible: Option<&[i64]>) -> Result<(), HttpResponse> {
    match (class_id, visible) {
        (Some(id), Some(ids)) if !ids.contains(&id) => Err(reject(
            StatusCode::FORBIDDEN,
            ErrorCode::ClassPermissionDenied,
            "You are not a member of this class",
        )),
        _ => Ok(()),
    }
}

pub async fn list_questions(
    service: &PracticeService,
    request: &HttpRequest,
    query: PracticeListParams,
) -> Reply {
    let user = current_user(request)?;
    let storage = service.get_storage(request);

    let visible = visible_class_ids(storage.as_ref(), &user).await?;
    check_class_filter(query.class_id, visible.as_deref())?;

    let page = storage
        .list_practice_questions_with_pagination(PracticeListQuery {
            page: Some(query.pagination.page),
            size: Some(query.pagination.size),
            class_id: query.class_id,
            visible_class_ids: visible,
            topic: query.topic,
            difficulty: query.difficulty,
        })
        .await
        .map_err(internal("Failed to list practice questions"))?;

    let items = page
        .items
        .into_iter()
        .map(|q| {
            if can_edit(&user, &q) {
                PracticeItem::Full(q)
            } else {
                PracticeItem::Redacted(q.redacted())
            }
        })
        .collect();

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        PracticeListResponse {
            items,
            pagination: page.pagination,
        },
        "Practice questions retrieved successfully",
    )))
}

pub async fn random_questions(
    service: &PracticeService,
    request: &HttpRequest,
    query: RandomPracticeParams,
) -> Reply {
    let user = current_user(request)?;
    let storage = service.get_storage(request);

    let count = random_count(query.count)
        .map_err(|msg| reject(StatusCode::BAD_REQUEST, ErrorCode::BadRequest, msg))?;
    let visible = visible_class_ids(storage.as_ref(), &user).await?;
    check_class_filter(query.class_id, visible.as_deref())?;

    let questions = storage
        .random_practice_questions(
            PracticeListQuery {
                class_id: query.class_id,
                visible_class_ids: visible,
                topic: query.topic,
                difficulty: query.difficulty,
                ..Default::default()
            },
            count,
        )
        .await
        .map_err(internal("Failed to draw practice questions"))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        RandomPracticeResponse {
            items: questions.iter().map(PracticeQuestion::redacted).collect(),
        },
        "Practice questions drawn",
    )))
}

pub async fn list_topics(service: &PracticeService, request: &HttpRequest) -> Reply {
    let user = current_user(request)?;
    let storage = service.get_storage(request);

    let visible = visible_class_ids(storage.as_ref(), &user).await?;
    let topics = storage
        .list_practice_topics(visible)
        .await
        .map_err(internal("Failed to list topics"))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        TopicListResponse { topics },
        "Topics retrieved successfully",
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_count_bounds() {
        assert_eq!(random_count(None), Ok(10));
        assert_eq!(random_count(Some(50)), Ok(50));
        assert!(random_count(Some(0)).is_err());
        assert!(random_count(Some(51)).is_err());
    }
}
