use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse};

use super::UserService;
use crate::models::users::responses::UserDetailResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{Reply, internal, reject};

pub async fn get_user(service: &UserService, request: &HttpRequest, user_id: i64) -> Reply {
    let storage = service.get_storage(request);

    let user = storage
        .get_user_by_id(user_id)
        .await
        .map_err(internal("Failed to get user"))?
        .ok_or_else(|| reject(StatusCode::NOT_FOUND, ErrorCode::UserNotFound, "User not found"))?;
    let class_ids = storage
        .list_user_class_ids(user_id)
        .await
        .map_err(internal("Failed to list user classes"))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        UserDetailResponse { user, class_ids },
        "User retrieved",
    )))
}
