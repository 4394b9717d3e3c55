use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse};
use tracing::info;

use super::UserService;
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{Reply, current_user, internal, reject};

pub async fn delete_user(service: &UserService, request: &HttpRequest, user_id: i64) -> Reply {
    let admin = current_user(request)?;
    if admin.id == user_id {
        return Err(reject(
            StatusCode::FORBIDDEN,
            ErrorCode::CanNotDeleteCurrentUser,
            "You cannot delete your own account",
        ));
    }

    let storage = service.get_storage(request);
    let deleted = storage
        .delete_user(user_id)
        .await
        .map_err(internal("Failed to delete user"))?;

    if !deleted {
        return Err(reject(
            StatusCode::NOT_FOUND,
            ErrorCode::UserNotFound,
            "User not found",
        ));
    }

    RequireJWT::evict_user(request, user_id).await;
    info!("Admin {} deleted user {}", admin.id, user_id);
    Ok(HttpResponse::Ok().json(ApiResponse::success_empty("User deleted successfully")))
}
