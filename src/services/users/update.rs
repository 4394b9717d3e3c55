use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse};

use super::UserService;
use super::account::hash_or_reject;
use crate::middlewares::RequireJWT;
use crate::models::{
    ApiResponse, ErrorCode,
    users::{
        entities::{UserRole, UserStatus},
        requests::UpdateUserRequest,
    },
};
use crate::services::{Reply, current_user, internal, reject};
use crate::utils::validate::{normalize_email, validate_email, validate_password};

pub async fn update_user(
    service: &UserService,
    request: &HttpRequest,
    user_id: i64,
    mut update_data: UpdateUserRequest,
) -> Reply {
    let admin = current_user(request)?;
    let storage = service.get_storage(request);

    let existing = storage
        .get_user_by_id(user_id)
        .await
        .map_err(internal("Failed to get user"))?
        .ok_or_else(|| reject(StatusCode::NOT_FOUND, ErrorCode::UserNotFound, "User not found"))?;

    // 管理员不能降级或停用自己
    if admin.id == user_id
        && (update_data.role.is_some_and(|r| r != UserRole::Admin)
            || update_data.status.is_some_and(|s| s != UserStatus::Active))
    {
        return Err(reject(
            StatusCode::FORBIDDEN,
            ErrorCode::UserUpdateFailed,
            "You cannot change your own role or status",
        ));
    }

    if let Some(email) = update_data.email.take() {
        let email = normalize_email(&email);
        validate_email(&email)
            .map_err(|msg| reject(StatusCode::BAD_REQUEST, ErrorCode::UserEmailInvalid, msg))?;
        if email != existing.email {
            let taken = storage
                .get_user_by_email(&email)
                .await
                .map_err(internal("Failed to check email"))?;
            if taken.is_some() {
                return Err(reject(
                    StatusCode::CONFLICT,
                    ErrorCode::UserAlreadyExists,
                    "Email already registered",
                ));
            }
        }
        update_data.email = Some(email);
    }

    if let Some(password) = update_data.password.take() {
        validate_password(&password, Some(&existing.username)).map_err(|msg| {
            reject(StatusCode::BAD_REQUEST, ErrorCode::UserPasswordInvalid, msg)
        })?;
        update_data.password = Some(hash_or_reject(&password)?);
    }

    let user = storage
        .update_user(user_id, update_data)
        .await
        .map_err(internal("Failed to update user information"))?
        .ok_or_else(|| reject(StatusCode::NOT_FOUND, ErrorCode::UserNotFound, "User not found"))?;

    RequireJWT::evict_user(request, user_id).await;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        user,
        "User information updated successfully",
    )))
}
