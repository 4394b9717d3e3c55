use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse};

use crate::middlewares::RequireJWT;
use crate::models::{
    ApiResponse, ErrorCode,
    auth::requests::{ChangePasswordRequest, UpdateProfileRequest},
    users::requests::UpdateUserRequest,
};
use crate::services::users::account::hash_or_reject;
use crate::services::{Reply, current_user, internal, reject};
use crate::utils::password::verify_password;
use crate::utils::validate::validate_password;

use super::AuthService;

const DISPLAY_NAME_MAX: usize = 64;

pub async fn handle_update_profile(
    service: &AuthService,
    update_request: UpdateProfileRequest,
    request: &HttpRequest,
) -> Reply {
    let user = current_user(request)?;
    let storage = service.get_storage(request);

    let display_name = update_request.display_name.map(|n| n.trim().to_string());
    if display_name
        .as_ref()
        .is_some_and(|n| n.chars().count() > DISPLAY_NAME_MAX)
    {
        return Err(reject(
            StatusCode::BAD_REQUEST,
            ErrorCode::BadRequest,
            "Display name must be at most 64 characters",
        ));
    }

    let update = UpdateUserRequest {
        display_name,
        avatar_url: update_request.avatar_url,
        ..Default::default()
    };

    let updated = storage
        .update_user(user.id, update)
        .await
        .map_err(internal("Failed to update profile"))?
        .ok_or_else(|| reject(StatusCode::NOT_FOUND, ErrorCode::UserNotFound, "User not found"))?;

    RequireJWT::evict_user(request, user.id).await;
    Ok(HttpResponse::Ok().json(ApiResponse::success(updated, "Profile updated successfully")))
}

pub async fn handle_change_password(
    service: &AuthService,
    change_request: ChangePasswordRequest,
    request: &HttpRequest,
) -> Reply {
    let current = current_user(request)?;
    let storage = service.get_storage(request);

    // 请求扩展中的用户来自缓存，不含密码哈希
    let user = storage
        .get_user_by_id(current.id)
        .await
        .map_err(internal("Failed to load user"))?
        .ok_or_else(|| reject(StatusCode::NOT_FOUND, ErrorCode::UserNotFound, "User not found"))?;

    if !verify_password(&change_request.current_password, &user.password_hash) {
        return Err(reject(
            StatusCode::BAD_REQUEST,
            ErrorCode::AuthFailed,
            "Current password is incorrect",
        ));
    }
    validate_password(&change_request.new_password, Some(&user.username))
        .map_err(|msg| reject(StatusCode::BAD_REQUEST, ErrorCode::UserPasswordInvalid, msg))?;

    let update = UpdateUserRequest {
        password: Some(hash_or_reject(&change_request.new_password)?),
        ..Default::default()
    };
    storage
        .update_user(user.id, update)
        .await
        .map_err(internal("Failed to change password"))?;

    RequireJWT::evict_user(request, user.id).await;
    tracing::info!("User {} changed password", user.id);
    Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Password changed successfully")))
}
