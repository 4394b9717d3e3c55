use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse};

use crate::middlewares::RequireJWT;
use crate::models::auth::responses::{RefreshTokenResponse, TokenVerificationResponse};
use crate::models::users::entities::UserStatus;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::system::DynamicConfig;
use crate::services::{Reply, current_user, internal, reject};
use crate::utils::jwt::JwtUtils;

use super::AuthService;

fn expired_login() -> HttpResponse {
    // 同时清除无效的 refresh token cookie
    HttpResponse::Unauthorized()
        .cookie(JwtUtils::create_empty_refresh_token_cookie())
        .json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Login expired or invalid, please login again",
        ))
}

pub async fn handle_refresh_token(service: &AuthService, request: &HttpRequest) -> Reply {
    let refresh_token = JwtUtils::extract_refresh_token_from_cookie(request).ok_or_else(|| {
        reject(
            StatusCode::UNAUTHORIZED,
            ErrorCode::Unauthorized,
            "Unauthorized access, please login",
        )
    })?;

    let claims = JwtUtils::verify_refresh_token(&refresh_token).map_err(|e| {
        tracing::info!("Refresh token rejected: {}", e);
        expired_login()
    })?;
    let user_id = claims.user_id().ok_or_else(expired_login)?;

    // 角色或状态可能已变化，按当前用户重新签发
    let storage = service.get_storage(request);
    let user = storage
        .get_user_by_id(user_id)
        .await
        .map_err(internal("Failed to refresh token"))?
        .filter(|u| u.status == UserStatus::Active)
        .ok_or_else(expired_login)?;

    let expires_in = DynamicConfig::access_token_expiry().await;
    let access_token = JwtUtils::generate_access_token(user.id, user.role.as_str(), expires_in)
        .map_err(|e| {
            tracing::error!("Failed to generate access token: {}", e);
            reject(
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorCode::InternalServerError,
                "Unable to generate token",
            )
        })?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        RefreshTokenResponse {
            access_token,
            expires_in,
        },
        "Token refreshed successfully",
    )))
}

pub async fn handle_logout(request: &HttpRequest) -> Reply {
    let user = current_user(request)?;
    RequireJWT::evict_user(request, user.id).await;

    Ok(HttpResponse::Ok()
        .cookie(JwtUtils::create_empty_refresh_token_cookie())
        .json(ApiResponse::success_empty("Logged out")))
}

pub async fn handle_verify_token(request: &HttpRequest) -> Reply {
    current_user(request)?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        TokenVerificationResponse { is_valid: true },
        "Token is valid",
    )))
}

pub async fn handle_get_user(request: &HttpRequest) -> Reply {
    let user = current_user(request)?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        user,
        "User information retrieved successfully",
    )))
}
