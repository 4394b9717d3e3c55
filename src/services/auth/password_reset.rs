use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse};
use chrono::{Duration, Utc};

use crate::config::AppConfig;
use crate::mail::{self, EmailTemplate};
use crate::middlewares::RequireJWT;
use crate::models::{
    ApiResponse, ErrorCode,
    auth::requests::{ForgotPasswordRequest, ResetPasswordRequest},
    users::{entities::UserStatus, requests::UpdateUserRequest},
};
use crate::services::users::account::hash_or_reject;
use crate::services::{Reply, get_mailer, internal, reject};
use crate::utils::random_code::generate_secure_token;
use crate::utils::validate::{normalize_email, validate_password};

use super::AuthService;

const FORGOT_MESSAGE: &str = "If the email is registered, a reset link has been sent";

/// 无论邮箱是否存在都返回 200
pub async fn handle_forgot_password(
    service: &AuthService,
    forgot_request: ForgotPasswordRequest,
    request: &HttpRequest,
) -> Reply {
    let storage = service.get_storage(request);
    let config = AppConfig::get();
    let email = normalize_email(&forgot_request.email);

    let user = storage
        .get_user_by_email(&email)
        .await
        .map_err(internal("Failed to process password reset"))?;

    let Some(user) = user.filter(|u| u.status == UserStatus::Active) else {
        tracing::debug!("Password reset requested for unknown email");
        return Ok(HttpResponse::Ok().json(ApiResponse::success_empty(FORGOT_MESSAGE)));
    };

    let ttl_minutes = config.auth.password_reset_ttl_minutes.max(1);
    let token = generate_secure_token();
    storage
        .create_password_reset(user.id, &token, Utc::now() + Duration::minutes(ttl_minutes))
        .await
        .map_err(internal("Failed to create password reset"))?;

    let template = EmailTemplate::PasswordReset {
        username: user.display_name().to_string(),
        link: config.public_link(&format!("reset-password?token={token}")),
        ttl_minutes,
    };
    mail::dispatch_template(get_mailer(request), template, vec![user.email.clone()]).await;

    tracing::info!("Password reset issued for user {}", user.id);
    Ok(HttpResponse::Ok().json(ApiResponse::success_empty(FORGOT_MESSAGE)))
}

pub async fn handle_reset_password(
    service: &AuthService,
    reset_request: ResetPasswordRequest,
    request: &HttpRequest,
) -> Reply {
    let storage = service.get_storage(request);
    let invalid = || {
        reject(
            StatusCode::BAD_REQUEST,
            ErrorCode::PasswordResetTokenInvalid,
            "Reset link is invalid or has expired",
        )
    };

    let reset = storage
        .get_password_reset_by_token(reset_request.token.trim())
        .await
        .map_err(internal("Failed to verify reset token"))?
        .filter(|r| r.is_usable(Utc::now()))
        .ok_or_else(invalid)?;

    let user = storage
        .get_user_by_id(reset.user_id)
        .await
        .map_err(internal("Failed to load user"))?
        .ok_or_else(invalid)?;

    validate_password(&reset_request.new_password, Some(&user.username))
        .map_err(|msg| reject(StatusCode::BAD_REQUEST, ErrorCode::UserPasswordInvalid, msg))?;
    let password_hash = hash_or_reject(&reset_request.new_password)?;

    // 标记已使用，同时作废该用户的其他令牌；并发请求只有一个能成功
    let consumed = storage
        .consume_password_reset(reset.id, user.id)
        .await
        .map_err(internal("Failed to consume reset token"))?;
    if !consumed {
        return Err(invalid());
    }

    storage
        .update_user(
            user.id,
            UpdateUserRequest {
                password: Some(password_hash),
                ..Default::default()
            },
        )
        .await
        .map_err(internal("Failed to reset password"))?;

    RequireJWT::evict_user(request, user.id).await;
    tracing::info!("User {} reset password", user.id);
    Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Password has been reset")))
}
