use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse};

use crate::models::{
    ApiResponse, ErrorCode,
    auth::{requests::LoginRequest, responses::LoginResponse},
    users::entities::{User, UserStatus},
};
use crate::services::system::DynamicConfig;
use crate::services::{Reply, internal, reject};
use crate::utils::jwt::{JwtUtils, TokenPair};
use crate::utils::password::verify_password;

use super::AuthService;

/// 签发的令牌及其有效期（秒）
pub(crate) struct IssuedTokens {
    pub pair: TokenPair,
    pub access_expiry: i64,
    pub refresh_expiry: i64,
}

pub(crate) async fn issue_tokens(user: &User, remember_me: bool) -> Result<IssuedTokens, HttpResponse> {
    let access_expiry = DynamicConfig::access_token_expiry().await;
    let refresh_expiry = if remember_me {
        DynamicConfig::refresh_token_remember_me_expiry().await
    } else {
        DynamicConfig::refresh_token_expiry().await
    };

    let pair = JwtUtils::generate_token_pair(
        user.id,
        user.role.as_str(),
        access_expiry,
        refresh_expiry,
    )
    .map_err(|e| {
        tracing::error!("Failed to generate JWT token: {}", e);
        reject(
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorCode::InternalServerError,
            "Login failed, unable to generate token",
        )
    })?;

    Ok(IssuedTokens {
        pair,
        access_expiry,
        refresh_expiry,
    })
}

fn auth_failed() -> HttpResponse {
    reject(
        StatusCode::UNAUTHORIZED,
        ErrorCode::AuthFailed,
        "Username or password is incorrect",
    )
}

pub async fn handle_login(
    service: &AuthService,
    login_request: LoginRequest,
    request: &HttpRequest,
) -> Reply {
    let storage = service.get_storage(request);

    // 1. 用户名或邮箱
    let identifier = login_request.username.trim();
    let user = storage
        .get_user_by_username_or_email(identifier)
        .await
        .map_err(internal("Login failed"))?
        .ok_or_else(auth_failed)?;

    // 2. 密码
    if !verify_password(&login_request.password, &user.password_hash) {
        return Err(auth_failed());
    }

    if user.status != UserStatus::Active {
        return Err(reject(
            StatusCode::FORBIDDEN,
            ErrorCode::AuthFailed,
            format!("Account is {}", user.status),
        ));
    }

    // 3. 最后登录时间
    if let Err(e) = storage.update_last_login(user.id).await {
        tracing::warn!("Failed to update last login for {}: {}", user.id, e);
    }

    // 4. 令牌
    let tokens = issue_tokens(&user, login_request.remember_me).await?;
    tracing::info!("User {} logged in successfully", user.username);

    let refresh_cookie =
        JwtUtils::create_refresh_token_cookie(&tokens.pair.refresh_token, tokens.refresh_expiry);
    let response = LoginResponse {
        access_token: tokens.pair.access_token,
        expires_in: tokens.access_expiry,
        user,
        created_at: chrono::Utc::now(),
    };

    Ok(HttpResponse::Ok()
        .cookie(refresh_cookie)
        .json(ApiResponse::success(response, "Login successful")))
}
