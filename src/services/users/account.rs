//! 账户创建时共用的校验：管理员创建、公开注册、接受邀请

use actix_web::HttpResponse;
use actix_web::http::StatusCode;

use crate::models::ErrorCode;
use crate::services::{internal, reject};
use crate::storage::Storage;
use crate::utils::password::hash_password;
use crate::utils::validate::{normalize_email, validate_email, validate_password, validate_username};

/// 校验用户名、邮箱与密码，返回规范化后的邮箱
pub(crate) fn validate_new_account(
    username: &str,
    email: &str,
    password: &str,
) -> Result<String, HttpResponse> {
    validate_username(username)
        .map_err(|msg| reject(StatusCode::BAD_REQUEST, ErrorCode::UserNameInvalid, msg))?;
    let email = normalize_email(email);
    validate_email(&email)
        .map_err(|msg| reject(StatusCode::BAD_REQUEST, ErrorCode::UserEmailInvalid, msg))?;
    validate_password(password, Some(username))
        .map_err(|msg| reject(StatusCode::BAD_REQUEST, ErrorCode::UserPasswordInvalid, msg))?;
    Ok(email)
}

/// 用户名与邮箱均未被占用
pub(crate) async fn ensure_available(
    storage: &dyn Storage,
    username: &str,
    email: &str,
) -> Result<(), HttpResponse> {
    let by_name = storage
        .get_user_by_username(username)
        .await
        .map_err(internal("Failed to check username"))?;
    if by_name.is_some() {
        return Err(reject(
            StatusCode::CONFLICT,
            ErrorCode::UserAlreadyExists,
            "Username already exists",
        ));
    }

    let by_email = storage
        .get_user_by_email(email)
        .await
        .map_err(internal("Failed to check email"))?;
    if by_email.is_some() {
        return Err(reject(
            StatusCode::CONFLICT,
            ErrorCode::UserAlreadyExists,
            "Email already registered",
        ));
    }
    Ok(())
}

pub(crate) fn hash_or_reject(password: &str) -> Result<String, HttpResponse> {
    hash_password(password).map_err(|e| {
        tracing::error!("Password hashing failed: {e}");
        reject(
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorCode::InternalServerError,
            "Password hashing failed",
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_new_account() {
        assert_eq!(
            validate_new_account("alice", " Alice@Example.com ", "passw0rd!").unwrap(),
            "alice@example.com"
        );
        assert!(validate_new_account("1alice", "alice@example.com", "passw0rd!").is_err());
        assert!(validate_new_account("alice", "not-an-email", "passw0rd!").is_err());
        assert!(validate_new_account("alice", "alice@example.com", "short").is_err());
    }
}
