//! Access / Refresh Token 签发与校验
//!
//! 有效期单位为秒，由调用方从动态配置中读取后传入。

use crate::config::AppConfig;
use actix_web::cookie::{Cookie, SameSite};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

pub const ACCESS_TOKEN: &str = "access";
pub const REFRESH_TOKEN: &str = "refresh";
pub const REFRESH_COOKIE: &str = "refresh_token";

// JWT Claims 结构体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,        // 用户 ID
    pub role: String,       // 签发时的全局角色
    pub token_type: String, // "access" 或 "refresh"
    pub exp: usize,
    pub iat: usize,
}

impl Claims {
    pub fn user_id(&self) -> Option<i64> {
        self.sub.parse().ok()
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

pub struct JwtUtils;

impl JwtUtils {
    fn secret() -> &'static str {
        &AppConfig::get().jwt.secret
    }

    /// 使用指定密钥签发
    pub fn sign(
        secret: &str,
        user_id: i64,
        role: &str,
        token_type: &str,
        expiry_seconds: i64,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let now = chrono::Utc::now();
        let expiration = now + chrono::Duration::seconds(expiry_seconds);

        let claims = Claims {
            sub: user_id.to_string(),
            role: role.to_string(),
            token_type: token_type.to_string(),
            exp: expiration.timestamp().max(0) as usize,
            iat: now.timestamp().max(0) as usize,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    /// 使用指定密钥校验，并检查 token 类型
    pub fn verify(
        secret: &str,
        token: &str,
        expected_type: &str,
    ) -> Result<Claims, jsonwebtoken::errors::Error> {
        let mut validation = Validation::default();
        validation.leeway = 5;

        let claims = decode::<Claims>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &validation,
        )?
        .claims;

        if claims.token_type != expected_type {
            return Err(jsonwebtoken::errors::ErrorKind::InvalidToken.into());
        }
        Ok(claims)
    }

    pub fn generate_access_token(
        user_id: i64,
        role: &str,
        expiry_seconds: i64,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        Self::sign(Self::secret(), user_id, role, ACCESS_TOKEN, expiry_seconds)
    }

    pub fn generate_token_pair(
        user_id: i64,
        role: &str,
        access_expiry_seconds: i64,
        refresh_expiry_seconds: i64,
    ) -> Result<TokenPair, jsonwebtoken::errors::Error> {
        Ok(TokenPair {
            access_token: Self::generate_access_token(user_id, role, access_expiry_seconds)?,
            refresh_token: Self::sign(
                Self::secret(),
                user_id,
                role,
                REFRESH_TOKEN,
                refresh_expiry_seconds,
            )?,
        })
    }

    pub fn verify_access_token(token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        Self::verify(Self::secret(), token, ACCESS_TOKEN)
    }

    pub fn verify_refresh_token(token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        Self::verify(Self::secret(), token, REFRESH_TOKEN)
    }

    /// Refresh Token Cookie，有效期与 token 一致
    pub fn create_refresh_token_cookie(refresh_token: &str, max_age_seconds: i64) -> Cookie<'static> {
        Cookie::build(REFRESH_COOKIE, refresh_token.to_string())
            .path("/api/v1/auth")
            .max_age(actix_web::cookie::time::Duration::seconds(max_age_seconds))
            .same_site(SameSite::Strict)
            .http_only(true)
            .secure(AppConfig::get().is_production())
            .finish()
    }

    /// 注销时下发的过期 Cookie
    pub fn create_empty_refresh_token_cookie() -> Cookie<'static> {
        Cookie::build(REFRESH_COOKIE, "")
            .path("/api/v1/auth")
            .max_age(actix_web::cookie::time::Duration::seconds(0))
            .same_site(SameSite::Strict)
            .http_only(true)
            .secure(AppConfig::get().is_production())
            .finish()
    }

    pub fn extract_refresh_token_from_cookie(req: &actix_web::HttpRequest) -> Option<String> {
        req.cookie(REFRESH_COOKIE)
            .map(|cookie| cookie.value().to_string())
    }

    /// 从 Authorization 头中取出 Bearer token
    pub fn bearer_token(req: &actix_web::HttpRequest) -> Option<String> {
        req.headers()
            .get(actix_web::http::header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .and_then(|s| s.strip_prefix("Bearer "))
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "unit-test-secret";

    #[test]
    fn test_sign_and_verify() {
        let token = JwtUtils::sign(SECRET, 42, "professor", ACCESS_TOKEN, 60).unwrap();
        let claims = JwtUtils::verify(SECRET, &token, ACCESS_TOKEN).unwrap();
        assert_eq!(claims.user_id(), Some(42));
        assert_eq!(claims.role, "professor");
    }

    #[test]
    fn test_token_type_is_enforced() {
        let refresh = JwtUtils::sign(SECRET, 1, "student", REFRESH_TOKEN, 60).unwrap();
        assert!(JwtUtils::verify(SECRET, &refresh, ACCESS_TOKEN).is_err());
        assert!(JwtUtils::verify(SECRET, &refresh, REFRESH_TOKEN).is_ok());
    }

    #[test]
    fn test_expired_and_foreign_tokens() {
        let expired = JwtUtils::sign(SECRET, 1, "student", ACCESS_TOKEN, -3600).unwrap();
        assert!(JwtUtils::verify(SECRET, &expired, ACCESS_TOKEN).is_err());

        let other = JwtUtils::sign("other-secret", 1, "student", ACCESS_TOKEN, 60).unwrap();
        assert!(JwtUtils::verify(SECRET, &other, ACCESS_TOKEN).is_err());
    }
}
