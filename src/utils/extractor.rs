//! 路径参数提取器
//!
//! 解析失败时直接返回统一的 JSON 错误响应，处理函数只拿到合法值。
//! 既可单独作为提取器，也可放进 `web::Path<(A, B)>` 元组中。

use actix_web::{HttpResponse, error::InternalError};

use crate::models::{ApiResponse, ErrorCode};

/// 构造参数错误
pub fn bad_param(message: String) -> actix_web::Error {
    let response =
        HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::BadRequest, &message));
    InternalError::from_response(message, response).into()
}

pub fn parse_positive_id(raw: Option<&str>, param: &str) -> Result<i64, String> {
    let raw = raw.ok_or_else(|| format!("Missing path parameter: {param}"))?;
    raw.parse::<i64>()
        .ok()
        .filter(|v| *v > 0)
        .ok_or_else(|| format!("Invalid {param}: {raw}"))
}

#[macro_export]
macro_rules! define_safe_i64_extractor {
    ($name:ident, $param:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub struct $name(pub i64);

        impl actix_web::FromRequest for $name {
            type Error = actix_web::Error;
            type Future = std::future::Ready<Result<Self, Self::Error>>;

            fn from_request(
                req: &actix_web::HttpRequest,
                _: &mut actix_web::dev::Payload,
            ) -> Self::Future {
                std::future::ready(
                    $crate::utils::extractor::parse_positive_id(req.match_info().get($param), $param)
                        .map($name)
                        .map_err($crate::utils::extractor::bad_param),
                )
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $name {
            fn deserialize<D: ::serde::Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
                let raw = <String as ::serde::Deserialize>::deserialize(d)?;
                $crate::utils::extractor::parse_positive_id(Some(&raw), $param)
                    .map($name)
                    .map_err(::serde::de::Error::custom)
            }
        }
    };
}

#[macro_export]
macro_rules! define_safe_string_extractor {
    ($name:ident, $param:literal, $check:expr) => {
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct $name(pub String);

        impl actix_web::FromRequest for $name {
            type Error = actix_web::Error;
            type Future = std::future::Ready<Result<Self, Self::Error>>;

            fn from_request(
                req: &actix_web::HttpRequest,
                _: &mut actix_web::dev::Payload,
            ) -> Self::Future {
                let check: fn(&str) -> bool = $check;
                let result = match req.match_info().get($param) {
                    Some(raw) if check(raw) => Ok($name(raw.to_string())),
                    Some(raw) => Err(format!("Invalid {}: {}", $param, raw)),
                    None => Err(format!("Missing path parameter: {}", $param)),
                };
                std::future::ready(result.map_err($crate::utils::extractor::bad_param))
            }
        }
    };
}

fn is_token(raw: &str) -> bool {
    !raw.is_empty() && raw.len() <= 128 && raw.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}

fn is_setting_key(raw: &str) -> bool {
    !raw.is_empty()
        && raw.len() <= 64
        && raw
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '.' || c == '_')
}

fn is_invite_code(raw: &str) -> bool {
    (4..=16).contains(&raw.len()) && raw.chars().all(|c| c.is_ascii_alphanumeric())
}

define_safe_i64_extractor!(SafeIDI64, "id");
define_safe_i64_extractor!(SafeClassIdI64, "class_id");
define_safe_i64_extractor!(SafeUserIdI64, "user_id");
define_safe_i64_extractor!(SafeStudentIdI64, "student_id");
define_safe_string_extractor!(SafeToken, "token", is_token);
define_safe_string_extractor!(SafeSettingKey, "key", is_setting_key);
define_safe_string_extractor!(SafeInviteCode, "code", is_invite_code);

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{FromRequest, test::TestRequest};

    #[actix_web::test]
    async fn test_i64_extractor() {
        let req = TestRequest::default().param("id", "42").to_http_request();
        assert_eq!(SafeIDI64::extract(&req).await.unwrap(), SafeIDI64(42));

        for bad in ["0", "-3", "abc"] {
            let req = TestRequest::default().param("id", bad).to_http_request();
            assert!(SafeIDI64::extract(&req).await.is_err());
        }

        let req = TestRequest::default().to_http_request();
        assert!(SafeClassIdI64::extract(&req).await.is_err());
    }

    #[actix_web::test]
    async fn test_string_extractors() {
        let req = TestRequest::default()
            .param("key", "jwt.access_token_expiry")
            .to_http_request();
        assert!(SafeSettingKey::extract(&req).await.is_ok());

        let req = TestRequest::default()
            .param("key", "../etc")
            .to_http_request();
        assert!(SafeSettingKey::extract(&req).await.is_err());

        let req = TestRequest::default()
            .param("token", "a1b2-c3")
            .to_http_request();
        assert_eq!(
            SafeToken::extract(&req).await.unwrap().0,
            "a1b2-c3".to_string()
        );
    }

    #[test]
    fn test_deserialize_from_path_segment() {
        let v: SafeUserIdI64 = serde_json::from_str(r#""7""#).unwrap();
        assert_eq!(v.0, 7);
        assert!(serde_json::from_str::<SafeUserIdI64>(r#""x""#).is_err());
    }
}
