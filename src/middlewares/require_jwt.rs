/*!
 * JWT 认证中间件
 *
 * 校验 `Authorization: Bearer <access token>`，加载当前用户并写入请求扩展。
 *
 * ```rust,ignore
 * web::scope("/api/v1/classes")
 *     .wrap(RequireJWT)
 *     .route("", web::get().to(list_classes))
 * ```
 *
 * 处理函数中通过 `RequireJWT::extract_user_claims(&req)` 取得用户。
 *
 * ## `x-user-id`
 *
 * 请求携带 `x-user-id` 时必须与 token 中的用户一致，否则返回 401。
 * 认证通过后响应头会回写 `x-user-id`。
 */

use crate::cache::{CacheResult, ObjectCache, ObjectCacheExt};
use crate::config::AppConfig;
use crate::models::users::entities::{User, UserStatus};
use crate::models::ErrorCode;
use crate::storage::Storage;
use crate::utils::jwt::JwtUtils;
use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage, HttpRequest, HttpResponse,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
    http::header::{HeaderName, HeaderValue},
    web,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::{rc::Rc, sync::Arc};
use tracing::{debug, info, warn};

use super::create_error_response;

pub const USER_ID_HEADER: &str = "x-user-id";

#[derive(Clone)]
pub struct RequireJWT;

pub(crate) fn user_cache_key(user_id: i64) -> String {
    format!("user:{user_id}")
}

/// `x-user-id` 头与 token 主体的一致性检查
fn check_user_id_header(header: Option<&str>, subject: i64) -> Result<(), String> {
    match header {
        None => Ok(()),
        Some(raw) => match raw.trim().parse::<i64>() {
            Ok(id) if id == subject => Ok(()),
            _ => Err("x-user-id does not match the authenticated user".to_string()),
        },
    }
}

async fn load_user(req: &HttpRequest, user_id: i64) -> Result<User, String> {
    let cache = req
        .app_data::<web::Data<Arc<dyn ObjectCache>>>()
        .map(|c| c.get_ref().clone());

    if let Some(cache) = &cache
        && let CacheResult::Found(user) = cache.get_json::<User>(&user_cache_key(user_id)).await
    {
        return Ok(user);
    }

    let storage = req
        .app_data::<web::Data<Arc<dyn Storage>>>()
        .ok_or_else(|| "Storage not configured".to_string())?
        .get_ref()
        .clone();

    let user = storage
        .get_user_by_id(user_id)
        .await
        .map_err(|e| {
            warn!("Failed to load user {} for authentication: {}", user_id, e);
            "Failed to retrieve user".to_string()
        })?
        .ok_or_else(|| "User not found".to_string())?;

    // password_hash 不会被序列化进缓存
    if let Some(cache) = &cache {
        cache
            .insert_json(
                user_cache_key(user_id),
                &user,
                AppConfig::get().cache.default_ttl,
            )
            .await;
    }

    Ok(user)
}

/// 校验 token 并返回当前用户
pub async fn authenticate(req: &HttpRequest) -> Result<User, String> {
    let token = JwtUtils::bearer_token(req)
        .ok_or_else(|| "Missing or invalid Authorization header".to_string())?;

    let claims = JwtUtils::verify_access_token(&token).map_err(|err| {
        info!("JWT token validation failed: {}", err);
        "Invalid JWT token".to_string()
    })?;

    let user_id = claims
        .user_id()
        .ok_or_else(|| "Invalid user ID in JWT".to_string())?;

    let header = req
        .headers()
        .get(USER_ID_HEADER)
        .map(|v| v.to_str().unwrap_or_default());
    check_user_id_header(header, user_id)?;

    let user = load_user(req, user_id).await?;
    if user.status != UserStatus::Active {
        return Err("User is not active".to_string());
    }
    Ok(user)
}

impl<S, B> Transform<S, ServiceRequest> for RequireJWT
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireJWTMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireJWTMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct RequireJWTMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequireJWTMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        Box::pin(async move {
            if req.method() == actix_web::http::Method::OPTIONS {
                return Ok(
                    req.into_response(HttpResponse::NoContent().finish().map_into_right_body())
                );
            }

            match authenticate(req.request()).await {
                Ok(user) => {
                    debug!("JWT authentication successful for ID: {}", user.id);
                    let user_id = user.id;
                    req.extensions_mut().insert(user);
                    let mut res = srv.call(req).await?;
                    if let Ok(value) = HeaderValue::from_str(&user_id.to_string()) {
                        res.headers_mut()
                            .insert(HeaderName::from_static(USER_ID_HEADER), value);
                    }
                    Ok(res.map_into_left_body())
                }
                Err(err) => {
                    info!(
                        "JWT authentication failed for request to {}: {}",
                        req.path(),
                        err
                    );
                    Ok(req.into_response(
                        create_error_response(
                            StatusCode::UNAUTHORIZED,
                            ErrorCode::Unauthorized,
                            &format!("Unauthorized: {err}"),
                        )
                        .map_into_right_body(),
                    ))
                }
            }
        })
    }
}

impl RequireJWT {
    /// 从请求扩展中提取当前用户
    pub fn extract_user_claims(req: &HttpRequest) -> Option<User> {
        req.extensions().get::<User>().cloned()
    }

    /// 用户资料、状态或密码变更后移除缓存
    pub async fn evict_user(req: &HttpRequest, user_id: i64) {
        if let Some(cache) = req.app_data::<web::Data<Arc<dyn ObjectCache>>>() {
            cache.remove(&user_cache_key(user_id)).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_id_header_check() {
        assert!(check_user_id_header(None, 7).is_ok());
        assert!(check_user_id_header(Some("7"), 7).is_ok());
        assert!(check_user_id_header(Some(" 7 "), 7).is_ok());
        assert!(check_user_id_header(Some("8"), 7).is_err());
        assert!(check_user_id_header(Some("abc"), 7).is_err());
    }

    #[actix_web::test]
    async fn test_missing_token_rejected() {
        let req = actix_web::test::TestRequest::default().to_http_request();
        let err = authenticate(&req).await.unwrap_err();
        assert!(err.contains("Authorization"));
    }
}
