/*!
 * 速率限制中间件
 *
 * 此中间件用于限制请求频率，防止暴力破解和 DDoS 攻击。
 *
 * ## 使用方法
 *
 * ```rust,ignore
 * use actix_web::{web, App};
 * use crate::middlewares::rate_limit::RateLimit;
 *
 * App::new()
 *     .service(
 *         web::scope("/api/v1/auth")
 *             .wrap(RateLimit::new(5, 60))  // 5次/分钟，固定窗口
 *             .route("/login", web::post().to(login_handler))
 *     )
 * ```
 *
 * ## 限制规则
 *
 * - 已认证请求按用户 ID 计数，否则按客户端 IP
 * - 每个前缀独立计数，窗口结束后清零
 * - 超过限制返回 429，并带 `Retry-After`
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage, HttpResponse,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
    http::header::{CONTENT_TYPE, HeaderName, HeaderValue},
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use moka::future::Cache;
use once_cell::sync::Lazy;
use std::rc::Rc;
use std::time::Duration;
use tracing::warn;

use crate::models::users::entities::User;
use crate::models::{ApiResponse, ErrorCode};

/// 全局速率限制计数
/// 键: 前缀:标识，值: (窗口起始秒, 窗口内计数)
static RATE_LIMIT_CACHE: Lazy<Cache<String, (u64, u32)>> = Lazy::new(|| {
    Cache::builder()
        .time_to_live(Duration::from_secs(MAX_WINDOW_SECS))
        .max_capacity(100_000)
        .build()
});

const MAX_WINDOW_SECS: u64 = 3600;

/// 速率限制配置
#[derive(Clone)]
pub struct RateLimit {
    /// 时间窗口内允许的最大请求数
    max_requests: u32,
    /// 时间窗口（秒）
    window_secs: u64,
    /// 限制键前缀（用于区分不同端点）
    key_prefix: String,
}

impl RateLimit {
    pub fn new(max_requests: u32, window_secs: u64) -> Self {
        Self {
            max_requests,
            window_secs: window_secs.clamp(1, MAX_WINDOW_SECS),
            key_prefix: String::new(),
        }
    }

    pub fn with_prefix(mut self, prefix: &str) -> Self {
        self.key_prefix = prefix.to_string();
        self
    }

    /// 登录：5次/分钟/IP
    pub fn login() -> Self {
        Self::new(5, 60).with_prefix("login")
    }

    /// 注册：3次/分钟/IP
    pub fn register() -> Self {
        Self::new(3, 60).with_prefix("register")
    }

    /// 刷新令牌：10次/分钟/IP
    pub fn refresh_token() -> Self {
        Self::new(10, 60).with_prefix("refresh")
    }

    /// 找回密码：3次/5分钟/IP
    pub fn forgot_password() -> Self {
        Self::new(3, 300).with_prefix("forgot_password")
    }

    /// 联系表单：5次/10分钟/IP
    pub fn contact_form() -> Self {
        Self::new(5, 600).with_prefix("contact")
    }

    /// 崩溃上报：20次/分钟
    pub fn crash_report() -> Self {
        Self::new(20, 60).with_prefix("crash_report")
    }

    /// 邀请码与邀请链接查询：10次/分钟（防止枚举）
    pub fn invite_code() -> Self {
        Self::new(10, 60).with_prefix("invite_code")
    }

    /// 文件上传：10次/分钟/用户
    pub fn file_upload() -> Self {
        Self::new(10, 60).with_prefix("upload")
    }
}

/// 一次计数的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct WindowDecision {
    state: (u64, u32),
    allowed: bool,
    remaining: u32,
    retry_after: u64,
}

/// 固定窗口计数：窗口过期后重新开始
fn count_hit(previous: Option<(u64, u32)>, now: u64, max_requests: u32, window_secs: u64) -> WindowDecision {
    let (start, count) = match previous {
        Some((start, count)) if now < start + window_secs => (start, count),
        _ => (now, 0),
    };
    let retry_after = (start + window_secs).saturating_sub(now).max(1);

    if count >= max_requests {
        return WindowDecision {
            state: (start, count),
            allowed: false,
            remaining: 0,
            retry_after,
        };
    }

    WindowDecision {
        state: (start, count + 1),
        allowed: true,
        remaining: max_requests - count - 1,
        retry_after,
    }
}

/// 客户端 IP：优先 Forwarded / X-Forwarded-For，其次对端地址
///
/// 直接暴露在公网时转发头可被伪造，应由反向代理覆盖这些头。
fn extract_client_ip(req: &ServiceRequest) -> String {
    let info = req.connection_info();
    info.realip_remote_addr()
        .map(|raw| raw.trim())
        .filter(|ip| is_valid_ip(ip))
        .map(str::to_string)
        .or_else(|| info.peer_addr().map(str::to_string))
        .unwrap_or_else(|| "unknown".to_string())
}

fn is_valid_ip(ip: &str) -> bool {
    ip.parse::<std::net::IpAddr>().is_ok()
}

/// 已认证时按用户计数
fn extract_user_id(req: &ServiceRequest) -> Option<i64> {
    req.extensions().get::<User>().map(|user| user.id)
}

/// 创建速率限制错误响应
fn create_rate_limit_response(retry_after: u64) -> HttpResponse {
    HttpResponse::build(StatusCode::TOO_MANY_REQUESTS)
        .insert_header((CONTENT_TYPE, "application/json; charset=utf-8"))
        .insert_header(("Retry-After", retry_after.to_string()))
        .insert_header(("X-RateLimit-Remaining", "0"))
        .json(ApiResponse::<()>::error_empty(
            ErrorCode::RateLimitExceeded,
            "Too many requests, please try again later",
        ))
}

impl<S, B> Transform<S, ServiceRequest> for RateLimit
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RateLimitMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RateLimitMiddleware {
            service: Rc::new(service),
            max_requests: self.max_requests,
            window_secs: self.window_secs,
            key_prefix: self.key_prefix.clone(),
        }))
    }
}

pub struct RateLimitMiddleware<S> {
    service: Rc<S>,
    max_requests: u32,
    window_secs: u64,
    key_prefix: String,
}

impl<S, B> Service<ServiceRequest> for RateLimitMiddleware<S>
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
        let max_requests = self.max_requests;
        let window_secs = self.window_secs;
        let key_prefix = self.key_prefix.clone();

        Box::pin(async move {
            // 构建限制键
            let identifier = extract_user_id(&req)
                .map(|id| format!("user:{}", id))
                .unwrap_or_else(|| format!("ip:{}", extract_client_ip(&req)));

            let cache_key = if key_prefix.is_empty() {
                identifier
            } else {
                format!("{}:{}", key_prefix, identifier)
            };

            let now = chrono::Utc::now().timestamp().max(0) as u64;
            let previous = RATE_LIMIT_CACHE.get(&cache_key).await;
            let decision = count_hit(previous, now, max_requests, window_secs);

            if !decision.allowed {
                warn!(
                    "Rate limit exceeded for key: {} (limit: {}/{}s)",
                    cache_key, max_requests, window_secs
                );
                return Ok(req.into_response(
                    create_rate_limit_response(decision.retry_after).map_into_right_body(),
                ));
            }

            RATE_LIMIT_CACHE.insert(cache_key, decision.state).await;

            let mut res = srv.call(req).await?;
            let headers = res.headers_mut();
            headers.insert(
                HeaderName::from_static("x-ratelimit-limit"),
                HeaderValue::from(max_requests),
            );
            headers.insert(
                HeaderName::from_static("x-ratelimit-remaining"),
                HeaderValue::from(decision.remaining),
            );
            Ok(res.map_into_left_body())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test as atest;
    use actix_web::{App, HttpResponse, web};

    #[test]
    fn test_rate_limit_presets() {
        let login = RateLimit::login();
        assert_eq!(login.max_requests, 5);
        assert_eq!(login.window_secs, 60);
        assert_eq!(login.key_prefix, "login");

        let forgot = RateLimit::forgot_password();
        assert_eq!(forgot.max_requests, 3);
        assert_eq!(forgot.window_secs, 300);

        assert_eq!(RateLimit::new(1, 86_400).window_secs, MAX_WINDOW_SECS);
    }

    #[test]
    fn test_fixed_window_counting() {
        let first = count_hit(None, 1_000, 2, 60);
        assert!(first.allowed);
        assert_eq!(first.remaining, 1);

        let second = count_hit(Some(first.state), 1_010, 2, 60);
        assert!(second.allowed);
        assert_eq!(second.remaining, 0);

        let third = count_hit(Some(second.state), 1_020, 2, 60);
        assert!(!third.allowed);
        assert_eq!(third.retry_after, 40);

        // 窗口结束后重新计数
        let fresh = count_hit(Some(third.state), 1_060, 2, 60);
        assert!(fresh.allowed);
        assert_eq!(fresh.state, (1_060, 1));
    }

    #[actix_web::test]
    async fn test_middleware_rejects_after_limit() {
        let app = atest::init_service(
            App::new().service(
                web::scope("/limited")
                    .wrap(RateLimit::new(2, 60).with_prefix("test_middleware_limit"))
                    .route("", web::get().to(HttpResponse::Ok)),
            ),
        )
        .await;

        for expected in [200, 200, 429] {
            let req = atest::TestRequest::get()
                .uri("/limited")
                .peer_addr("10.1.2.3:4000".parse().unwrap())
                .to_request();
            let res = atest::call_service(&app, req).await;
            assert_eq!(res.status().as_u16(), expected);
        }
    }
}
