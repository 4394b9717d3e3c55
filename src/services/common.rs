//! 服务层公共辅助
//!
//! 处理函数返回 [`Reply`]，错误分支也是完整的响应，
//! 因此可以用 `?` 提前返回，最后由 [`finish`] 收拢。

use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use std::sync::Arc;
use tracing::error;

use crate::errors::ClassHubError;
use crate::mail::{LogMailer, Mailer};
use crate::middlewares::RequireJWT;
use crate::models::users::entities::User;
use crate::models::{ApiResponse, ErrorCode};

pub(crate) type Reply = Result<HttpResponse, HttpResponse>;

pub(crate) fn finish(reply: Reply) -> ActixResult<HttpResponse> {
    Ok(reply.unwrap_or_else(|response| response))
}

pub(crate) fn reject(status: StatusCode, code: ErrorCode, message: impl Into<String>) -> HttpResponse {
    HttpResponse::build(status).json(ApiResponse::<()>::error_empty(code, message))
}

/// 存储层错误转为 500 响应并记录日志
pub(crate) fn internal(context: &'static str) -> impl FnOnce(ClassHubError) -> HttpResponse {
    move |e| {
        error!("{context}: {e}");
        reject(
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorCode::InternalServerError,
            format!("{context}: {}", e.message()),
        )
    }
}

pub(crate) fn current_user(request: &HttpRequest) -> Result<User, HttpResponse> {
    RequireJWT::extract_user_claims(request).ok_or_else(|| {
        reject(
            StatusCode::UNAUTHORIZED,
            ErrorCode::Unauthorized,
            "Unauthorized: missing user",
        )
    })
}

pub(crate) fn client_ip(request: &HttpRequest) -> Option<String> {
    request
        .connection_info()
        .realip_remote_addr()
        .map(str::to_string)
}

/// 未注册发信器时退回日志发信器
pub(crate) fn get_mailer(request: &HttpRequest) -> Arc<dyn Mailer> {
    request
        .app_data::<web::Data<Arc<dyn Mailer>>>()
        .map(|m| m.get_ref().clone())
        .unwrap_or_else(|| Arc::new(LogMailer::default()))
}
