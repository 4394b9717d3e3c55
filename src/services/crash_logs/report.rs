use actix_web::http::{StatusCode, header};
use actix_web::{HttpRequest, HttpResponse};

use super::CrashLogService;
use crate::middlewares::require_jwt::authenticate;
use crate::models::{
    ApiResponse, ErrorCode,
    crash_logs::requests::{NewCrashLog, ReportCrashRequest},
};
use crate::services::{Reply, internal, reject};

pub const MESSAGE_MAX: usize = 2_000;
pub const STACK_MAX: usize = 20_000;
pub const FIELD_MAX: usize = 500;

/// 截断到指定字符数，空串视为缺省
fn clip(value: Option<String>, max: usize) -> Option<String> {
    value
        .map(|v| v.trim().chars().take(max).collect::<String>())
        .filter(|v| !v.is_empty())
}

fn build_log(report: ReportCrashRequest, user_id: Option<i64>, user_agent: Option<String>) -> Option<NewCrashLog> {
    let message = clip(Some(report.message), MESSAGE_MAX)?;
    Some(NewCrashLog {
        user_id,
        message,
        stack: clip(report.stack, STACK_MAX),
        url: clip(report.url, FIELD_MAX),
        user_agent: clip(user_agent, FIELD_MAX),
        app_version: clip(report.app_version, 64),
    })
}

pub async fn report_crash(
    service: &CrashLogService,
    request: &HttpRequest,
    report: ReportCrashRequest,
) -> Reply {
    let storage = service.get_storage(request);

    // token 无效时按匿名上报处理
    let user_id = authenticate(request).await.ok().map(|u| u.id);
    let user_agent = request
        .headers()
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let log = build_log(report, user_id, user_agent).ok_or_else(|| {
        reject(StatusCode::BAD_REQUEST, ErrorCode::BadRequest, "message must not be empty")
    })?;

    let created = storage
        .create_crash_log(log)
        .await
        .map_err(internal("Failed to save crash log"))?;

    tracing::warn!("Client crash reported (#{}): {}", created.id, created.message);
    Ok(HttpResponse::Created().json(ApiResponse::success(created, "Crash report received")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(message: &str) -> ReportCrashRequest {
        ReportCrashRequest {
            message: message.to_string(),
            stack: Some("   ".to_string()),
            url: Some("https://example.com/classes/1".to_string()),
            app_version: None,
        }
    }

    #[test]
    fn test_build_log_trims_and_clips() {
        let log = build_log(report(&"x".repeat(MESSAGE_MAX + 10)), Some(3), Some("Firefox".into())).unwrap();
        assert_eq!(log.message.chars().count(), MESSAGE_MAX);
        assert_eq!(log.stack, None);
        assert_eq!(log.user_id, Some(3));
        assert_eq!(log.user_agent.as_deref(), Some("Firefox"));
    }

    #[test]
    fn test_build_log_requires_message() {
        assert!(build_log(report("  "), None, None).is_none());
    }
}
