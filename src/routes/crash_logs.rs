use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{self, RateLimit};
use crate::models::crash_logs::requests::{
    CrashLogListParams, ReportCrashRequest, ResolveCrashRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::CrashLogService;
use crate::utils::SafeIDI64;

static CRASH_LOG_SERVICE: Lazy<CrashLogService> = Lazy::new(CrashLogService::new_lazy);

pub async fn report_crash(
    req: HttpRequest,
    report: web::Json<ReportCrashRequest>,
) -> ActixResult<HttpResponse> {
    CRASH_LOG_SERVICE.report_crash(&req, report.into_inner()).await
}

pub async fn list_crash_logs(
    req: HttpRequest,
    query: web::Query<CrashLogListParams>,
) -> ActixResult<HttpResponse> {
    CRASH_LOG_SERVICE.list_crash_logs(&req, query.into_inner()).await
}

pub async fn get_crash_log(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    CRASH_LOG_SERVICE.get_crash_log(&req, id.0).await
}

pub async fn resolve_crash_log(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<ResolveCrashRequest>,
) -> ActixResult<HttpResponse> {
    CRASH_LOG_SERVICE
        .resolve_crash_log(&req, id.0, body.into_inner())
        .await
}

pub async fn delete_crash_log(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    CRASH_LOG_SERVICE.delete_crash_log(&req, id.0).await
}

pub async fn purge_resolved(req: HttpRequest) -> ActixResult<HttpResponse> {
    CRASH_LOG_SERVICE.purge_resolved(&req).await
}

pub fn configure_crash_logs_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/crash-logs")
            .service(
                web::resource("")
                    // 公开上报，携带有效 token 时关联用户
                    .route(web::post().to(report_crash).wrap(RateLimit::crash_report()))
                    .route(
                        web::get()
                            .to(list_crash_logs)
                            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles()))
                            .wrap(middlewares::RequireJWT),
                    ),
            )
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles()))
                    .wrap(middlewares::RequireJWT)
                    .route("/resolved", web::delete().to(purge_resolved))
                    .service(
                        web::resource("/{id}")
                            .route(web::get().to(get_crash_log))
                            .route(web::delete().to(delete_crash_log)),
                    )
                    .route("/{id}/resolve", web::put().to(resolve_crash_log)),
            ),
    );
}
