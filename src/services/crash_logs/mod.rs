pub mod manage;
pub mod report;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{declare_service, finish};
use crate::models::crash_logs::requests::{CrashLogListParams, ReportCrashRequest, ResolveCrashRequest};

declare_service!(CrashLogService);

impl CrashLogService {
    // 公开接口，携带有效 token 时记录用户
    pub async fn report_crash(
        &self,
        request: &HttpRequest,
        report: ReportCrashRequest,
    ) -> ActixResult<HttpResponse> {
        finish(report::report_crash(self, request, report).await)
    }

    pub async fn list_crash_logs(
        &self,
        request: &HttpRequest,
        query: CrashLogListParams,
    ) -> ActixResult<HttpResponse> {
        finish(manage::list_crash_logs(self, request, query).await)
    }

    pub async fn get_crash_log(&self, request: &HttpRequest, id: i64) -> ActixResult<HttpResponse> {
        finish(manage::get_crash_log(self, request, id).await)
    }

    pub async fn resolve_crash_log(
        &self,
        request: &HttpRequest,
        id: i64,
        resolve: ResolveCrashRequest,
    ) -> ActixResult<HttpResponse> {
        finish(manage::resolve_crash_log(self, request, id, resolve).await)
    }

    pub async fn delete_crash_log(&self, request: &HttpRequest, id: i64) -> ActixResult<HttpResponse> {
        finish(manage::delete_crash_log(self, request, id).await)
    }

    pub async fn purge_resolved(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        finish(manage::purge_resolved(self, request).await)
    }
}
