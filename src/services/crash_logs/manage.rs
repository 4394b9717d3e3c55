use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse};

use super::CrashLogService;
use crate::models::{
    ApiResponse, ErrorCode,
    crash_logs::{
        requests::{CrashLogListParams, CrashLogListQuery, ResolveCrashRequest},
        responses::PurgeResponse,
    },
};
use crate::services::{Reply, current_user, internal, reject};

fn not_found() -> HttpResponse {
    reject(StatusCode::NOT_FOUND, ErrorCode::CrashLogNotFound, "Crash log not found")
}

pub async fn list_crash_logs(
    service: &CrashLogService,
    request: &HttpRequest,
    query: CrashLogListParams,
) -> Reply {
    let storage = service.get_storage(request);

    let response = storage
        .list_crash_logs_with_pagination(CrashLogListQuery {
            page: Some(query.pagination.page),
            size: Some(query.pagination.size),
            resolved: query.resolved,
            search: query.search.filter(|s| !s.trim().is_empty()),
        })
        .await
        .map_err(internal("Failed to list crash logs"))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(response, "Crash logs retrieved")))
}

pub async fn get_crash_log(service: &CrashLogService, request: &HttpRequest, id: i64) -> Reply {
    let storage = service.get_storage(request);

    let log = storage
        .get_crash_log_by_id(id)
        .await
        .map_err(internal("Failed to get crash log"))?
        .ok_or_else(not_found)?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(log, "Crash log retrieved")))
}

pub async fn resolve_crash_log(
    service: &CrashLogService,
    request: &HttpRequest,
    id: i64,
    resolve: ResolveCrashRequest,
) -> Reply {
    let user = current_user(request)?;
    let storage = service.get_storage(request);

    let log = storage
        .set_crash_log_resolved(id, resolve.resolved, user.id)
        .await
        .map_err(internal("Failed to update crash log"))?
        .ok_or_else(not_found)?;

    tracing::info!("Crash log {} resolved={} by {}", log.id, log.resolved, user.id);
    Ok(HttpResponse::Ok().json(ApiResponse::success(log, "Crash log updated")))
}

pub async fn delete_crash_log(service: &CrashLogService, request: &HttpRequest, id: i64) -> Reply {
    let storage = service.get_storage(request);

    let deleted = storage
        .delete_crash_log(id)
        .await
        .map_err(internal("Failed to delete crash log"))?;
    if !deleted {
        return Err(not_found());
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Crash log deleted")))
}

pub async fn purge_resolved(service: &CrashLogService, request: &HttpRequest) -> Reply {
    let user = current_user(request)?;
    let storage = service.get_storage(request);

    let deleted = storage
        .purge_resolved_crash_logs()
        .await
        .map_err(internal("Failed to purge crash logs"))?;

    tracing::info!("{} resolved crash logs purged by {}", deleted, user.id);
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        PurgeResponse { deleted },
        "Resolved crash logs purged",
    )))
}
