use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::attendance::requests::{
    CheckInRequest, CreateSessionRequest, SessionListParams, SetRecordRequest,
};
use crate::services::AttendanceService;
use crate::utils::{SafeClassIdI64, SafeIDI64, SafeStudentIdI64};

static ATTENDANCE_SERVICE: Lazy<AttendanceService> = Lazy::new(AttendanceService::new_lazy);

pub async fn list_sessions(
    req: HttpRequest,
    class_id: SafeClassIdI64,
    query: web::Query<SessionListParams>,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE
        .list_sessions(&req, class_id.0, query.into_inner())
        .await
}

pub async fn create_session(
    req: HttpRequest,
    class_id: SafeClassIdI64,
    session: web::Json<CreateSessionRequest>,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE
        .create_session(&req, class_id.0, session.into_inner())
        .await
}

pub async fn get_summary(req: HttpRequest, class_id: SafeClassIdI64) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE.get_summary(&req, class_id.0).await
}

pub async fn get_session(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE.get_session(&req, id.0).await
}

pub async fn close_session(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE.close_session(&req, id.0).await
}

pub async fn delete_session(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE.delete_session(&req, id.0).await
}

pub async fn check_in(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<CheckInRequest>,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE.check_in(&req, id.0, body.into_inner()).await
}

pub async fn get_roster(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE.get_roster(&req, id.0).await
}

pub async fn set_record(
    req: HttpRequest,
    path: web::Path<(SafeIDI64, SafeStudentIdI64)>,
    body: web::Json<SetRecordRequest>,
) -> ActixResult<HttpResponse> {
    let (id, student_id) = path.into_inner();
    ATTENDANCE_SERVICE
        .set_record(&req, id.0, student_id.0, body.into_inner())
        .await
}

/// 挂在 `/api/v1/classes` 下
pub fn configure_class_scoped(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/{class_id}/attendance")
            .route(web::get().to(list_sessions))
            .route(web::post().to(create_session)),
    )
    .route("/{class_id}/attendance/summary", web::get().to(get_summary));
}

pub fn configure_attendance_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/attendance")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_session))
                    .route(web::delete().to(delete_session)),
            )
            .route("/{id}/close", web::post().to(close_session))
            .route("/{id}/check-in", web::post().to(check_in))
            .route("/{id}/records", web::get().to(get_roster))
            .route("/{id}/records/{student_id}", web::put().to(set_record)),
    );
}
