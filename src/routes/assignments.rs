use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::assignments::requests::{
    AssignmentListParams, CreateAssignmentRequest, GradeSubmissionRequest, SubmissionListParams,
    SubmitAssignmentRequest, UpdateAssignmentRequest,
};
use crate::services::AssignmentService;
use crate::utils::{SafeClassIdI64, SafeIDI64};

static ASSIGNMENT_SERVICE: Lazy<AssignmentService> = Lazy::new(AssignmentService::new_lazy);

pub async fn list_assignments(
    req: HttpRequest,
    class_id: SafeClassIdI64,
    query: web::Query<AssignmentListParams>,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .list_assignments(&req, class_id.0, query.into_inner())
        .await
}

pub async fn create_assignment(
    req: HttpRequest,
    class_id: SafeClassIdI64,
    assignment: web::Json<CreateAssignmentRequest>,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .create_assignment(&req, class_id.0, assignment.into_inner())
        .await
}

pub async fn get_assignment(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE.get_assignment(&req, id.0).await
}

pub async fn update_assignment(
    req: HttpRequest,
    id: SafeIDI64,
    update: web::Json<UpdateAssignmentRequest>,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .update_assignment(&req, id.0, update.into_inner())
        .await
}

pub async fn delete_assignment(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE.delete_assignment(&req, id.0).await
}

pub async fn submit(
    req: HttpRequest,
    id: SafeIDI64,
    submission: web::Json<SubmitAssignmentRequest>,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .submit(&req, id.0, submission.into_inner())
        .await
}

pub async fn list_submissions(
    req: HttpRequest,
    id: SafeIDI64,
    query: web::Query<SubmissionListParams>,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .list_submissions(&req, id.0, query.into_inner())
        .await
}

pub async fn get_submission(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE.get_submission(&req, id.0).await
}

pub async fn grade_submission(
    req: HttpRequest,
    id: SafeIDI64,
    grade: web::Json<GradeSubmissionRequest>,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .grade_submission(&req, id.0, grade.into_inner())
        .await
}

/// 挂在 `/api/v1/classes` 下
pub fn configure_class_scoped(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/{class_id}/assignments")
            .route(web::get().to(list_assignments))
            .route(web::post().to(create_assignment)),
    );
}

pub fn configure_assignments_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/assignments")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_assignment))
                    .route(web::put().to(update_assignment))
                    .route(web::delete().to(delete_assignment)),
            )
            .service(
                // 学生提交（重复提交覆盖未批改的提交），教师查看提交列表
                web::resource("/{id}/submissions")
                    .route(web::get().to(list_submissions))
                    .route(web::post().to(submit)),
            ),
    )
    .service(
        web::scope("/api/v1/submissions")
            .wrap(middlewares::RequireJWT)
            .route("/{id}", web::get().to(get_submission))
            .route("/{id}/grade", web::put().to(grade_submission)),
    );
}
