use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::backups::requests::{BackupListParams, CreateBackupRequest, EmailBackupRequest};
use crate::models::users::entities::UserRole;
use crate::services::BackupService;
use crate::utils::SafeIDI64;

static BACKUP_SERVICE: Lazy<BackupService> = Lazy::new(BackupService::new_lazy);

pub async fn list_backups(
    req: HttpRequest,
    query: web::Query<BackupListParams>,
) -> ActixResult<HttpResponse> {
    BACKUP_SERVICE.list_backups(&req, query.into_inner()).await
}

pub async fn create_backup(
    req: HttpRequest,
    body: Option<web::Json<CreateBackupRequest>>,
) -> ActixResult<HttpResponse> {
    let body = body.map(web::Json::into_inner).unwrap_or_default();
    BACKUP_SERVICE.create_backup(&req, body).await
}

pub async fn download_backup(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    BACKUP_SERVICE.download_backup(&req, id.0).await
}

pub async fn email_backup(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<EmailBackupRequest>,
) -> ActixResult<HttpResponse> {
    BACKUP_SERVICE.email_backup(&req, id.0, body.into_inner()).await
}

pub async fn delete_backup(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    BACKUP_SERVICE.delete_backup(&req, id.0).await
}

// 不提供从接口恢复备份
pub fn configure_backups_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/backups")
            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles()))
            .wrap(middlewares::RequireJWT)
            .route("", web::get().to(list_backups))
            .route("", web::post().to(create_backup))
            .route("/{id}", web::delete().to(delete_backup))
            .route("/{id}/download", web::get().to(download_backup))
            .route("/{id}/email", web::post().to(email_backup)),
    );
}
