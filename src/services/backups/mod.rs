pub mod create;
pub mod manage;
pub mod snapshot;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{declare_service, finish};
use crate::models::backups::requests::{BackupListParams, CreateBackupRequest, EmailBackupRequest};

declare_service!(BackupService);

impl BackupService {
    pub async fn create_backup(
        &self,
        request: &HttpRequest,
        backup: CreateBackupRequest,
    ) -> ActixResult<HttpResponse> {
        finish(create::create_backup(self, request, backup).await)
    }

    pub async fn list_backups(
        &self,
        request: &HttpRequest,
        query: BackupListParams,
    ) -> ActixResult<HttpResponse> {
        finish(manage::list_backups(self, request, query).await)
    }

    pub async fn download_backup(&self, request: &HttpRequest, id: i64) -> ActixResult<HttpResponse> {
        finish(manage::download_backup(self, request, id).await)
    }

    pub async fn email_backup(
        &self,
        request: &HttpRequest,
        id: i64,
        email: EmailBackupRequest,
    ) -> ActixResult<HttpResponse> {
        finish(create::email_backup(self, request, id, email).await)
    }

    pub async fn delete_backup(&self, request: &HttpRequest, id: i64) -> ActixResult<HttpResponse> {
        finish(manage::delete_backup(self, request, id).await)
    }
}
