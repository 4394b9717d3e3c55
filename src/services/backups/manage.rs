use std::path::Path;

use actix_web::http::{StatusCode, header};
use actix_web::{HttpRequest, HttpResponse};

use super::{BackupService, snapshot};
use crate::errors::Result;
use crate::models::{
    ApiResponse, ErrorCode,
    backups::{entities::Backup, requests::BackupListParams},
};
use crate::services::{Reply, current_user, internal, reject};
use crate::storage::Storage;

fn not_found() -> HttpResponse {
    reject(StatusCode::NOT_FOUND, ErrorCode::BackupNotFound, "Backup not found")
}

/// 先删文件再删记录，文件已不存在时照样删除记录
pub(crate) async fn remove_backup(storage: &dyn Storage, dir: &Path, backup: &Backup) -> Result<()> {
    if snapshot::is_backup_file_name(&backup.file_name)
        && let Err(e) = tokio::fs::remove_file(dir.join(&backup.file_name)).await
    {
        if e.kind() != std::io::ErrorKind::NotFound {
            return Err(e.into());
        }
        tracing::warn!("Backup file {} already missing on disk", backup.file_name);
    }
    storage.delete_backup_record(backup.id).await?;
    Ok(())
}

pub async fn list_backups(
    service: &BackupService,
    request: &HttpRequest,
    query: BackupListParams,
) -> Reply {
    let storage = service.get_storage(request);

    let response = storage
        .list_backups_with_pagination(Some(query.pagination.page), Some(query.pagination.size))
        .await
        .map_err(internal("Failed to list backups"))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(response, "Backups retrieved")))
}

pub async fn download_backup(service: &BackupService, request: &HttpRequest, id: i64) -> Reply {
    let storage = service.get_storage(request);

    let backup = storage
        .get_backup_by_id(id)
        .await
        .map_err(internal("Failed to get backup"))?
        .filter(|b| snapshot::is_backup_file_name(&b.file_name))
        .ok_or_else(not_found)?;

    let body = match tokio::fs::read(snapshot::backup_path(&backup.file_name)).await {
        Ok(body) => body,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::warn!("Backup file {} missing on disk", backup.file_name);
            return Err(not_found());
        }
        Err(e) => return Err(internal("Failed to read backup file")(e.into())),
    };

    Ok(HttpResponse::Ok()
        .insert_header((header::CONTENT_TYPE, "application/json"))
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", backup.file_name),
        ))
        .body(body))
}

pub async fn delete_backup(service: &BackupService, request: &HttpRequest, id: i64) -> Reply {
    let user = current_user(request)?;
    let storage = service.get_storage(request);

    let backup = storage
        .get_backup_by_id(id)
        .await
        .map_err(internal("Failed to get backup"))?
        .ok_or_else(not_found)?;

    remove_backup(storage.as_ref(), &snapshot::backup_dir(), &backup)
        .await
        .map_err(internal("Failed to delete backup"))?;

    tracing::info!("Backup {} deleted by {}", backup.file_name, user.id);
    Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Backup deleted")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::backups::requests::NewBackup;
    use crate::models::users::{entities::UserRole, requests::CreateUserRequest};
    use crate::storage::sea_orm_storage::SeaOrmStorage;
    use sea_orm::{ConnectOptions, Database};

    async fn storage_with_admin() -> (SeaOrmStorage, i64) {
        let mut opt = ConnectOptions::new("sqlite::memory:");
        opt.max_connections(1).min_connections(1).sqlx_logging(false);
        let s = SeaOrmStorage::from_connection(Database::connect(opt).await.unwrap())
            .await
            .unwrap();
        let admin = s
            .create_user(CreateUserRequest {
                username: "root".to_string(),
                email: "root@example.com".to_string(),
                password: "Secret123".to_string(),
                role: UserRole::Admin,
                display_name: None,
                avatar_url: None,
            })
            .await
            .unwrap();
        (s, admin.id)
    }

    #[tokio::test]
    async fn test_remove_backup_with_missing_file() {
        let (s, admin) = storage_with_admin().await;
        let dir = std::env::temp_dir().join(format!("classhub-remove-{}", uuid::Uuid::new_v4().simple()));
        let record = s
            .create_backup_record(NewBackup {
                file_name: snapshot::backup_file_name(chrono::Utc::now()),
                file_size: 2,
                note: None,
                created_by: admin,
            })
            .await
            .unwrap();

        remove_backup(&s, &dir, &record).await.unwrap();
        assert!(s.get_backup_by_id(record.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_remove_backup_deletes_file_and_record() {
        let (s, admin) = storage_with_admin().await;
        let dir = std::env::temp_dir().join(format!("classhub-remove-{}", uuid::Uuid::new_v4().simple()));
        let file_name = snapshot::write_new_file(&dir, chrono::Utc::now(), b"{}").await.unwrap();
        let record = s
            .create_backup_record(NewBackup {
                file_name: file_name.clone(),
                file_size: 2,
                note: None,
                created_by: admin,
            })
            .await
            .unwrap();

        remove_backup(&s, &dir, &record).await.unwrap();
        assert!(!dir.join(&file_name).exists());
        assert!(s.get_backup_by_id(record.id).await.unwrap().is_none());
        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }
}
