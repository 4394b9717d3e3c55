use std::path::Path;
use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse};
use chrono::Utc;

use super::manage::remove_backup;
use super::{BackupService, snapshot};
use crate::errors::Result;
use crate::mail::{EmailAttachment, EmailTemplate, Mailer, OutgoingEmail};
use crate::models::{
    ApiResponse, ErrorCode,
    backups::{
        entities::Backup,
        requests::{CreateBackupRequest, EmailBackupRequest, NewBackup},
        responses::BackupCreatedResponse,
    },
};
use crate::services::system::DynamicConfig;
use crate::services::{Reply, current_user, get_mailer, internal, reject};
use crate::storage::Storage;
use crate::utils::validate::{normalize_email, validate_email};

pub const NOTE_MAX: usize = 500;

fn failed(context: &'static str) -> impl FnOnce(crate::errors::ClassHubError) -> HttpResponse {
    move |e| {
        tracing::error!("{context}: {e}");
        reject(
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorCode::BackupFailed,
            format!("{context}: {}", e.message()),
        )
    }
}

fn check_recipient(raw: &str) -> std::result::Result<String, HttpResponse> {
    let email = normalize_email(raw);
    validate_email(&email)
        .map_err(|msg| reject(StatusCode::BAD_REQUEST, ErrorCode::UserEmailInvalid, msg))?;
    Ok(email)
}

/// 同步发送备份邮件，调用方负责报告失败
async fn send_backup_email(mailer: Arc<dyn Mailer>, backup: &Backup, to: &str) -> Result<()> {
    let content = tokio::fs::read(snapshot::backup_path(&backup.file_name)).await?;
    let template = EmailTemplate::BackupCompleted {
        file_name: backup.file_name.clone(),
        size_bytes: backup.file_size,
        created_at: backup.created_at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        note: backup.note.clone(),
    };
    let rendered = template.render(&DynamicConfig::system_name().await)?;
    let email = OutgoingEmail::from_rendered(to, rendered).with_attachment(EmailAttachment {
        file_name: backup.file_name.clone(),
        content_type: "application/json".to_string(),
        content,
    });
    mailer.send(email).await
}

/// 删除超出保留数量的旧备份，返回删除的数量
pub(crate) async fn prune_stale(storage: &dyn Storage, dir: &Path, keep: usize) -> usize {
    let stale = match storage.list_backups_beyond(keep).await {
        Ok(stale) => stale,
        Err(e) => {
            tracing::warn!("Failed to list stale backups: {e}");
            return 0;
        }
    };
    let mut pruned = 0;
    for backup in stale {
        match remove_backup(storage, dir, &backup).await {
            Ok(()) => {
                tracing::info!("Pruned old backup {}", backup.file_name);
                pruned += 1;
            }
            Err(e) => tracing::warn!("Failed to prune backup {}: {e}", backup.file_name),
        }
    }
    pruned
}

pub async fn create_backup(
    service: &BackupService,
    request: &HttpRequest,
    backup: CreateBackupRequest,
) -> Reply {
    let user = current_user(request)?;
    let storage = service.get_storage(request);

    let note = backup.note.map(|n| n.trim().to_string()).filter(|n| !n.is_empty());
    if note.as_ref().is_some_and(|n| n.chars().count() > NOTE_MAX) {
        return Err(reject(
            StatusCode::BAD_REQUEST,
            ErrorCode::BadRequest,
            format!("note must be at most {NOTE_MAX} characters"),
        ));
    }
    let email_to = backup.email_to.as_deref().map(check_recipient).transpose()?;

    let now = Utc::now();
    let tables = storage
        .export_snapshot()
        .await
        .map_err(failed("Failed to export data"))?;
    let content = snapshot::render(&tables, now).map_err(failed("Failed to serialize backup"))?;

    let dir = snapshot::backup_dir();
    let file_name = snapshot::write_new_file(&dir, now, &content)
        .await
        .map_err(failed("Failed to write backup file"))?;
    let path = dir.join(&file_name);

    let record = match storage
        .create_backup_record(NewBackup {
            file_name,
            file_size: content.len() as i64,
            note,
            created_by: user.id,
        })
        .await
    {
        Ok(record) => record,
        Err(e) => {
            let _ = tokio::fs::remove_file(&path).await;
            return Err(internal("Failed to record backup")(e));
        }
    };
    tracing::info!("Backup {} created by {} ({} bytes)", record.file_name, user.id, record.file_size);

    prune_stale(storage.as_ref(), &dir, DynamicConfig::max_backups().await).await;

    let mut message = "Backup created successfully".to_string();
    let mut emailed_to = None;
    if let Some(to) = email_to {
        match send_backup_email(get_mailer(request), &record, &to).await {
            Ok(()) => emailed_to = Some(to),
            Err(e) => {
                tracing::error!("Failed to email backup {} to {to}: {e}", record.file_name);
                message = format!("Backup created, but the email could not be sent: {}", e.message());
            }
        }
    }

    Ok(HttpResponse::Created().json(ApiResponse::success(
        BackupCreatedResponse {
            table_counts: snapshot::table_counts(&tables),
            backup: record,
            emailed_to,
        },
        message,
    )))
}

pub async fn email_backup(
    service: &BackupService,
    request: &HttpRequest,
    id: i64,
    email: EmailBackupRequest,
) -> Reply {
    let user = current_user(request)?;
    let storage = service.get_storage(request);

    let to = check_recipient(&email.email_to)?;
    let backup = storage
        .get_backup_by_id(id)
        .await
        .map_err(internal("Failed to get backup"))?
        .ok_or_else(|| reject(StatusCode::NOT_FOUND, ErrorCode::BackupNotFound, "Backup not found"))?;

    if let Err(e) = send_backup_email(get_mailer(request), &backup, &to).await {
        tracing::error!("Failed to email backup {} to {to}: {e}", backup.file_name);
        return Err(reject(
            StatusCode::BAD_GATEWAY,
            ErrorCode::MailDeliveryFailed,
            format!("Failed to send backup email: {}", e.message()),
        ));
    }

    tracing::info!("Backup {} emailed to {} by {}", backup.file_name, to, user.id);
    Ok(HttpResponse::Ok().json(ApiResponse::success(backup, "Backup email sent")))
}

#[cfg(test)]
mod tests {
    use super::*;
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

    async fn saved(s: &SeaOrmStorage, dir: &Path, admin: i64, now: chrono::DateTime<Utc>) -> Backup {
        let file_name = snapshot::write_new_file(dir, now, b"{}").await.unwrap();
        s.create_backup_record(NewBackup {
            file_name,
            file_size: 2,
            note: None,
            created_by: admin,
        })
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_same_second_backups_both_survive() {
        let (s, admin) = storage_with_admin().await;
        let dir = std::env::temp_dir().join(format!("classhub-create-{}", uuid::Uuid::new_v4().simple()));
        let now = Utc::now();

        let first = saved(&s, &dir, admin, now).await;
        let second = saved(&s, &dir, admin, now).await;
        assert_ne!(first.file_name, second.file_name);
        assert!(dir.join(&first.file_name).exists());
        assert!(dir.join(&second.file_name).exists());
        assert!(s.get_backup_by_id(first.id).await.unwrap().is_some());

        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }

    #[tokio::test]
    async fn test_prune_removes_oldest_files_and_records() {
        let (s, admin) = storage_with_admin().await;
        let dir = std::env::temp_dir().join(format!("classhub-prune-{}", uuid::Uuid::new_v4().simple()));
        let now = Utc::now();

        let mut backups = Vec::new();
        for _ in 0..4 {
            backups.push(saved(&s, &dir, admin, now).await);
        }
        // 最旧的一个文件已被手动删掉
        tokio::fs::remove_file(dir.join(&backups[0].file_name)).await.unwrap();

        assert_eq!(prune_stale(&s, &dir, 2).await, 2);
        for old in &backups[..2] {
            assert!(!dir.join(&old.file_name).exists());
            assert!(s.get_backup_by_id(old.id).await.unwrap().is_none());
        }
        for kept in &backups[2..] {
            assert!(dir.join(&kept.file_name).exists());
            assert!(s.get_backup_by_id(kept.id).await.unwrap().is_some());
        }
        assert_eq!(prune_stale(&s, &dir, 2).await, 0);

        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }
}
