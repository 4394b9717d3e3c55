use actix_multipart::{Field, Multipart};
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse};
use futures_util::{StreamExt, TryStreamExt};
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use super::FileService;
use crate::config::AppConfig;
use crate::models::{
    ApiResponse, ErrorCode,
    files::{requests::NewFile, responses::FileUploadResponse},
};
use crate::services::system::DynamicConfig;
use crate::services::{Reply, current_user, internal, reject};
use crate::utils::file_magic::extension_of;
use crate::utils::random_code::generate_secure_token;
use crate::utils::validate_magic_bytes;

/// 原始文件名只保留最后一段，并限制长度
fn clean_file_name(raw: &str) -> String {
    let name = raw.rsplit(['/', '\\']).next().unwrap_or_default().trim();
    name.chars().filter(|c| !c.is_control()).take(255).collect()
}

fn is_allowed(extension: &str, allowed: &[String]) -> bool {
    allowed.iter().any(|t| t.eq_ignore_ascii_case(extension))
}

fn upload_error(status: StatusCode, code: ErrorCode, message: &str) -> HttpResponse {
    reject(status, code, message)
}

struct SavedFile {
    original_name: String,
    stored_name: String,
    size: i64,
    content_type: String,
}

/// 写入单个文件字段；任何校验失败都会删除半成品
async fn save_field(
    field: &mut Field,
    upload_dir: &Path,
    allowed_types: &[String],
    max_size: usize,
) -> Result<SavedFile, HttpResponse> {
    let original_name = clean_file_name(
        field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .unwrap_or_default(),
    );
    let extension = extension_of(&original_name)
        .filter(|ext| is_allowed(ext, allowed_types))
        .ok_or_else(|| {
            upload_error(
                StatusCode::BAD_REQUEST,
                ErrorCode::FileTypeNotAllowed,
                "File type not allowed",
            )
        })?;
    let content_type = field
        .content_type()
        .map(|ct| ct.to_string())
        .unwrap_or_else(|| "application/octet-stream".to_string());

    let stored_name = format!("{}-{}{}", chrono::Utc::now().timestamp(), Uuid::new_v4().simple(), extension);
    let path: PathBuf = upload_dir.join(&stored_name);
    let mut file = tokio::fs::File::create(&path).await.map_err(|e| {
        tracing::error!("Failed to create upload file {}: {e}", path.display());
        upload_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorCode::FileUploadFailed,
            "Failed to create file",
        )
    })?;

    let result = async {
        let mut total: usize = 0;
        let mut first_chunk = true;
        while let Some(chunk) = field.next().await {
            let data = chunk.map_err(|e| {
                tracing::warn!("Multipart stream error: {e}");
                upload_error(
                    StatusCode::BAD_REQUEST,
                    ErrorCode::MuitipartFormError,
                    "Malformed multipart body",
                )
            })?;
            if first_chunk {
                first_chunk = false;
                if !validate_magic_bytes(&data, &extension) {
                    return Err(upload_error(
                        StatusCode::BAD_REQUEST,
                        ErrorCode::FileTypeNotAllowed,
                        "File content does not match its extension",
                    ));
                }
            }
            total += data.len();
            if total > max_size {
                return Err(upload_error(
                    StatusCode::PAYLOAD_TOO_LARGE,
                    ErrorCode::FileSizeExceeded,
                    "File size exceeds the limit",
                ));
            }
            file.write_all(&data).await.map_err(|e| {
                tracing::error!("Failed to write upload file: {e}");
                upload_error(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::FileUploadFailed,
                    "Failed to write file",
                )
            })?;
        }
        if first_chunk {
            return Err(upload_error(
                StatusCode::BAD_REQUEST,
                ErrorCode::FileUploadFailed,
                "Uploaded file is empty",
            ));
        }
        file.flush().await.map_err(|e| {
            tracing::error!("Failed to flush upload file: {e}");
            upload_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorCode::FileUploadFailed,
                "Failed to write file",
            )
        })?;
        Ok::<i64, HttpResponse>(total as i64)
    }
    .await;
    drop(file);

    match result {
        Ok(size) => Ok(SavedFile {
            original_name,
            stored_name,
            size,
            content_type,
        }),
        Err(response) => {
            let _ = tokio::fs::remove_file(&path).await;
            Err(response)
        }
    }
}

pub async fn handle_upload(
    service: &FileService,
    request: &HttpRequest,
    mut payload: Multipart,
) -> Reply {
    let user = current_user(request)?;
    let storage = service.get_storage(request);

    let upload_dir = PathBuf::from(&AppConfig::get().upload.dir);
    let max_size = DynamicConfig::upload_max_size().await;
    let allowed_types = DynamicConfig::upload_allowed_types().await;

    tokio::fs::create_dir_all(&upload_dir).await.map_err(|e| {
        tracing::error!("Failed to create upload dir {}: {e}", upload_dir.display());
        upload_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorCode::FileUploadFailed,
            "Failed to prepare upload directory",
        )
    })?;

    let mut saved: Option<SavedFile> = None;
    loop {
        let mut field = match payload.try_next().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                tracing::warn!("Multipart parse error: {e}");
                if let Some(file) = &saved {
                    let _ = tokio::fs::remove_file(upload_dir.join(&file.stored_name)).await;
                }
                return Err(upload_error(
                    StatusCode::BAD_REQUEST,
                    ErrorCode::MuitipartFormError,
                    "Malformed multipart body",
                ));
            }
        };
        let is_file = field
            .content_disposition()
            .and_then(|cd| cd.get_name())
            .is_some_and(|name| name == "file");
        if !is_file {
            continue;
        }
        if let Some(file) = &saved {
            let _ = tokio::fs::remove_file(upload_dir.join(&file.stored_name)).await;
            return Err(upload_error(
                StatusCode::BAD_REQUEST,
                ErrorCode::BadRequest,
                "Only one file can be uploaded at a time",
            ));
        }
        saved = Some(save_field(&mut field, &upload_dir, &allowed_types, max_size).await?);
    }

    let saved = saved.ok_or_else(|| {
        upload_error(
            StatusCode::BAD_REQUEST,
            ErrorCode::FileNotFound,
            "No file found in upload payload",
        )
    })?;

    let stored_name = saved.stored_name.clone();
    let file = match storage
        .create_file(NewFile {
            token: generate_secure_token(),
            original_name: saved.original_name,
            stored_name: saved.stored_name,
            file_size: saved.size,
            file_type: saved.content_type,
            user_id: user.id,
        })
        .await
    {
        Ok(file) => file,
        Err(e) => {
            let _ = tokio::fs::remove_file(upload_dir.join(&stored_name)).await;
            return Err(internal("Failed to register uploaded file")(e));
        }
    };

    tracing::info!("User {} uploaded {} ({} bytes)", user.id, file.original_name, file.file_size);
    Ok(HttpResponse::Created().json(ApiResponse::success(
        FileUploadResponse {
            token: file.token,
            file_name: file.original_name,
            size: file.file_size,
            content_type: file.file_type,
            uploaded_at: file.uploaded_at,
        },
        "File uploaded successfully",
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_file_name() {
        assert_eq!(clean_file_name("report.pdf"), "report.pdf");
        assert_eq!(clean_file_name("../../etc/passwd"), "passwd");
        assert_eq!(clean_file_name("C:\\Users\\ann\\notes.txt"), "notes.txt");
        assert_eq!(clean_file_name("a\u{0007}b.png"), "ab.png");
    }

    #[test]
    fn test_extension_allow_list() {
        let allowed = vec![".pdf".to_string(), ".PNG".to_string()];
        assert!(is_allowed(".pdf", &allowed));
        assert!(is_allowed(".png", &allowed));
        assert!(!is_allowed(".exe", &allowed));
    }
}
