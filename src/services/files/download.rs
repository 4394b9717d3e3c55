use actix_web::http::{StatusCode, header};
use actix_web::{HttpRequest, HttpResponse};
use std::path::Path;

use super::FileService;
use crate::config::AppConfig;
use crate::models::ErrorCode;
use crate::services::{Reply, internal, reject};
use crate::utils::content_type_for;
use crate::utils::file_magic::extension_of;

/// Content-Disposition 中的文件名：ASCII 回退加 RFC 5987 编码
fn disposition(file_name: &str) -> String {
    let fallback: String = file_name
        .chars()
        .map(|c| if c.is_ascii_graphic() && c != '"' && c != '\\' { c } else { '_' })
        .collect();
    let encoded: String = file_name
        .bytes()
        .map(|b| match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => (b as char).to_string(),
            _ => format!("%{b:02X}"),
        })
        .collect();
    format!("attachment; filename=\"{fallback}\"; filename*=UTF-8''{encoded}")
}

pub async fn handle_download(service: &FileService, request: &HttpRequest, token: String) -> Reply {
    let storage = service.get_storage(request);
    let not_found = || reject(StatusCode::NOT_FOUND, ErrorCode::FileNotFound, "File not found");

    let file = storage
        .get_file_by_token(&token)
        .await
        .map_err(internal("File query failed"))?
        .ok_or_else(not_found)?;

    let path = Path::new(&AppConfig::get().upload.dir).join(&file.stored_name);
    let body = match tokio::fs::read(&path).await {
        Ok(body) => body,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::warn!("File {} missing on disk: {}", file.id, path.display());
            return Err(not_found());
        }
        Err(e) => return Err(internal("File read failed")(e.into())),
    };

    let content_type = extension_of(&file.original_name)
        .map(|ext| content_type_for(&ext))
        .unwrap_or("application/octet-stream");

    Ok(HttpResponse::Ok()
        .insert_header((header::CONTENT_TYPE, content_type))
        .insert_header((header::CONTENT_DISPOSITION, disposition(&file.original_name)))
        .body(body))
}

#[cfg(test)]
mod tests {
    use super::disposition;

    #[test]
    fn test_disposition_encodes_non_ascii() {
        assert_eq!(
            disposition("a b.pdf"),
            "attachment; filename=\"a_b.pdf\"; filename*=UTF-8''a%20b.pdf"
        );
        let header = disposition("作业.docx");
        assert!(header.contains("filename*=UTF-8''%E4%BD%9C%E4%B8%9A.docx"));
    }
}
