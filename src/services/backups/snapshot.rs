//! 备份文件格式
//!
//! ```json
//! { "version": 1, "app_version": "0.1.0", "created_at": "...", "tables": { "users": [...] } }
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use crate::config::AppConfig;
use crate::errors::Result;
use crate::storage::TableSnapshot;

pub const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Serialize)]
struct BackupDocument<'a> {
    version: u32,
    app_version: &'static str,
    created_at: DateTime<Utc>,
    tables: &'a TableSnapshot,
}

/// 毫秒时间戳加随机后缀，同一秒内多次备份也不会重名
pub fn backup_file_name(now: DateTime<Utc>) -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("backup-{}-{}.json", now.format("%Y%m%d-%H%M%S%3f"), &suffix[..8])
}

/// 只接受本模块生成的文件名，避免路径穿越
pub fn is_backup_file_name(name: &str) -> bool {
    name.starts_with("backup-")
        && name.ends_with(".json")
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '.')
}

pub fn backup_dir() -> PathBuf {
    PathBuf::from(&AppConfig::get().backup.dir)
}

pub fn backup_path(file_name: &str) -> PathBuf {
    backup_dir().join(file_name)
}

/// 只创建新文件，已存在时返回 AlreadyExists，不覆盖
async fn write_exclusive(path: &Path, content: &[u8]) -> std::io::Result<()> {
    let mut file = tokio::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .await?;
    let written = async {
        file.write_all(content).await?;
        file.flush().await
    }
    .await;
    if written.is_err() {
        drop(file);
        let _ = tokio::fs::remove_file(path).await;
    }
    written
}

/// 在 `dir` 下写入一个新备份文件，返回文件名
pub async fn write_new_file(dir: &Path, now: DateTime<Utc>, content: &[u8]) -> Result<String> {
    tokio::fs::create_dir_all(dir).await?;
    let file_name = backup_file_name(now);
    write_exclusive(&dir.join(&file_name), content).await?;
    Ok(file_name)
}

pub fn render(tables: &TableSnapshot, now: DateTime<Utc>) -> Result<Vec<u8>> {
    let document = BackupDocument {
        version: FORMAT_VERSION,
        app_version: env!("CARGO_PKG_VERSION"),
        created_at: now,
        tables,
    };
    Ok(serde_json::to_vec_pretty(&document)?)
}

pub fn table_counts(tables: &TableSnapshot) -> BTreeMap<String, usize> {
    tables
        .iter()
        .map(|(name, rows)| (name.clone(), rows.len()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::{Value, json};

    fn scratch_dir() -> PathBuf {
        std::env::temp_dir().join(format!("classhub-snapshot-{}", Uuid::new_v4().simple()))
    }

    #[test]
    fn test_file_name() {
        let now = Utc.with_ymd_and_hms(2026, 3, 9, 7, 5, 0).unwrap();
        let name = backup_file_name(now);
        assert!(name.starts_with("backup-20260309-070500000-"), "{name}");
        assert_eq!(name.len(), "backup-20260309-070500000-".len() + 8 + ".json".len());
        assert!(is_backup_file_name(&name));
        assert!(!is_backup_file_name("../backup-1.json"));
        assert!(!is_backup_file_name("notes.json"));
    }

    #[test]
    fn test_same_instant_names_differ() {
        let now = Utc::now();
        let first = backup_file_name(now);
        let second = backup_file_name(now);
        assert_ne!(first, second);
        assert!(is_backup_file_name(&first));
        assert!(is_backup_file_name(&second));
    }

    #[tokio::test]
    async fn test_write_new_file_keeps_earlier_backup() {
        let dir = scratch_dir();
        let now = Utc::now();

        let first = write_new_file(&dir, now, b"first").await.unwrap();
        let second = write_new_file(&dir, now, b"second").await.unwrap();
        assert_ne!(first, second);
        assert_eq!(tokio::fs::read(dir.join(&first)).await.unwrap(), b"first");
        assert_eq!(tokio::fs::read(dir.join(&second)).await.unwrap(), b"second");

        // 已存在的文件不会被覆盖
        let err = write_exclusive(&dir.join(&first), b"clobber").await.unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::AlreadyExists);
        assert_eq!(tokio::fs::read(dir.join(&first)).await.unwrap(), b"first");

        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }

    #[test]
    fn test_render_document() {
        let mut tables = TableSnapshot::new();
        tables.insert("classes".to_string(), vec![json!({"id": 1}), json!({"id": 2})]);
        tables.insert("notes".to_string(), vec![]);

        let now = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let doc: Value = serde_json::from_slice(&render(&tables, now).unwrap()).unwrap();
        assert_eq!(doc["version"], json!(FORMAT_VERSION));
        assert_eq!(doc["tables"]["classes"][1]["id"], json!(2));

        let counts = table_counts(&tables);
        assert_eq!(counts["classes"], 2);
        assert_eq!(counts["notes"], 0);
    }
}
