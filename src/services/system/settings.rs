use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse};

use super::{DynamicConfig, SystemService};
use crate::config::AppConfig;
use crate::errors::ClassHubError;
use crate::models::{
    ApiResponse, ErrorCode,
    system::{
        entities::{KnownSettingKey, SettingValueType},
        requests::{BatchUpdateSettingsRequest, SettingAuditQuery, UpdateSettingRequest},
        responses::{AdminSettingsListResponse, SystemSettingsResponse},
    },
};
use crate::services::{Reply, client_ip, current_user, internal, reject};

/// 校验配置键与值，返回规范化后的值
fn check_setting(key: &str, value: &str) -> Result<String, String> {
    let known: KnownSettingKey = key.parse()?;
    let value_type = known.value_type();
    value_type.validate(value)?;

    let normalized = match value_type {
        SettingValueType::String => value.trim().to_string(),
        SettingValueType::Integer => {
            let parsed: i64 = value.trim().parse().map_err(|_| format!("'{value}' is not an integer"))?;
            if parsed <= 0 {
                return Err(format!("{key} must be a positive integer"));
            }
            parsed.to_string()
        }
        SettingValueType::Boolean => value.trim().to_string(),
        SettingValueType::JsonArray => value.to_string(),
    };
    if known == KnownSettingKey::SystemName && normalized.is_empty() {
        return Err("System name must not be empty".to_string());
    }
    Ok(normalized)
}

fn invalid(message: String) -> HttpResponse {
    reject(StatusCode::BAD_REQUEST, ErrorCode::SettingInvalid, message)
}

fn storage_error(e: ClassHubError) -> HttpResponse {
    match e {
        ClassHubError::NotFound(msg) => reject(StatusCode::NOT_FOUND, ErrorCode::SettingNotFound, msg),
        other => internal("Failed to update setting")(other),
    }
}

/// 公开系统信息（只读）
pub async fn get_settings(_service: &SystemService, _request: &HttpRequest) -> Reply {
    let config = AppConfig::get();

    let response = SystemSettingsResponse {
        system_name: DynamicConfig::system_name().await,
        max_file_size: DynamicConfig::upload_max_size().await as u64,
        allowed_file_types: DynamicConfig::upload_allowed_types().await,
        allow_registration: DynamicConfig::allow_registration().await,
        environment: config.app.environment.clone(),
        server_time: chrono::Utc::now(),
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        response,
        "Settings retrieved successfully",
    )))
}

pub async fn get_admin_settings(service: &SystemService, request: &HttpRequest) -> Reply {
    let storage = service.get_storage(request);

    let settings = storage
        .list_all_settings()
        .await
        .map_err(internal("Failed to list settings"))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        AdminSettingsListResponse { settings },
        "Admin settings retrieved successfully",
    )))
}

pub async fn update_setting(
    service: &SystemService,
    request: &HttpRequest,
    key: String,
    update: UpdateSettingRequest,
) -> Reply {
    let user = current_user(request)?;
    let storage = service.get_storage(request);

    let value = check_setting(&key, &update.value).map_err(invalid)?;

    let setting = storage
        .update_setting(&key, &value, user.id, client_ip(request))
        .await
        .map_err(storage_error)?;

    DynamicConfig::update(&key, &value).await;
    tracing::info!("Setting {} updated by {}", key, user.id);

    Ok(HttpResponse::Ok().json(ApiResponse::success(setting, "Setting updated successfully")))
}

/// 批量更新：先全部校验，任一非法则整体拒绝
pub async fn batch_update_settings(
    service: &SystemService,
    request: &HttpRequest,
    batch: BatchUpdateSettingsRequest,
) -> Reply {
    let user = current_user(request)?;
    let storage = service.get_storage(request);

    if batch.settings.is_empty() {
        return Err(invalid("No settings to update".to_string()));
    }
    let updates = batch
        .settings
        .into_iter()
        .map(|item| check_setting(&item.key, &item.value).map(|value| (item.key, value)))
        .collect::<Result<Vec<_>, _>>()
        .map_err(invalid)?;

    let settings = storage
        .batch_update_settings(updates.clone(), user.id, client_ip(request))
        .await
        .map_err(storage_error)?;

    for (key, value) in &updates {
        DynamicConfig::update(key, value).await;
    }
    tracing::info!("{} settings updated by {}", updates.len(), user.id);

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        AdminSettingsListResponse { settings },
        "Settings updated successfully",
    )))
}

pub async fn get_setting_audits(
    service: &SystemService,
    request: &HttpRequest,
    query: SettingAuditQuery,
) -> Reply {
    let storage = service.get_storage(request);

    let audits = storage
        .list_setting_audits(query)
        .await
        .map_err(internal("Failed to list setting audits"))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        audits,
        "Setting audits retrieved successfully",
    )))
}

#[cfg(test)]
mod tests {
    use super::check_setting;

    #[test]
    fn test_check_setting_normalizes() {
        assert_eq!(check_setting("upload.max_size", " 1048576 ").unwrap(), "1048576");
        assert_eq!(check_setting("app.system_name", " ClassHub ").unwrap(), "ClassHub");
        assert_eq!(check_setting("auth.allow_registration", "false").unwrap(), "false");
    }

    #[test]
    fn test_check_setting_rejects() {
        assert!(check_setting("cors.max_age", "10").is_err());
        assert!(check_setting("backup.max_backups", "0").is_err());
        assert!(check_setting("jwt.access_token_expiry", "soon").is_err());
        assert!(check_setting("upload.allowed_types", ".pdf").is_err());
        assert!(check_setting("app.system_name", "   ").is_err());
    }
}
