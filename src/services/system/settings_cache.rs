//! 动态配置缓存
//!
//! 启动时从 `system_settings` 表加载，管理员修改后热更新。
//! 未设置的项回退到静态配置。

use std::collections::HashMap;
use std::sync::OnceLock;
use tokio::sync::RwLock;

use crate::config::AppConfig;
use crate::models::system::entities::KnownSettingKey;

static DYNAMIC_CONFIG: OnceLock<RwLock<DynamicConfigCache>> = OnceLock::new();

#[derive(Debug, Default)]
struct DynamicConfigCache {
    settings: HashMap<String, String>,
    initialized: bool,
}

/// 动态配置访问接口
pub struct DynamicConfig;

impl DynamicConfig {
    /// 初始化动态配置缓存
    pub async fn init(settings: Vec<(String, String)>) {
        let cache = DYNAMIC_CONFIG.get_or_init(|| RwLock::new(DynamicConfigCache::default()));

        let mut guard = cache.write().await;
        guard.settings = settings.into_iter().collect();
        guard.initialized = true;

        tracing::info!(
            "动态配置缓存初始化完成，加载了 {} 个配置项",
            guard.settings.len()
        );
    }

    /// 更新单个配置项
    pub async fn update(key: &str, value: &str) {
        if let Some(cache) = DYNAMIC_CONFIG.get() {
            let mut guard = cache.write().await;
            guard.settings.insert(key.to_string(), value.to_string());
            tracing::debug!("动态配置更新: {} = {}", key, value);
        }
    }

    async fn get_string(key: KnownSettingKey) -> Option<String> {
        let cache = DYNAMIC_CONFIG.get()?;
        let guard = cache.read().await;
        guard.settings.get(key.as_str()).cloned()
    }

    async fn get_i64(key: KnownSettingKey) -> Option<i64> {
        Self::get_string(key).await.and_then(|v| v.trim().parse().ok())
    }

    async fn get_bool(key: KnownSettingKey) -> Option<bool> {
        Self::get_string(key).await.and_then(|v| parse_bool(&v))
    }

    async fn get_json_array(key: KnownSettingKey) -> Option<Vec<String>> {
        Self::get_string(key)
            .await
            .and_then(|v| serde_json::from_str(&v).ok())
    }

    // ============================================
    // 具体配置项访问方法
    // ============================================

    pub async fn system_name() -> String {
        Self::get_string(KnownSettingKey::SystemName)
            .await
            .unwrap_or_else(|| AppConfig::get().app.system_name.clone())
    }

    /// Access Token 有效期（秒）
    pub async fn access_token_expiry() -> i64 {
        Self::get_i64(KnownSettingKey::AccessTokenExpiry)
            .await
            .unwrap_or_else(|| AppConfig::get().jwt.access_token_expiry)
    }

    /// Refresh Token 有效期（秒）
    pub async fn refresh_token_expiry() -> i64 {
        Self::get_i64(KnownSettingKey::RefreshTokenExpiry)
            .await
            .unwrap_or_else(|| AppConfig::get().jwt.refresh_token_expiry)
    }

    /// 记住我时 Refresh Token 有效期（秒）
    pub async fn refresh_token_remember_me_expiry() -> i64 {
        Self::get_i64(KnownSettingKey::RefreshTokenRememberMeExpiry)
            .await
            .unwrap_or_else(|| AppConfig::get().jwt.refresh_token_remember_me_expiry)
    }

    /// 上传文件大小限制（字节）
    pub async fn upload_max_size() -> usize {
        Self::get_i64(KnownSettingKey::UploadMaxSize)
            .await
            .filter(|v| *v > 0)
            .map(|v| v as usize)
            .unwrap_or_else(|| AppConfig::get().upload.max_size)
    }

    pub async fn upload_allowed_types() -> Vec<String> {
        Self::get_json_array(KnownSettingKey::UploadAllowedTypes)
            .await
            .unwrap_or_else(|| AppConfig::get().upload.allowed_types.clone())
    }

    pub async fn allow_registration() -> bool {
        Self::get_bool(KnownSettingKey::AllowRegistration)
            .await
            .unwrap_or_else(|| AppConfig::get().auth.allow_registration)
    }

    pub async fn notify_class_members() -> bool {
        Self::get_bool(KnownSettingKey::NotifyClassMembers)
            .await
            .unwrap_or_else(|| AppConfig::get().mail.notify_class_members)
    }

    pub async fn max_backups() -> usize {
        Self::get_i64(KnownSettingKey::MaxBackups)
            .await
            .filter(|v| *v > 0)
            .map(|v| v as usize)
            .unwrap_or_else(|| AppConfig::get().backup.max_backups)
    }

    pub async fn is_initialized() -> bool {
        match DYNAMIC_CONFIG.get() {
            Some(cache) => cache.read().await.initialized,
            None => false,
        }
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::parse_bool;

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool("true"), Some(true));
        assert_eq!(parse_bool(" On "), Some(true));
        assert_eq!(parse_bool("0"), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }
}
