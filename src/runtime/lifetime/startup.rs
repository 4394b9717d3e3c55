use crate::cache::ObjectCache;
use crate::cache::register::{
    debug_object_cache_registry, get_object_cache_plugin, register_builtin_plugins,
};
use crate::config::AppConfig;
use crate::errors::{ClassHubError, Result};
use crate::mail::{Mailer, create_mailer};
use crate::models::users::entities::UserRole;
use crate::models::users::requests::CreateUserRequest;
use crate::services::system::DynamicConfig;
use crate::storage::Storage;
use crate::utils::password::hash_password;
use crate::utils::random_code::generate_code;
use crate::utils::validate::validate_password;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
    pub cache: Arc<dyn ObjectCache>,
    pub mailer: Arc<dyn Mailer>,
}

/// 依次尝试的缓存后端：配置值在前，内存缓存兜底
fn cache_candidates(configured: &str) -> Vec<&str> {
    let mut candidates = vec![configured];
    if configured != "moka" {
        candidates.push("moka");
    }
    candidates
}

async fn create_cache() -> Result<Arc<dyn ObjectCache>> {
    let configured = AppConfig::get().cache.cache_type.as_str();

    for name in cache_candidates(configured) {
        let Some(constructor) = get_object_cache_plugin(name) else {
            warn!("Cache backend '{}' not found in registry", name);
            continue;
        };
        match constructor().await {
            Ok(cache) => {
                if name != configured {
                    warn!("Falling back to {} cache backend", name);
                }
                info!("Using {} cache backend", name);
                return Ok(Arc::from(cache));
            }
            Err(e) => warn!("Failed to create {} cache: {}", name, e),
        }
    }

    Err(ClassHubError::cache_plugin_not_found(format!(
        "No cache backend available (tried: {configured})"
    )))
}

/// 从数据库加载动态配置，失败时回退到静态配置
async fn init_dynamic_config(storage: &Arc<dyn Storage>) {
    let settings = match storage.list_all_settings().await {
        Ok(settings) => settings.into_iter().map(|s| (s.key, s.value)).collect(),
        Err(e) => {
            warn!("Failed to load dynamic config from database: {}, using defaults", e);
            Vec::new()
        }
    };
    DynamicConfig::init(settings).await;
}

/// 随机码字母表同时含字母和数字，重试直到满足密码规则
fn generate_admin_password() -> String {
    loop {
        let candidate = generate_code(16);
        if validate_password(&candidate, None).is_ok() {
            return candidate;
        }
    }
}

/// 数据库没有任何用户时创建默认管理员
async fn seed_admin(storage: &Arc<dyn Storage>) {
    match storage.count_users().await {
        Ok(count) if count > 0 => {
            debug!("Database already has {} user(s), skipping admin seed", count);
            return;
        }
        Ok(_) => info!("No users found in database, creating default admin account..."),
        Err(e) => {
            warn!("Failed to count users: {}, skipping admin seed", e);
            return;
        }
    }

    let password = match std::env::var("ADMIN_PASSWORD") {
        Ok(password) if validate_password(&password, Some("admin")).is_ok() => password,
        other => {
            if other.is_ok() {
                warn!("ADMIN_PASSWORD does not meet the password policy, ignoring it");
            }
            let generated = generate_admin_password();
            warn!("Generated admin password: {}", generated);
            warn!("Save this password or set ADMIN_PASSWORD before the first start");
            generated
        }
    };
    let password_hash = match hash_password(&password) {
        Ok(hash) => hash,
        Err(e) => {
            warn!("Failed to hash admin password: {}, skipping admin seed", e);
            return;
        }
    };

    let admin = CreateUserRequest {
        username: "admin".to_string(),
        email: std::env::var("ADMIN_EMAIL").unwrap_or_else(|_| "admin@localhost".to_string()),
        password: password_hash,
        role: UserRole::Admin,
        display_name: Some("Administrator".to_string()),
        avatar_url: None,
    };
    match storage.create_user(admin).await {
        Ok(user) => info!(
            "Default admin account created (ID: {}, username: {})",
            user.id, user.username
        ),
        Err(e) => warn!("Failed to create admin account: {}", e),
    }
}

/// 确保上传与备份目录存在
async fn prepare_data_dirs() -> Result<()> {
    let config = AppConfig::get();
    for dir in [&config.upload.dir, &config.backup.dir] {
        tokio::fs::create_dir_all(dir).await.map_err(|e| {
            ClassHubError::file_operation(format!("Failed to create directory {dir}: {e}"))
        })?;
        debug!("Data directory ready: {}", dir);
    }
    Ok(())
}

/// 准备服务器启动的上下文：存储、动态配置、缓存与发信器
pub async fn prepare_server_startup() -> Result<StartupContext> {
    // 其他依赖可能已安装过加密提供者
    if rustls::crypto::ring::default_provider()
        .install_default()
        .is_err()
    {
        debug!("rustls crypto provider already installed");
    }

    register_builtin_plugins();
    if cfg!(debug_assertions) {
        debug_object_cache_registry();
    }

    prepare_data_dirs().await?;

    let storage = crate::storage::create_storage().await?;
    warn!("Storage backend initialized and migrations completed");

    init_dynamic_config(&storage).await;
    seed_admin(&storage).await;

    let cache = create_cache().await?;
    let mailer = create_mailer(&AppConfig::get().mail);
    info!("Mailer ready: {}", mailer.name());

    Ok(StartupContext {
        storage,
        cache,
        mailer,
    })
}

#[cfg(test)]
mod tests {
    use super::{cache_candidates, generate_admin_password};
    use crate::utils::validate::validate_password;

    #[test]
    fn test_generated_admin_password_passes_policy() {
        for _ in 0..20 {
            assert!(validate_password(&generate_admin_password(), None).is_ok());
        }
    }

    #[test]
    fn test_cache_candidates() {
        assert_eq!(cache_candidates("redis"), vec!["redis", "moka"]);
        assert_eq!(cache_candidates("moka"), vec!["moka"]);
    }
}
