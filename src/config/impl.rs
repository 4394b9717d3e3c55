use config::{Config, ConfigError, Environment, File};
use std::sync::OnceLock;

use super::AppConfig;

static APP_CONFIG: OnceLock<AppConfig> = OnceLock::new();

const DEFAULT_JWT_SECRET: &str = "change-me-in-production";

impl AppConfig {
    /// 加载配置
    pub fn load() -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            // 首先加载默认配置文件
            .add_source(File::with_name("config").required(false))
            // 然后根据环境加载特定配置文件
            .add_source(
                File::with_name(&format!(
                    "config.{}",
                    std::env::var("APP_ENV").unwrap_or_else(|_| "development".into())
                ))
                .required(false),
            )
            // 最后加载环境变量覆盖
            .add_source(
                Environment::with_prefix("CLASSHUB")
                    .separator("_")
                    .try_parsing(true),
            );

        // 支持从环境变量加载
        builder = builder
            .set_override_option("app.environment", std::env::var("APP_ENV").ok())?
            .set_override_option("app.log_level", std::env::var("RUST_LOG").ok())?
            .set_override_option("server.host", std::env::var("SERVER_HOST").ok())?
            .set_override_option("server.port", std::env::var("SERVER_PORT").ok())?
            .set_override_option("server.unix_socket_path", std::env::var("UNIX_SOCKET").ok())?
            .set_override_option("server.workers", std::env::var("CPU_COUNT").ok())?
            .set_override_option("jwt.secret", std::env::var("JWT_SECRET").ok())?
            .set_override_option("database.url", std::env::var("DATABASE_URL").ok())?
            .set_override_option("cache.redis.url", std::env::var("REDIS_URL").ok())?
            .set_override_option(
                "cache.redis.key_prefix",
                std::env::var("REDIS_KEY_PREFIX").ok(),
            )?
            .set_override_option("cache.default_ttl", std::env::var("REDIS_TTL").ok())?
            .set_override_option("app.public_url", std::env::var("PUBLIC_URL").ok())?
            .set_override_option("mail.smtp_host", std::env::var("SMTP_HOST").ok())?
            .set_override_option("mail.smtp_port", std::env::var("SMTP_PORT").ok())?
            .set_override_option("mail.username", std::env::var("SMTP_USERNAME").ok())?
            .set_override_option("mail.password", std::env::var("SMTP_PASSWORD").ok())?
            .set_override_option("mail.from_address", std::env::var("MAIL_FROM").ok())?
            .set_override_option("backup.dir", std::env::var("BACKUP_DIR").ok())?
            .set_override_option("upload.dir", std::env::var("UPLOAD_DIR").ok())?;

        let config = builder.build()?;
        let mut app_config: AppConfig = config.try_deserialize()?;

        // 处理工作线程数
        if app_config.server.workers == 0 {
            app_config.server.workers = num_cpus::get().min(app_config.server.max_workers);
        }

        app_config.validate().map_err(ConfigError::Message)?;
        Ok(app_config)
    }

    /// 启动前的一致性检查
    fn validate(&self) -> Result<(), String> {
        if self.mail.enabled && self.mail.from_address.is_empty() {
            return Err("mail.from_address is required when mail is enabled".to_string());
        }
        if self.is_production() && (self.jwt.secret.len() < 32 || self.jwt.secret == DEFAULT_JWT_SECRET)
        {
            return Err("jwt.secret must be set to at least 32 characters in production".to_string());
        }
        if self.upload.dir.trim().is_empty() || self.backup.dir.trim().is_empty() {
            return Err("upload.dir and backup.dir must not be empty".to_string());
        }
        Ok(())
    }

    /// 获取全局配置实例
    pub fn get() -> &'static AppConfig {
        APP_CONFIG.get_or_init(|| {
            Self::load().unwrap_or_else(|e| {
                eprintln!("Failed to load configuration: {e}");
                std::process::exit(1);
            })
        })
    }

    /// 初始化配置 (在应用启动时调用)
    pub fn init() -> Result<(), ConfigError> {
        let config = Self::load()?;
        APP_CONFIG
            .set(config)
            .map_err(|_| ConfigError::Message("Configuration already initialized".to_string()))?;
        Ok(())
    }

    /// 检查是否为生产环境
    pub fn is_production(&self) -> bool {
        self.app.environment == "production"
    }

    /// 检查是否为开发环境
    pub fn is_development(&self) -> bool {
        self.app.environment == "development"
    }

    /// 获取服务器绑定地址
    pub fn server_bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// 拼接前端链接，避免出现双斜杠
    pub fn public_link(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.app.public_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// 获取 Unix 套接字路径 (如果配置了)
    #[cfg(unix)]
    pub fn unix_socket_path(&self) -> Option<&str> {
        if self.server.unix_socket_path.is_empty() {
            None
        } else {
            Some(&self.server.unix_socket_path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> AppConfig {
        Config::builder()
            .add_source(File::with_name(concat!(env!("CARGO_MANIFEST_DIR"), "/config")))
            .build()
            .and_then(|c| c.try_deserialize())
            .unwrap()
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(base().validate().is_ok());
    }

    #[test]
    fn test_production_requires_real_jwt_secret() {
        let mut config = base();
        config.app.environment = "production".into();
        assert!(config.validate().is_err());

        config.jwt.secret = "x".repeat(48);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_public_link_joins_without_double_slash() {
        let mut config = base();
        config.app.public_url = "https://classhub.example/".into();
        assert_eq!(
            config.public_link("/reset-password?token=abc"),
            "https://classhub.example/reset-password?token=abc"
        );
    }
}
