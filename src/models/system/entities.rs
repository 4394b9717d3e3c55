use serde::{Deserialize, Serialize};
use ts_rs::TS;

crate::define_string_enum! {
    /// 配置值类型
    #[ts(export, export_to = "../frontend/src/types/generated/system.ts")]
    pub enum SettingValueType ("配置值类型") {
        String = "string",
        Integer = "integer",
        Boolean = "boolean",
        JsonArray = "json_array",
    }
}

impl SettingValueType {
    /// 校验字符串形式的值是否符合类型
    pub fn validate(&self, value: &str) -> Result<(), String> {
        match self {
            SettingValueType::String => Ok(()),
            SettingValueType::Integer => value
                .trim()
                .parse::<i64>()
                .map(|_| ())
                .map_err(|_| format!("'{value}' is not an integer")),
            SettingValueType::Boolean => match value.trim() {
                "true" | "false" => Ok(()),
                _ => Err(format!("'{value}' is not a boolean (true/false)")),
            },
            SettingValueType::JsonArray => serde_json::from_str::<Vec<serde_json::Value>>(value)
                .map(|_| ())
                .map_err(|e| format!("'{value}' is not a JSON array: {e}")),
        }
    }
}

/// 可在后台修改的配置键
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KnownSettingKey {
    SystemName,
    AccessTokenExpiry,
    RefreshTokenExpiry,
    RefreshTokenRememberMeExpiry,
    UploadMaxSize,
    UploadAllowedTypes,
    AllowRegistration,
    NotifyClassMembers,
    MaxBackups,
}

impl KnownSettingKey {
    pub const ALL: &'static [KnownSettingKey] = &[
        KnownSettingKey::SystemName,
        KnownSettingKey::AccessTokenExpiry,
        KnownSettingKey::RefreshTokenExpiry,
        KnownSettingKey::RefreshTokenRememberMeExpiry,
        KnownSettingKey::UploadMaxSize,
        KnownSettingKey::UploadAllowedTypes,
        KnownSettingKey::AllowRegistration,
        KnownSettingKey::NotifyClassMembers,
        KnownSettingKey::MaxBackups,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            KnownSettingKey::SystemName => "app.system_name",
            KnownSettingKey::AccessTokenExpiry => "jwt.access_token_expiry",
            KnownSettingKey::RefreshTokenExpiry => "jwt.refresh_token_expiry",
            KnownSettingKey::RefreshTokenRememberMeExpiry => "jwt.refresh_token_remember_me_expiry",
            KnownSettingKey::UploadMaxSize => "upload.max_size",
            KnownSettingKey::UploadAllowedTypes => "upload.allowed_types",
            KnownSettingKey::AllowRegistration => "auth.allow_registration",
            KnownSettingKey::NotifyClassMembers => "mail.notify_class_members",
            KnownSettingKey::MaxBackups => "backup.max_backups",
        }
    }

    pub fn value_type(&self) -> SettingValueType {
        match self {
            KnownSettingKey::SystemName => SettingValueType::String,
            KnownSettingKey::UploadAllowedTypes => SettingValueType::JsonArray,
            KnownSettingKey::AllowRegistration | KnownSettingKey::NotifyClassMembers => {
                SettingValueType::Boolean
            }
            _ => SettingValueType::Integer,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            KnownSettingKey::SystemName => "系统名称，显示在页面与邮件中",
            KnownSettingKey::AccessTokenExpiry => "Access Token 有效期（秒）",
            KnownSettingKey::RefreshTokenExpiry => "Refresh Token 有效期（秒）",
            KnownSettingKey::RefreshTokenRememberMeExpiry => "记住我时 Refresh Token 有效期（秒）",
            KnownSettingKey::UploadMaxSize => "单文件最大字节数",
            KnownSettingKey::UploadAllowedTypes => "允许上传的扩展名",
            KnownSettingKey::AllowRegistration => "是否开放公开注册",
            KnownSettingKey::NotifyClassMembers => "发布内容时是否邮件通知班级成员",
            KnownSettingKey::MaxBackups => "保留的备份数量上限",
        }
    }
}

impl std::str::FromStr for KnownSettingKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        KnownSettingKey::ALL
            .iter()
            .copied()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| format!("Unknown setting key: {s}"))
    }
}

/// 系统设置实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/system.ts")]
pub struct SystemSetting {
    pub key: String,
    pub value: String,
    pub value_type: SettingValueType,
    pub description: Option<String>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
    pub updated_by: Option<i64>,
}

/// 设置审计日志实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/system.ts")]
pub struct SettingAudit {
    pub id: i64,
    pub setting_key: String,
    pub old_value: Option<String>,
    pub new_value: String,
    pub changed_by: i64,
    pub changed_at: chrono::DateTime<chrono::Utc>,
    pub ip_address: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_key_lookup() {
        for key in KnownSettingKey::ALL {
            assert_eq!(key.as_str().parse::<KnownSettingKey>(), Ok(*key));
        }
        assert!("cors.max_age".parse::<KnownSettingKey>().is_err());
    }

    #[test]
    fn test_value_validation() {
        assert!(SettingValueType::Integer.validate("42").is_ok());
        assert!(SettingValueType::Integer.validate("4.2").is_err());
        assert!(SettingValueType::Boolean.validate("true").is_ok());
        assert!(SettingValueType::Boolean.validate("yes").is_err());
        assert!(SettingValueType::JsonArray.validate(r#"[".pdf"]"#).is_ok());
        assert!(SettingValueType::JsonArray.validate(r#"{"a":1}"#).is_err());
    }
}
