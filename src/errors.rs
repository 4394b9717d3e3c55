//! 统一错误处理模块
//!
//! 使用宏自动生成 `ClassHubError`，每个变体带有错误代码、类型名称与详情。

use std::fmt;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_classhub_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum ClassHubError {
            $($variant(String),)*
        }

        impl ClassHubError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(ClassHubError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(ClassHubError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(ClassHubError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl ClassHubError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        ClassHubError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_classhub_errors! {
    CacheConnection("E001", "Cache Connection Error"),
    CachePluginNotFound("E002", "Cache Plugin Not Found"),
    DatabaseConfig("E003", "Database Configuration Error"),
    DatabaseConnection("E004", "Database Connection Error"),
    DatabaseOperation("E005", "Database Operation Error"),
    FileOperation("E006", "File Operation Error"),
    Validation("E007", "Validation Error"),
    NotFound("E008", "Resource Not Found"),
    Serialization("E009", "Serialization Error"),
    StoragePluginNotFound("E010", "Storage Plugin Not Found"),
    DateParse("E011", "Date Parse Error"),
    Authentication("E012", "Authentication Error"),
    Authorization("E013", "Authorization Error"),
    Conflict("E014", "Resource Conflict"),
    Template("E015", "Template Render Error"),
    Mail("E016", "Mail Delivery Error"),
    Config("E017", "Configuration Error"),
    InvalidState("E018", "Invalid State Transition"),
}

impl ClassHubError {
    /// 格式化为彩色输出（用于开发环境）
    #[cfg(debug_assertions)]
    pub fn format_colored(&self) -> String {
        format!(
            "\x1b[1;31m[ERROR]\x1b[0m \x1b[33m{}\x1b[0m \x1b[31m{}\x1b[0m\n  {}",
            self.code(),
            self.error_type(),
            self.message()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for ClassHubError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for ClassHubError {}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for ClassHubError {
    fn from(err: sea_orm::DbErr) -> Self {
        ClassHubError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for ClassHubError {
    fn from(err: std::io::Error) -> Self {
        ClassHubError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for ClassHubError {
    fn from(err: serde_json::Error) -> Self {
        ClassHubError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for ClassHubError {
    fn from(err: chrono::ParseError) -> Self {
        ClassHubError::DateParse(err.to_string())
    }
}

impl From<tera::Error> for ClassHubError {
    fn from(err: tera::Error) -> Self {
        ClassHubError::Template(err.to_string())
    }
}

impl From<lettre::error::Error> for ClassHubError {
    fn from(err: lettre::error::Error) -> Self {
        ClassHubError::Mail(err.to_string())
    }
}

impl From<lettre::address::AddressError> for ClassHubError {
    fn from(err: lettre::address::AddressError) -> Self {
        ClassHubError::Mail(format!("Invalid mailbox: {err}"))
    }
}

impl From<lettre::transport::smtp::Error> for ClassHubError {
    fn from(err: lettre::transport::smtp::Error) -> Self {
        ClassHubError::Mail(err.to_string())
    }
}

impl From<config::ConfigError> for ClassHubError {
    fn from(err: config::ConfigError) -> Self {
        ClassHubError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ClassHubError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(ClassHubError::cache_connection("test").code(), "E001");
        assert_eq!(ClassHubError::database_config("test").code(), "E003");
        assert_eq!(ClassHubError::validation("test").code(), "E007");
        assert_eq!(ClassHubError::authentication("test").code(), "E012");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            ClassHubError::cache_connection("test").error_type(),
            "Cache Connection Error"
        );
        assert_eq!(
            ClassHubError::validation("test").error_type(),
            "Validation Error"
        );
    }

    #[test]
    fn test_error_message() {
        let err = ClassHubError::validation("Invalid input");
        assert_eq!(err.message(), "Invalid input");
    }

    #[test]
    fn test_domain_error_codes() {
        assert_eq!(ClassHubError::conflict("dup").code(), "E014");
        assert_eq!(ClassHubError::mail("smtp down").code(), "E016");
        assert_eq!(
            ClassHubError::invalid_state("attempt closed").error_type(),
            "Invalid State Transition"
        );
    }

    #[test]
    fn test_from_serde_error() {
        let err: ClassHubError = serde_json::from_str::<i32>("nope").unwrap_err().into();
        assert_eq!(err.code(), "E009");
    }

    #[test]
    fn test_format_simple() {
        let err = ClassHubError::validation("Invalid URL");
        let formatted = err.format_simple();
        assert!(formatted.contains("Validation Error"));
        assert!(formatted.contains("Invalid URL"));
    }
}
