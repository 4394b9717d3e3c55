pub mod pagination;
pub mod response;
mod string_enum;

pub use pagination::{PaginatedResponse, PaginationInfo, PaginationQuery};
pub use response::ApiResponse;

/// unix 秒转换为 UTC 时间
pub fn from_timestamp(ts: i64) -> chrono::DateTime<chrono::Utc> {
    chrono::DateTime::<chrono::Utc>::from_timestamp(ts, 0).unwrap_or_default()
}

/// 将 JSON 文本列解析为字符串列表，解析失败返回空列表
pub fn parse_string_list(raw: &str) -> Vec<String> {
    serde_json::from_str(raw).unwrap_or_default()
}

/// 区分“字段缺省”与“显式 null”，配合 `#[serde(default)]` 使用
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: serde::Deserialize<'de>,
    D: serde::Deserializer<'de>,
{
    <Option<T> as serde::Deserialize>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(serde::Deserialize)]
    struct Patch {
        #[serde(default, deserialize_with = "double_option")]
        due: Option<Option<i64>>,
    }

    #[test]
    fn test_double_option() {
        let p: Patch = serde_json::from_str("{}").unwrap();
        assert_eq!(p.due, None);
        let p: Patch = serde_json::from_str(r#"{"due":null}"#).unwrap();
        assert_eq!(p.due, Some(None));
        let p: Patch = serde_json::from_str(r#"{"due":5}"#).unwrap();
        assert_eq!(p.due, Some(Some(5)));
    }

    #[test]
    fn test_parse_string_list() {
        assert_eq!(parse_string_list(r#"["a","b"]"#), vec!["a", "b"]);
        assert!(parse_string_list("garbage").is_empty());
    }
}
