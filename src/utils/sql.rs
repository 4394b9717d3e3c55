use sea_orm::sea_query::LikeExpr;

/// LIKE 转义字符
pub const LIKE_ESCAPE: char = '\\';

/// 转义 LIKE 通配符，用户输入的 `%` 与 `_` 按字面匹配
pub fn escape_like_pattern(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push(LIKE_ESCAPE);
        }
        out.push(c);
    }
    out
}

/// 子串匹配表达式，带 ESCAPE 子句
pub fn contains_pattern(raw: &str) -> LikeExpr {
    LikeExpr::new(format!("%{}%", escape_like_pattern(raw))).escape(LIKE_ESCAPE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_wildcards() {
        assert_eq!(escape_like_pattern("50%_off"), r"50\%\_off");
        assert_eq!(escape_like_pattern(r"a\b"), r"a\\b");
        assert_eq!(escape_like_pattern("plain"), "plain");
    }
}
