//! 用户输入校验

use once_cell::sync::Lazy;
use regex::Regex;

static USERNAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9_.-]*$").expect("Invalid username regex"));

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9-]+(\.[A-Za-z0-9-]+)*\.[A-Za-z]{2,}$")
        .expect("Invalid email regex")
});

pub const USERNAME_MIN: usize = 3;
pub const USERNAME_MAX: usize = 32;
pub const PASSWORD_MIN: usize = 8;
pub const PASSWORD_MAX: usize = 128;

/// 用户名以字母开头，3 到 32 位
pub fn validate_username(username: &str) -> Result<(), &'static str> {
    let len = username.chars().count();
    if !(USERNAME_MIN..=USERNAME_MAX).contains(&len) {
        return Err("Username must be between 3 and 32 characters");
    }
    if !USERNAME_RE.is_match(username) {
        return Err(
            "Username must start with a letter and contain only letters, digits, '.', '_' or '-'",
        );
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if email.len() > 254 || !EMAIL_RE.is_match(email) {
        return Err("Email format is invalid");
    }
    Ok(())
}

/// 邮箱比较与存储前统一小写
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// 密码至少 8 位，同时包含字母和数字，且不能与用户名相同
pub fn validate_password(password: &str, username: Option<&str>) -> Result<(), String> {
    let mut problems = Vec::new();

    let len = password.chars().count();
    if len < PASSWORD_MIN {
        problems.push("Password must be at least 8 characters long");
    }
    if len > PASSWORD_MAX {
        problems.push("Password must be at most 128 characters long");
    }
    if !password.chars().any(|c| c.is_alphabetic()) {
        problems.push("Password must contain a letter");
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        problems.push("Password must contain a digit");
    }
    if username.is_some_and(|u| !u.is_empty() && password.eq_ignore_ascii_case(u)) {
        problems.push("Password must not equal the username");
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(problems.join("; "))
    }
}

/// 必填文本，去除首尾空白后非空且不超过 max 个字符
pub fn validate_required_text(field: &str, value: &str, max: usize) -> Result<(), String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(format!("{field} must not be empty"));
    }
    if trimmed.chars().count() > max {
        return Err(format!("{field} must be at most {max} characters"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_rules() {
        assert!(validate_username("alice").is_ok());
        assert!(validate_username("j.doe-2").is_ok());
        assert!(validate_username("ab").is_err());
        assert!(validate_username("1alice").is_err());
        assert!(validate_username("alice smith").is_err());
    }

    #[test]
    fn test_email_rules() {
        assert!(validate_email("prof@school.edu").is_ok());
        assert!(validate_email("a.b+tag@mail.example.org").is_ok());
        assert!(validate_email("no-at-sign").is_err());
        assert!(validate_email("x@y").is_err());
        assert_eq!(normalize_email("  Bob@Example.COM "), "bob@example.com");
    }

    #[test]
    fn test_password_policy() {
        assert!(validate_password("correct7horse", None).is_ok());
        assert!(validate_password("short1", None).is_err());
        assert!(validate_password("lettersonly", None).is_err());
        assert!(validate_password("12345678", None).is_err());

        let err = validate_password("alice2024", Some("Alice2024")).unwrap_err();
        assert!(err.contains("username"));
    }

    #[test]
    fn test_required_text() {
        assert!(validate_required_text("title", "  Week 1 ", 20).is_ok());
        assert!(validate_required_text("title", "   ", 20).is_err());
        assert!(validate_required_text("title", "abcdef", 5).is_err());
    }
}
