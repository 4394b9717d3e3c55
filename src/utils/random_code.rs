//! 邀请码、签到码与一次性令牌

use rand::Rng;

/// 去掉易混淆字符（0/O、1/I/L）
const CODE_ALPHABET: &[u8] = b"ABCDEFGHJKMNPQRSTUVWXYZ23456789";

pub const INVITE_CODE_LEN: usize = 8;
pub const ATTENDANCE_CODE_LEN: usize = 6;

pub fn generate_code(len: usize) -> String {
    let mut rng = rand::rng();
    (0..len)
        .map(|_| CODE_ALPHABET[rng.random_range(0..CODE_ALPHABET.len())] as char)
        .collect()
}

/// 班级邀请码
pub fn generate_invite_code() -> String {
    generate_code(INVITE_CODE_LEN)
}

/// 考勤签到码
pub fn generate_attendance_code() -> String {
    generate_code(ATTENDANCE_CODE_LEN)
}

/// 密码重置、邀请链接使用的令牌（64 位十六进制）
pub fn generate_secure_token() -> String {
    format!("{}{}", uuid::Uuid::new_v4().simple(), uuid::Uuid::new_v4().simple())
}

/// 用户输入的码统一为大写并去除空白
pub fn normalize_code(input: &str) -> String {
    input
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_ascii_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_shape() {
        let code = generate_invite_code();
        assert_eq!(code.len(), INVITE_CODE_LEN);
        assert!(code.bytes().all(|b| CODE_ALPHABET.contains(&b)));
        assert_eq!(generate_attendance_code().len(), ATTENDANCE_CODE_LEN);
    }

    #[test]
    fn test_secure_token() {
        let a = generate_secure_token();
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(a, generate_secure_token());
    }

    #[test]
    fn test_normalize_code() {
        assert_eq!(normalize_code(" ab c2 "), "ABC2");
    }
}
