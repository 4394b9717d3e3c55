use chrono::{DateTime, Utc};

/// 密码重置令牌，一次性使用
#[derive(Debug, Clone)]
pub struct PasswordReset {
    pub id: i64,
    pub user_id: i64,
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub used_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl PasswordReset {
    pub fn is_usable(&self, now: DateTime<Utc>) -> bool {
        self.used_at.is_none() && now <= self.expires_at
    }
}
