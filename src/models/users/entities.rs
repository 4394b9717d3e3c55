use serde::{Deserialize, Serialize};
use ts_rs::TS;

crate::define_string_enum! {
    /// 全局用户角色
    #[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
    pub enum UserRole ("用户角色") {
        Student = "student",
        Professor = "professor",
        Admin = "admin",
    }
}

impl UserRole {
    pub fn admin_roles() -> &'static [&'static UserRole] {
        &[&Self::Admin]
    }
    pub fn staff_roles() -> &'static [&'static UserRole] {
        &[&Self::Professor, &Self::Admin]
    }
    pub fn all_roles() -> &'static [&'static UserRole] {
        &[&Self::Student, &Self::Professor, &Self::Admin]
    }
}

crate::define_string_enum! {
    /// 账户状态，只有 active 用户可以登录
    #[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
    pub enum UserStatus ("用户状态") {
        Active = "active",
        Inactive = "inactive",
        Suspended = "suspended",
    }
}

// 用户资料
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct UserProfile {
    pub display_name: String,
    pub avatar_url: Option<String>,
}

// 用户实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing, default)] // 不序列化到JSON响应中
    #[ts(skip)]
    pub password_hash: String,
    pub role: UserRole,
    pub status: UserStatus,
    pub profile: UserProfile,
    pub last_login: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    /// 展示名，未设置时回退到用户名
    pub fn display_name(&self) -> &str {
        if self.profile.display_name.is_empty() {
            &self.username
        } else {
            &self.profile.display_name
        }
    }

    pub fn summary(&self) -> UserSummary {
        UserSummary {
            id: self.id,
            username: self.username.clone(),
            display_name: self.display_name().to_string(),
            role: self.role,
            avatar_url: self.profile.avatar_url.clone(),
        }
    }
}

/// 列表中嵌入的用户摘要
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct UserSummary {
    pub id: i64,
    pub username: String,
    pub display_name: String,
    pub role: UserRole,
    pub avatar_url: Option<String>,
}
