use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::users::entities::UserSummary;

crate::define_string_enum! {
    /// 班级内角色
    #[ts(export, export_to = "../frontend/src/types/generated/class-member.ts")]
    pub enum ClassMemberRole ("班级成员角色") {
        Student = "student",
        Assistant = "assistant",
        Professor = "professor",
    }
}

impl ClassMemberRole {
    /// 可以管理课程内容（笔记、作业、测验、考勤）
    pub fn can_manage_content(&self) -> bool {
        matches!(self, ClassMemberRole::Assistant | ClassMemberRole::Professor)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/class-member.ts")]
pub struct ClassMember {
    pub id: i64,
    pub class_id: i64,
    pub user_id: i64,
    pub role: ClassMemberRole,
    pub joined_at: chrono::DateTime<chrono::Utc>,
}

/// 带用户摘要的成员
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/class-member.ts")]
pub struct ClassMemberDetail {
    #[serde(flatten)]
    #[ts(flatten)]
    pub member: ClassMember,
    pub user: UserSummary,
}
