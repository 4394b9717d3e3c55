use super::entities::Class;
use crate::models::class_members::entities::ClassMemberRole;
use crate::models::common::PaginationInfo;
use crate::models::users::entities::UserSummary;
use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/class.ts")]
pub struct ClassListResponse {
    pub pagination: PaginationInfo,
    pub items: Vec<Class>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/class.ts")]
pub struct ClassDetailResponse {
    #[serde(flatten)]
    #[ts(flatten)]
    pub class: Class,
    pub professor: Option<UserSummary>,
    pub member_count: i64,
    /// 当前用户在班级中的角色（管理员为空）
    pub my_role: Option<ClassMemberRole>,
}

/// 通过邀请码预览班级
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/class.ts")]
pub struct ClassPreviewResponse {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub professor_name: Option<String>,
}
