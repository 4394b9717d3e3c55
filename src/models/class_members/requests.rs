use crate::models::{class_members::entities::ClassMemberRole, common::PaginationQuery};
use serde::Deserialize;
use ts_rs::TS;

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/class-member.ts")]
pub struct UpdateClassMemberRequest {
    pub role: ClassMemberRole,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/class-member.ts")]
pub struct ClassMemberListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub search: Option<String>,
    pub role: Option<ClassMemberRole>,
}

// 成员列表查询参数（用于存储层）
#[derive(Debug, Clone, Default)]
pub struct ClassMemberQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub search: Option<String>,
    pub role: Option<ClassMemberRole>,
}
