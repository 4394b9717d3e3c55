use serde::Serialize;
use ts_rs::TS;

use crate::models::{PaginationInfo, class_members::entities::ClassMemberDetail};

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/class-member.ts")]
pub struct ClassMemberListResponse {
    pub pagination: PaginationInfo,
    pub items: Vec<ClassMemberDetail>,
}
