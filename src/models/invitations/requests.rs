use serde::Deserialize;
use ts_rs::TS;

use crate::models::common::PaginationQuery;
use crate::models::users::entities::UserRole;

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/invitation.ts")]
pub struct CreateInvitationRequest {
    pub email: String,
    #[serde(default = "default_role")]
    pub role: UserRole,
    pub class_id: Option<i64>,
}

fn default_role() -> UserRole {
    UserRole::Student
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/invitation.ts")]
pub struct InvitationListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub class_id: Option<i64>,
}

/// 存储层查询
#[derive(Debug, Clone, Default)]
pub struct InvitationListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub invited_by: Option<i64>,
    pub class_id: Option<i64>,
}

/// 存储层创建参数
#[derive(Debug, Clone)]
pub struct NewInvitation {
    pub email: String,
    pub role: UserRole,
    pub class_id: Option<i64>,
    pub token: String,
    pub invited_by: i64,
    pub expires_at: chrono::DateTime<chrono::Utc>,
}
