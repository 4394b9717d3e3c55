use serde::Serialize;
use ts_rs::TS;

use super::entities::{Invitation, InvitationStatus};
use crate::models::common::PaginationInfo;
use crate::models::users::entities::UserRole;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/invitation.ts")]
pub struct InvitationResponse {
    #[serde(flatten)]
    #[ts(flatten)]
    pub invitation: Invitation,
    pub status: InvitationStatus,
}

/// 接受邀请前展示给受邀人的信息
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/invitation.ts")]
pub struct InvitationPreviewResponse {
    pub email: String,
    pub role: UserRole,
    pub class_name: Option<String>,
    pub expires_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/invitation.ts")]
pub struct InvitationListResponse {
    pub items: Vec<InvitationResponse>,
    pub pagination: PaginationInfo,
}
