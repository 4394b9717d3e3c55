use serde::Serialize;
use ts_rs::TS;

use super::entities::ContactMessage;
use crate::models::common::PaginationInfo;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/contact.ts")]
pub struct ContactListResponse {
    pub items: Vec<ContactMessage>,
    pub pagination: PaginationInfo,
}
