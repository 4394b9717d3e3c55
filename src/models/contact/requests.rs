use serde::Deserialize;
use ts_rs::TS;

use super::entities::ContactStatus;
use crate::models::common::PaginationQuery;

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/contact.ts")]
pub struct CreateContactRequest {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub subject: String,
    pub message: String,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/contact.ts")]
pub struct ReplyContactRequest {
    pub reply: String,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/contact.ts")]
pub struct UpdateContactStatusRequest {
    pub status: ContactStatus,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/contact.ts")]
pub struct ContactListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub status: Option<ContactStatus>,
    pub search: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ContactListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub status: Option<ContactStatus>,
    pub search: Option<String>,
}
