use serde::Serialize;
use ts_rs::TS;

use super::entities::Message;
use crate::models::common::PaginationInfo;
use crate::models::users::entities::UserSummary;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/message.ts")]
pub struct MessageView {
    #[serde(flatten)]
    #[ts(flatten)]
    pub message: Message,
    pub sender: Option<UserSummary>,
    pub recipient: Option<UserSummary>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/message.ts")]
pub struct MessageListResponse {
    pub items: Vec<MessageView>,
    pub pagination: PaginationInfo,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/message.ts")]
pub struct UnreadMessageCountResponse {
    pub unread_count: i64,
}
