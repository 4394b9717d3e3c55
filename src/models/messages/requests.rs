use serde::Deserialize;
use ts_rs::TS;

use crate::models::common::PaginationQuery;

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/message.ts")]
pub struct SendMessageRequest {
    pub recipient_id: i64,
    #[serde(default)]
    pub subject: String,
    pub body: String,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/message.ts")]
pub struct MessageListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    #[serde(default)]
    pub unread_only: bool,
}

crate::define_string_enum! {
    pub enum Mailbox ("信箱") {
        Inbox = "inbox",
        Sent = "sent",
    }
}

#[derive(Debug, Clone)]
pub struct MessageListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub user_id: i64,
    pub mailbox: Mailbox,
    pub unread_only: bool,
}
