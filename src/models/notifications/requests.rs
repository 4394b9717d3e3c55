use serde::Deserialize;
use ts_rs::TS;

use super::entities::{NotificationType, ReferenceType};
use crate::models::common::PaginationQuery;

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/notification.ts")]
pub struct NotificationListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    #[serde(default)]
    pub unread_only: bool,
}

#[derive(Debug, Clone, Default)]
pub struct NotificationListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub user_id: i64,
    pub unread_only: bool,
}

/// 批量写入时一条通知的内容，接收人另行给出
#[derive(Debug, Clone)]
pub struct NewNotification {
    pub notification_type: NotificationType,
    pub title: String,
    pub content: Option<String>,
    pub reference_type: Option<ReferenceType>,
    pub reference_id: Option<i64>,
}
