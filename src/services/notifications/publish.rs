//! 课程内容发布后的扇出：站内通知 + 可选邮件
//!
//! 扇出失败只记录日志，不影响发布本身。

use std::sync::Arc;

use crate::mail::{self, EmailTemplate, Mailer};
use crate::models::class_members::entities::ClassMemberRole;
use crate::models::notifications::requests::NewNotification;
use crate::services::system::DynamicConfig;
use crate::storage::Storage;

/// 通知班级所有学生；给出邮件模板且开启 `mail.notify_class_members` 时同时发邮件
pub(crate) async fn notify_class_students(
    storage: &dyn Storage,
    mailer: Arc<dyn Mailer>,
    class_id: i64,
    notification: NewNotification,
    email: Option<EmailTemplate>,
) {
    let students = match storage
        .list_class_users(class_id, Some(ClassMemberRole::Student))
        .await
    {
        Ok(students) => students,
        Err(e) => {
            tracing::error!("Failed to load students of class {class_id}: {e}");
            return;
        }
    };
    if students.is_empty() {
        return;
    }

    let ids: Vec<i64> = students.iter().map(|s| s.id).collect();
    let kind = notification.notification_type;
    match storage.create_notifications(&ids, notification).await {
        Ok(count) => tracing::debug!("Created {count} {kind} notifications for class {class_id}"),
        Err(e) => tracing::error!("Failed to create {kind} notifications: {e}"),
    }

    if let Some(email) = email
        && DynamicConfig::notify_class_members().await
    {
        let recipients = students.into_iter().map(|s| s.email).collect();
        mail::dispatch_template(mailer, email, recipients).await;
    }
}

/// 通知单个用户
pub(crate) async fn notify_user(storage: &dyn Storage, user_id: i64, notification: NewNotification) {
    let kind = notification.notification_type;
    if let Err(e) = storage.create_notifications(&[user_id], notification).await {
        tracing::error!("Failed to create {kind} notification for user {user_id}: {e}");
    }
}
