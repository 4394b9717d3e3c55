use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

crate::define_string_enum! {
    #[ts(export, export_to = "../frontend/src/types/generated/notification.ts")]
    pub enum NotificationType ("通知类型") {
        NotePublished = "note_published",
        AssignmentPublished = "assignment_published",
        QuizPublished = "quiz_published",
        SubmissionGraded = "submission_graded",
        AttendanceOpened = "attendance_opened",
        ClassJoined = "class_joined",
        MessageReceived = "message_received",
        System = "system",
    }
}

crate::define_string_enum! {
    /// 通知关联对象，供前端跳转
    #[ts(export, export_to = "../frontend/src/types/generated/notification.ts")]
    pub enum ReferenceType ("关联类型") {
        Class = "class",
        Note = "note",
        Assignment = "assignment",
        Submission = "submission",
        Quiz = "quiz",
        AttendanceSession = "attendance_session",
        Message = "message",
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/notification.ts")]
pub struct Notification {
    pub id: i64,
    pub user_id: i64,
    pub notification_type: NotificationType,
    pub title: String,
    pub content: Option<String>,
    pub reference_type: Option<ReferenceType>,
    pub reference_id: Option<i64>,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}
