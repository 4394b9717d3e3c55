//! 预导入模块，方便使用

pub use super::assignments::{
    ActiveModel as AssignmentActiveModel, Entity as Assignments, Model as AssignmentModel,
};
pub use super::attendance_records::{
    ActiveModel as AttendanceRecordActiveModel, Entity as AttendanceRecords,
    Model as AttendanceRecordModel,
};
pub use super::attendance_sessions::{
    ActiveModel as AttendanceSessionActiveModel, Entity as AttendanceSessions,
    Model as AttendanceSessionModel,
};
pub use super::backups::{ActiveModel as BackupActiveModel, Entity as Backups, Model as BackupModel};
pub use super::class_members::{
    ActiveModel as ClassMemberActiveModel, Entity as ClassMembers, Model as ClassMemberModel,
};
pub use super::classes::{ActiveModel as ClassActiveModel, Entity as Classes, Model as ClassModel};
pub use super::contact_messages::{
    ActiveModel as ContactMessageActiveModel, Entity as ContactMessages,
    Model as ContactMessageModel,
};
pub use super::crash_logs::{
    ActiveModel as CrashLogActiveModel, Entity as CrashLogs, Model as CrashLogModel,
};
pub use super::files::{ActiveModel as FileActiveModel, Entity as Files, Model as FileModel};
pub use super::invitations::{
    ActiveModel as InvitationActiveModel, Entity as Invitations, Model as InvitationModel,
};
pub use super::messages::{
    ActiveModel as MessageActiveModel, Entity as Messages, Model as MessageModel,
};
pub use super::notes::{ActiveModel as NoteActiveModel, Entity as Notes, Model as NoteModel};
pub use super::notifications::{
    ActiveModel as NotificationActiveModel, Entity as Notifications, Model as NotificationModel,
};
pub use super::password_resets::{
    ActiveModel as PasswordResetActiveModel, Entity as PasswordResets,
    Model as PasswordResetModel,
};
pub use super::practice_questions::{
    ActiveModel as PracticeQuestionActiveModel, Entity as PracticeQuestions,
    Model as PracticeQuestionModel,
};
pub use super::quiz_attempts::{
    ActiveModel as QuizAttemptActiveModel, Entity as QuizAttempts, Model as QuizAttemptModel,
};
pub use super::quizzes::{ActiveModel as QuizActiveModel, Entity as Quizzes, Model as QuizModel};
pub use super::submissions::{
    ActiveModel as SubmissionActiveModel, Entity as Submissions, Model as SubmissionModel,
};
pub use super::system_settings::{
    ActiveModel as SystemSettingActiveModel, Entity as SystemSettings, Model as SystemSettingModel,
};
pub use super::system_settings_audit::{
    ActiveModel as SettingAuditActiveModel, Entity as SystemSettingsAudit,
    Model as SettingAuditModel,
};
pub use super::users::{ActiveModel as UserActiveModel, Entity as Users, Model as UserModel};
