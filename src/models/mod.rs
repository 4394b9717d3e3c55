//! 业务数据模型
//!
//! 每个领域分为 `entities`（业务实体）、`requests`（请求体与查询参数）、
//! `responses`（响应体）三部分，通过 ts-rs 导出 TypeScript 类型。

pub mod assignments;
pub mod attendance;
pub mod auth;
pub mod backups;
pub mod class_members;
pub mod classes;
pub mod common;
pub mod contact;
pub mod crash_logs;
pub mod files;
pub mod invitations;
pub mod messages;
pub mod notes;
pub mod notifications;
pub mod practice;
pub mod quizzes;
pub mod system;
pub mod users;

pub use common::{ApiResponse, PaginatedResponse, PaginationInfo, PaginationQuery};

/// 程序启动时间
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

/// 接口错误码
///
/// 0 表示成功，其余按领域分段：1xxx 通用，2xxx 认证与用户，3xxx 班级，
/// 4xxx 课程内容，5xxx 测验与练习，6xxx 考勤，7xxx 消息，8xxx 文件，9xxx 管理后台。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    BadRequest = 1000,
    Unauthorized = 1001,
    Forbidden = 1003,
    NotFound = 1004,
    Conflict = 1009,
    RateLimitExceeded = 1029,
    InternalServerError = 1500,

    AuthFailed = 2000,
    UserNotFound = 2001,
    UserAlreadyExists = 2002,
    UserNameInvalid = 2003,
    UserEmailInvalid = 2004,
    UserPasswordInvalid = 2005,
    UserCreationFailed = 2006,
    UserUpdateFailed = 2007,
    UserDeleteFailed = 2008,
    CanNotDeleteCurrentUser = 2009,
    RegistrationDisabled = 2010,
    PasswordResetTokenInvalid = 2020,
    InvitationInvalid = 2030,
    InvitationCreationFailed = 2031,

    ClassNotFound = 3000,
    ClassCreationFailed = 3001,
    ClassUpdateFailed = 3002,
    ClassDeleteFailed = 3003,
    ClassPermissionDenied = 3004,
    ClassInviteCodeInvalid = 3005,
    ClassAlreadyJoined = 3006,
    ClassMemberNotFound = 3007,
    ClassOwnerImmutable = 3008,
    ClassArchived = 3009,

    NoteNotFound = 4000,
    AssignmentNotFound = 4100,
    AssignmentClosed = 4101,
    SubmissionNotFound = 4200,
    SubmissionAlreadyGraded = 4201,
    GradeOutOfRange = 4202,

    QuizNotFound = 5000,
    QuizNotAvailable = 5001,
    QuizAttemptLimitReached = 5002,
    QuizAttemptNotFound = 5003,
    QuizAttemptClosed = 5004,
    QuizInvalid = 5005,
    PracticeQuestionNotFound = 5100,

    AttendanceSessionNotFound = 6000,
    AttendanceCodeInvalid = 6001,
    AttendanceClosed = 6002,
    AttendanceAlreadyRecorded = 6003,

    MessageNotFound = 7000,
    MessageRecipientInvalid = 7001,
    ContactMessageNotFound = 7100,
    NotificationNotFound = 7200,

    FileNotFound = 8000,
    FileUploadFailed = 8001,
    FileTypeNotAllowed = 8002,
    FileSizeExceeded = 8003,
    MuitipartFormError = 8004,

    SettingNotFound = 9000,
    SettingInvalid = 9001,
    BackupNotFound = 9100,
    BackupFailed = 9101,
    CrashLogNotFound = 9200,
    MailDeliveryFailed = 9300,
}
