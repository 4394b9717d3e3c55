use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::models::{
    PaginatedResponse,
    assignments::{
        entities::{Assignment, Submission},
        requests::{
            AssignmentListQuery, CreateAssignmentRequest, SubmissionListQuery,
            UpdateAssignmentRequest, UpsertSubmission,
        },
    },
    attendance::{
        entities::{AttendanceRecord, AttendanceSession},
        requests::{NewSession, UpsertRecord},
    },
    auth::entities::PasswordReset,
    backups::{entities::Backup, requests::NewBackup, responses::BackupListResponse},
    class_members::{
        entities::{ClassMember, ClassMemberRole},
        requests::ClassMemberQuery,
        responses::ClassMemberListResponse,
    },
    classes::{
        entities::Class,
        requests::{ClassListQuery, UpdateClassRequest},
        responses::ClassListResponse,
    },
    contact::{
        entities::{ContactMessage, ContactStatus},
        requests::{ContactListQuery, CreateContactRequest},
        responses::ContactListResponse,
    },
    crash_logs::{
        entities::CrashLog,
        requests::{CrashLogListQuery, NewCrashLog},
        responses::CrashLogListResponse,
    },
    files::{entities::File, requests::NewFile},
    invitations::{
        entities::Invitation,
        requests::{InvitationListQuery, NewInvitation},
        responses::InvitationListResponse,
    },
    messages::{
        entities::Message,
        requests::{MessageListQuery, SendMessageRequest},
    },
    notes::{
        entities::Note,
        requests::{CreateNoteRequest, NoteListQuery, UpdateNoteRequest},
        responses::NoteListResponse,
    },
    notifications::{
        entities::Notification,
        requests::{NewNotification, NotificationListQuery},
        responses::NotificationListResponse,
    },
    practice::{
        entities::PracticeQuestion,
        requests::{
            CreatePracticeQuestionRequest, PracticeListQuery, UpdatePracticeQuestionRequest,
        },
    },
    quizzes::{
        entities::{AnswerSheet, Quiz, QuizAttempt},
        requests::{
            AttemptListQuery, CreateQuizRequest, FinalizeAttempt, NewAttempt, QuizListQuery,
            UpdateQuizRequest,
        },
    },
    system::{
        entities::SystemSetting, requests::SettingAuditQuery, responses::SettingAuditListResponse,
    },
    users::{
        entities::User,
        requests::{CreateUserRequest, UpdateUserRequest, UserListQuery},
        responses::UserListResponse,
    },
};

use crate::errors::Result;

pub mod sea_orm_storage;

/// 备份快照：表名 -> 行（JSON 对象）
pub type TableSnapshot = BTreeMap<String, Vec<serde_json::Value>>;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 创建用户（password 字段为已哈希的密码）
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 批量获取用户信息
    async fn get_users_by_ids(&self, ids: &[i64]) -> Result<Vec<User>>;
    // 通过用户名获取用户信息
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;
    // 通过邮箱获取用户信息
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    // 通过用户名或邮箱获取用户信息
    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>>;
    // 列出用户
    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse>;
    // 更新用户信息
    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>>;
    // 删除用户
    async fn delete_user(&self, id: i64) -> Result<bool>;
    // 更新用户最后登录时间
    async fn update_last_login(&self, id: i64) -> Result<bool>;
    // 统计用户数量
    async fn count_users(&self) -> Result<u64>;

    /// 密码重置
    async fn create_password_reset(
        &self,
        user_id: i64,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<PasswordReset>;
    async fn get_password_reset_by_token(&self, token: &str) -> Result<Option<PasswordReset>>;
    // 标记令牌已使用，同时作废该用户其余未使用的令牌
    async fn consume_password_reset(&self, id: i64, user_id: i64) -> Result<bool>;

    /// 邀请
    async fn create_invitation(&self, invitation: NewInvitation) -> Result<Invitation>;
    async fn get_invitation_by_id(&self, id: i64) -> Result<Option<Invitation>>;
    async fn get_invitation_by_token(&self, token: &str) -> Result<Option<Invitation>>;
    async fn list_invitations_with_pagination(
        &self,
        query: InvitationListQuery,
    ) -> Result<InvitationListResponse>;
    async fn mark_invitation_accepted(&self, id: i64) -> Result<bool>;
    async fn release_invitation(&self, id: i64) -> Result<bool>;
    async fn delete_invitation(&self, id: i64) -> Result<bool>;

    /// 班级管理方法
    // 创建班级，负责教授同时写入成员表
    async fn create_class(
        &self,
        professor_id: i64,
        name: &str,
        description: Option<String>,
        invite_code: &str,
    ) -> Result<Class>;
    async fn get_class_by_id(&self, class_id: i64) -> Result<Option<Class>>;
    async fn get_class_by_invite_code(&self, invite_code: &str) -> Result<Option<Class>>;
    async fn list_classes_with_pagination(&self, query: ClassListQuery)
    -> Result<ClassListResponse>;
    async fn update_class(&self, class_id: i64, update: UpdateClassRequest)
    -> Result<Option<Class>>;
    async fn update_class_invite_code(
        &self,
        class_id: i64,
        invite_code: &str,
    ) -> Result<Option<Class>>;
    async fn delete_class(&self, class_id: i64) -> Result<bool>;

    /// 班级成员管理方法
    async fn add_class_member(
        &self,
        class_id: i64,
        user_id: i64,
        role: ClassMemberRole,
    ) -> Result<ClassMember>;
    async fn get_class_member(&self, class_id: i64, user_id: i64) -> Result<Option<ClassMember>>;
    async fn update_class_member_role(
        &self,
        class_id: i64,
        user_id: i64,
        role: ClassMemberRole,
    ) -> Result<Option<ClassMember>>;
    async fn remove_class_member(&self, class_id: i64, user_id: i64) -> Result<bool>;
    async fn list_class_members_with_pagination(
        &self,
        class_id: i64,
        query: ClassMemberQuery,
    ) -> Result<ClassMemberListResponse>;
    async fn count_class_members(&self, class_id: i64) -> Result<i64>;
    // 列出班级中指定角色的用户（不分页）
    async fn list_class_users(
        &self,
        class_id: i64,
        role: Option<ClassMemberRole>,
    ) -> Result<Vec<User>>;
    // 用户加入或负责的班级 ID
    async fn list_user_class_ids(&self, user_id: i64) -> Result<Vec<i64>>;

    /// 笔记
    async fn create_note(
        &self,
        class_id: i64,
        author_id: i64,
        note: CreateNoteRequest,
    ) -> Result<Note>;
    async fn get_note_by_id(&self, id: i64) -> Result<Option<Note>>;
    async fn list_notes_with_pagination(&self, query: NoteListQuery) -> Result<NoteListResponse>;
    async fn update_note(&self, id: i64, update: UpdateNoteRequest) -> Result<Option<Note>>;
    async fn delete_note(&self, id: i64) -> Result<bool>;

    /// 作业
    async fn create_assignment(
        &self,
        class_id: i64,
        created_by: i64,
        assignment: CreateAssignmentRequest,
    ) -> Result<Assignment>;
    async fn get_assignment_by_id(&self, id: i64) -> Result<Option<Assignment>>;
    async fn list_assignments_with_pagination(
        &self,
        query: AssignmentListQuery,
    ) -> Result<PaginatedResponse<Assignment>>;
    async fn update_assignment(
        &self,
        id: i64,
        update: UpdateAssignmentRequest,
    ) -> Result<Option<Assignment>>;
    async fn delete_assignment(&self, id: i64) -> Result<bool>;
    // 学生未提交、未截止的已发布作业数量
    async fn count_pending_assignments(&self, student_id: i64, now: DateTime<Utc>)
    -> Result<i64>;

    /// 作业提交
    // 每个学生每份作业一条，重复提交覆盖内容
    async fn upsert_submission(&self, submission: UpsertSubmission) -> Result<Submission>;
    async fn get_submission_by_id(&self, id: i64) -> Result<Option<Submission>>;
    async fn get_student_submission(
        &self,
        assignment_id: i64,
        student_id: i64,
    ) -> Result<Option<Submission>>;
    async fn list_student_submissions(
        &self,
        student_id: i64,
        assignment_ids: &[i64],
    ) -> Result<Vec<Submission>>;
    async fn list_submissions_with_pagination(
        &self,
        query: SubmissionListQuery,
    ) -> Result<PaginatedResponse<Submission>>;
    async fn grade_submission(
        &self,
        id: i64,
        score: f64,
        feedback: Option<String>,
        graded_by: i64,
    ) -> Result<Option<Submission>>;

    /// 测验
    async fn create_quiz(
        &self,
        class_id: i64,
        created_by: i64,
        quiz: CreateQuizRequest,
    ) -> Result<Quiz>;
    async fn get_quiz_by_id(&self, id: i64) -> Result<Option<Quiz>>;
    async fn list_quizzes_with_pagination(
        &self,
        query: QuizListQuery,
    ) -> Result<PaginatedResponse<Quiz>>;
    async fn update_quiz(&self, id: i64, update: UpdateQuizRequest) -> Result<Option<Quiz>>;
    async fn delete_quiz(&self, id: i64) -> Result<bool>;

    /// 测验作答
    async fn create_attempt(&self, attempt: NewAttempt) -> Result<QuizAttempt>;
    async fn get_attempt_by_id(&self, id: i64) -> Result<Option<QuizAttempt>>;
    async fn get_in_progress_attempt(
        &self,
        quiz_id: i64,
        student_id: i64,
    ) -> Result<Option<QuizAttempt>>;
    async fn count_attempts(&self, quiz_id: i64, student_id: i64) -> Result<i64>;
    // 仅作答中的记录可保存，否则返回 None
    async fn save_attempt_answers(
        &self,
        id: i64,
        answers: AnswerSheet,
    ) -> Result<Option<QuizAttempt>>;
    // 仅作答中的记录可结束，已结束返回 None
    async fn finalize_attempt(
        &self,
        id: i64,
        finalize: FinalizeAttempt,
    ) -> Result<Option<QuizAttempt>>;
    async fn list_attempts_with_pagination(
        &self,
        query: AttemptListQuery,
    ) -> Result<PaginatedResponse<QuizAttempt>>;

    /// 练习题
    async fn create_practice_question(
        &self,
        created_by: i64,
        question: CreatePracticeQuestionRequest,
    ) -> Result<PracticeQuestion>;
    async fn get_practice_question_by_id(&self, id: i64) -> Result<Option<PracticeQuestion>>;
    async fn list_practice_questions_with_pagination(
        &self,
        query: PracticeListQuery,
    ) -> Result<PaginatedResponse<PracticeQuestion>>;
    async fn random_practice_questions(
        &self,
        query: PracticeListQuery,
        count: usize,
    ) -> Result<Vec<PracticeQuestion>>;
    async fn update_practice_question(
        &self,
        id: i64,
        update: UpdatePracticeQuestionRequest,
    ) -> Result<Option<PracticeQuestion>>;
    async fn delete_practice_question(&self, id: i64) -> Result<bool>;
    async fn list_practice_topics(&self, visible_class_ids: Option<Vec<i64>>)
    -> Result<Vec<String>>;

    /// 考勤
    async fn create_attendance_session(&self, session: NewSession) -> Result<AttendanceSession>;
    async fn get_attendance_session_by_id(&self, id: i64) -> Result<Option<AttendanceSession>>;
    async fn list_attendance_sessions_with_pagination(
        &self,
        class_id: i64,
        page: Option<i64>,
        size: Option<i64>,
    ) -> Result<PaginatedResponse<AttendanceSession>>;
    async fn list_class_attendance_sessions(&self, class_id: i64)
    -> Result<Vec<AttendanceSession>>;
    // 提前结束签到：closes_at 改为 now
    async fn close_attendance_session(
        &self,
        id: i64,
        now: DateTime<Utc>,
    ) -> Result<Option<AttendanceSession>>;
    async fn delete_attendance_session(&self, id: i64) -> Result<bool>;
    // 每个学生每个场次一条记录
    async fn upsert_attendance_record(&self, record: UpsertRecord) -> Result<AttendanceRecord>;
    async fn get_attendance_record(
        &self,
        session_id: i64,
        student_id: i64,
    ) -> Result<Option<AttendanceRecord>>;
    async fn list_attendance_records(&self, session_ids: &[i64]) -> Result<Vec<AttendanceRecord>>;

    /// 私信
    async fn create_message(&self, sender_id: i64, message: SendMessageRequest)
    -> Result<Message>;
    async fn get_message_by_id(&self, id: i64) -> Result<Option<Message>>;
    async fn list_messages_with_pagination(
        &self,
        query: MessageListQuery,
    ) -> Result<PaginatedResponse<Message>>;
    async fn mark_message_read(&self, id: i64) -> Result<bool>;
    // 从用户一侧删除，双方都删除后移除记录
    async fn delete_message_for(&self, id: i64, user_id: i64) -> Result<bool>;
    async fn count_unread_messages(&self, user_id: i64) -> Result<i64>;

    /// 联系表单
    async fn create_contact_message(&self, contact: CreateContactRequest)
    -> Result<ContactMessage>;
    async fn get_contact_message_by_id(&self, id: i64) -> Result<Option<ContactMessage>>;
    async fn list_contact_messages_with_pagination(
        &self,
        query: ContactListQuery,
    ) -> Result<ContactListResponse>;
    async fn reply_contact_message(
        &self,
        id: i64,
        reply: &str,
        replied_by: i64,
    ) -> Result<Option<ContactMessage>>;
    async fn update_contact_status(
        &self,
        id: i64,
        status: ContactStatus,
    ) -> Result<Option<ContactMessage>>;
    async fn delete_contact_message(&self, id: i64) -> Result<bool>;

    /// 通知
    // 同一条通知发给多名用户，返回写入条数
    async fn create_notifications(
        &self,
        user_ids: &[i64],
        notification: NewNotification,
    ) -> Result<u64>;
    async fn list_notifications_with_pagination(
        &self,
        query: NotificationListQuery,
    ) -> Result<NotificationListResponse>;
    async fn get_notification_by_id(&self, id: i64) -> Result<Option<Notification>>;
    async fn mark_notification_read(&self, id: i64, user_id: i64) -> Result<bool>;
    async fn mark_all_notifications_read(&self, user_id: i64) -> Result<i64>;
    async fn delete_notification(&self, id: i64, user_id: i64) -> Result<bool>;
    async fn count_unread_notifications(&self, user_id: i64) -> Result<i64>;

    /// 文件管理方法
    async fn create_file(&self, file: NewFile) -> Result<File>;
    // 通过唯一 token 获取文件信息
    async fn get_file_by_token(&self, token: &str) -> Result<Option<File>>;

    /// 系统设置
    async fn list_all_settings(&self) -> Result<Vec<SystemSetting>>;
    async fn get_setting_by_key(&self, key: &str) -> Result<Option<SystemSetting>>;
    async fn update_setting(
        &self,
        key: &str,
        value: &str,
        user_id: i64,
        ip_address: Option<String>,
    ) -> Result<SystemSetting>;
    async fn batch_update_settings(
        &self,
        updates: Vec<(String, String)>,
        user_id: i64,
        ip_address: Option<String>,
    ) -> Result<Vec<SystemSetting>>;
    async fn list_setting_audits(
        &self,
        query: SettingAuditQuery,
    ) -> Result<SettingAuditListResponse>;

    /// 备份
    // 导出全部业务表，不含密码哈希与令牌
    async fn export_snapshot(&self) -> Result<TableSnapshot>;
    async fn create_backup_record(&self, backup: NewBackup) -> Result<Backup>;
    async fn get_backup_by_id(&self, id: i64) -> Result<Option<Backup>>;
    async fn list_backups_with_pagination(
        &self,
        page: Option<i64>,
        size: Option<i64>,
    ) -> Result<BackupListResponse>;
    // 按创建时间倒序，保留前 keep 条，返回其余
    async fn list_backups_beyond(&self, keep: usize) -> Result<Vec<Backup>>;
    async fn delete_backup_record(&self, id: i64) -> Result<bool>;

    /// 崩溃日志
    async fn create_crash_log(&self, log: NewCrashLog) -> Result<CrashLog>;
    async fn get_crash_log_by_id(&self, id: i64) -> Result<Option<CrashLog>>;
    async fn list_crash_logs_with_pagination(
        &self,
        query: CrashLogListQuery,
    ) -> Result<CrashLogListResponse>;
    async fn set_crash_log_resolved(
        &self,
        id: i64,
        resolved: bool,
        resolved_by: i64,
    ) -> Result<Option<CrashLog>>;
    async fn delete_crash_log(&self, id: i64) -> Result<bool>;
    async fn purge_resolved_crash_logs(&self) -> Result<u64>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
