//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod assignments;
mod attendance;
mod auth;
mod backups;
mod class_members;
mod classes;
mod crash_logs;
mod files;
mod messages;
mod notes;
mod notifications;
mod practice;
mod quizzes;
mod system_settings;
mod users;

#[cfg(test)]
mod tests;

use crate::config::AppConfig;
use crate::errors::{ClassHubError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(&config.database.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite://") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// 使用现有连接构建存储，并执行迁移
    pub async fn from_connection(db: DatabaseConnection) -> Result<Self> {
        Migrator::up(&db, None)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("数据库迁移失败: {e}")))?;
        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| ClassHubError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory")
            .pragma("mmap_size", "536870912")
            .pragma("wal_autocheckpoint", "1000");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.database.pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| ClassHubError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.database.pool_size)
            .min_connections(5)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| ClassHubError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite://") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") || url == ":memory:" {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(ClassHubError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

// Storage trait 实现
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
use crate::storage::{Storage, TableSnapshot};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[async_trait]
impl Storage for SeaOrmStorage {
    // 用户管理方法
    async fn create_user(&self, user: CreateUserRequest) -> Result<User> {
        self.create_user_impl(user).await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_users_by_ids(&self, ids: &[i64]) -> Result<Vec<User>> {
        self.get_users_by_ids_impl(ids).await
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.get_user_by_username_impl(username).await
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.get_user_by_email_impl(email).await
    }

    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>> {
        self.get_user_by_username_or_email_impl(identifier).await
    }

    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse> {
        self.list_users_with_pagination_impl(query).await
    }

    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>> {
        self.update_user_impl(id, update).await
    }

    async fn delete_user(&self, id: i64) -> Result<bool> {
        self.delete_user_impl(id).await
    }

    async fn update_last_login(&self, id: i64) -> Result<bool> {
        self.update_last_login_impl(id).await
    }

    async fn count_users(&self) -> Result<u64> {
        self.count_users_impl().await
    }

    // 密码重置
    async fn create_password_reset(
        &self,
        user_id: i64,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<PasswordReset> {
        self.create_password_reset_impl(user_id, token, expires_at).await
    }

    async fn get_password_reset_by_token(&self, token: &str) -> Result<Option<PasswordReset>> {
        self.get_password_reset_by_token_impl(token).await
    }

    async fn consume_password_reset(&self, id: i64, user_id: i64) -> Result<bool> {
        self.consume_password_reset_impl(id, user_id).await
    }

    // 邀请
    async fn create_invitation(&self, invitation: NewInvitation) -> Result<Invitation> {
        self.create_invitation_impl(invitation).await
    }

    async fn get_invitation_by_id(&self, id: i64) -> Result<Option<Invitation>> {
        self.get_invitation_by_id_impl(id).await
    }

    async fn get_invitation_by_token(&self, token: &str) -> Result<Option<Invitation>> {
        self.get_invitation_by_token_impl(token).await
    }

    async fn list_invitations_with_pagination(
        &self,
        query: InvitationListQuery,
    ) -> Result<InvitationListResponse> {
        self.list_invitations_with_pagination_impl(query).await
    }

    async fn mark_invitation_accepted(&self, id: i64) -> Result<bool> {
        self.mark_invitation_accepted_impl(id).await
    }

    async fn release_invitation(&self, id: i64) -> Result<bool> {
        self.release_invitation_impl(id).await
    }

    async fn delete_invitation(&self, id: i64) -> Result<bool> {
        self.delete_invitation_impl(id).await
    }

    // 班级管理方法
    async fn create_class(
        &self,
        professor_id: i64,
        name: &str,
        description: Option<String>,
        invite_code: &str,
    ) -> Result<Class> {
        self.create_class_impl(professor_id, name, description, invite_code).await
    }

    async fn get_class_by_id(&self, class_id: i64) -> Result<Option<Class>> {
        self.get_class_by_id_impl(class_id).await
    }

    async fn get_class_by_invite_code(&self, invite_code: &str) -> Result<Option<Class>> {
        self.get_class_by_invite_code_impl(invite_code).await
    }

    async fn list_classes_with_pagination(&self, query: ClassListQuery)
    -> Result<ClassListResponse> {
        self.list_classes_with_pagination_impl(query).await
    }

    async fn update_class(&self, class_id: i64, update: UpdateClassRequest)
    -> Result<Option<Class>> {
        self.update_class_impl(class_id, update).await
    }

    async fn update_class_invite_code(
        &self,
        class_id: i64,
        invite_code: &str,
    ) -> Result<Option<Class>> {
        self.update_class_invite_code_impl(class_id, invite_code).await
    }

    async fn delete_class(&self, class_id: i64) -> Result<bool> {
        self.delete_class_impl(class_id).await
    }

    // 班级成员管理方法
    async fn add_class_member(
        &self,
        class_id: i64,
        user_id: i64,
        role: ClassMemberRole,
    ) -> Result<ClassMember> {
        self.add_class_member_impl(class_id, user_id, role).await
    }

    async fn get_class_member(&self, class_id: i64, user_id: i64) -> Result<Option<ClassMember>> {
        self.get_class_member_impl(class_id, user_id).await
    }

    async fn update_class_member_role(
        &self,
        class_id: i64,
        user_id: i64,
        role: ClassMemberRole,
    ) -> Result<Option<ClassMember>> {
        self.update_class_member_role_impl(class_id, user_id, role).await
    }

    async fn remove_class_member(&self, class_id: i64, user_id: i64) -> Result<bool> {
        self.remove_class_member_impl(class_id, user_id).await
    }

    async fn list_class_members_with_pagination(
        &self,
        class_id: i64,
        query: ClassMemberQuery,
    ) -> Result<ClassMemberListResponse> {
        self.list_class_members_with_pagination_impl(class_id, query).await
    }

    async fn count_class_members(&self, class_id: i64) -> Result<i64> {
        self.count_class_members_impl(class_id).await
    }

    async fn list_class_users(
        &self,
        class_id: i64,
        role: Option<ClassMemberRole>,
    ) -> Result<Vec<User>> {
        self.list_class_users_impl(class_id, role).await
    }

    async fn list_user_class_ids(&self, user_id: i64) -> Result<Vec<i64>> {
        self.list_user_class_ids_impl(user_id).await
    }

    // 笔记
    async fn create_note(
        &self,
        class_id: i64,
        author_id: i64,
        note: CreateNoteRequest,
    ) -> Result<Note> {
        self.create_note_impl(class_id, author_id, note).await
    }

    async fn get_note_by_id(&self, id: i64) -> Result<Option<Note>> {
        self.get_note_by_id_impl(id).await
    }

    async fn list_notes_with_pagination(&self, query: NoteListQuery) -> Result<NoteListResponse> {
        self.list_notes_with_pagination_impl(query).await
    }

    async fn update_note(&self, id: i64, update: UpdateNoteRequest) -> Result<Option<Note>> {
        self.update_note_impl(id, update).await
    }

    async fn delete_note(&self, id: i64) -> Result<bool> {
        self.delete_note_impl(id).await
    }

    // 作业
    async fn create_assignment(
        &self,
        class_id: i64,
        created_by: i64,
        assignment: CreateAssignmentRequest,
    ) -> Result<Assignment> {
        self.create_assignment_impl(class_id, created_by, assignment).await
    }

    async fn get_assignment_by_id(&self, id: i64) -> Result<Option<Assignment>> {
        self.get_assignment_by_id_impl(id).await
    }

    async fn list_assignments_with_pagination(
        &self,
        query: AssignmentListQuery,
    ) -> Result<PaginatedResponse<Assignment>> {
        self.list_assignments_with_pagination_impl(query).await
    }

    async fn update_assignment(
        &self,
        id: i64,
        update: UpdateAssignmentRequest,
    ) -> Result<Option<Assignment>> {
        self.update_assignment_impl(id, update).await
    }

    async fn delete_assignment(&self, id: i64) -> Result<bool> {
        self.delete_assignment_impl(id).await
    }

    async fn count_pending_assignments(&self, student_id: i64, now: DateTime<Utc>)
    -> Result<i64> {
        self.count_pending_assignments_impl(student_id, now).await
    }

    // 作业提交
    async fn upsert_submission(&self, submission: UpsertSubmission) -> Result<Submission> {
        self.upsert_submission_impl(submission).await
    }

    async fn get_submission_by_id(&self, id: i64) -> Result<Option<Submission>> {
        self.get_submission_by_id_impl(id).await
    }

    async fn get_student_submission(
        &self,
        assignment_id: i64,
        student_id: i64,
    ) -> Result<Option<Submission>> {
        self.get_student_submission_impl(assignment_id, student_id).await
    }

    async fn list_student_submissions(
        &self,
        student_id: i64,
        assignment_ids: &[i64],
    ) -> Result<Vec<Submission>> {
        self.list_student_submissions_impl(student_id, assignment_ids).await
    }

    async fn list_submissions_with_pagination(
        &self,
        query: SubmissionListQuery,
    ) -> Result<PaginatedResponse<Submission>> {
        self.list_submissions_with_pagination_impl(query).await
    }

    async fn grade_submission(
        &self,
        id: i64,
        score: f64,
        feedback: Option<String>,
        graded_by: i64,
    ) -> Result<Option<Submission>> {
        self.grade_submission_impl(id, score, feedback, graded_by).await
    }

    // 测验
    async fn create_quiz(
        &self,
        class_id: i64,
        created_by: i64,
        quiz: CreateQuizRequest,
    ) -> Result<Quiz> {
        self.create_quiz_impl(class_id, created_by, quiz).await
    }

    async fn get_quiz_by_id(&self, id: i64) -> Result<Option<Quiz>> {
        self.get_quiz_by_id_impl(id).await
    }

    async fn list_quizzes_with_pagination(
        &self,
        query: QuizListQuery,
    ) -> Result<PaginatedResponse<Quiz>> {
        self.list_quizzes_with_pagination_impl(query).await
    }

    async fn update_quiz(&self, id: i64, update: UpdateQuizRequest) -> Result<Option<Quiz>> {
        self.update_quiz_impl(id, update).await
    }

    async fn delete_quiz(&self, id: i64) -> Result<bool> {
        self.delete_quiz_impl(id).await
    }

    // 测验作答
    async fn create_attempt(&self, attempt: NewAttempt) -> Result<QuizAttempt> {
        self.create_attempt_impl(attempt).await
    }

    async fn get_attempt_by_id(&self, id: i64) -> Result<Option<QuizAttempt>> {
        self.get_attempt_by_id_impl(id).await
    }

    async fn get_in_progress_attempt(
        &self,
        quiz_id: i64,
        student_id: i64,
    ) -> Result<Option<QuizAttempt>> {
        self.get_in_progress_attempt_impl(quiz_id, student_id).await
    }

    async fn count_attempts(&self, quiz_id: i64, student_id: i64) -> Result<i64> {
        self.count_attempts_impl(quiz_id, student_id).await
    }

    async fn save_attempt_answers(
        &self,
        id: i64,
        answers: AnswerSheet,
    ) -> Result<Option<QuizAttempt>> {
        self.save_attempt_answers_impl(id, answers).await
    }

    async fn finalize_attempt(
        &self,
        id: i64,
        finalize: FinalizeAttempt,
    ) -> Result<Option<QuizAttempt>> {
        self.finalize_attempt_impl(id, finalize).await
    }

    async fn list_attempts_with_pagination(
        &self,
        query: AttemptListQuery,
    ) -> Result<PaginatedResponse<QuizAttempt>> {
        self.list_attempts_with_pagination_impl(query).await
    }

    // 练习题
    async fn create_practice_question(
        &self,
        created_by: i64,
        question: CreatePracticeQuestionRequest,
    ) -> Result<PracticeQuestion> {
        self.create_practice_question_impl(created_by, question).await
    }

    async fn get_practice_question_by_id(&self, id: i64) -> Result<Option<PracticeQuestion>> {
        self.get_practice_question_by_id_impl(id).await
    }

    async fn list_practice_questions_with_pagination(
        &self,
        query: PracticeListQuery,
    ) -> Result<PaginatedResponse<PracticeQuestion>> {
        self.list_practice_questions_with_pagination_impl(query).await
    }

    async fn random_practice_questions(
        &self,
        query: PracticeListQuery,
        count: usize,
    ) -> Result<Vec<PracticeQuestion>> {
        self.random_practice_questions_impl(query, count).await
    }

    async fn update_practice_question(
        &self,
        id: i64,
        update: UpdatePracticeQuestionRequest,
    ) -> Result<Option<PracticeQuestion>> {
        self.update_practice_question_impl(id, update).await
    }

    async fn delete_practice_question(&self, id: i64) -> Result<bool> {
        self.delete_practice_question_impl(id).await
    }

    async fn list_practice_topics(&self, visible_class_ids: Option<Vec<i64>>)
    -> Result<Vec<String>> {
        self.list_practice_topics_impl(visible_class_ids).await
    }

    // 考勤
    async fn create_attendance_session(&self, session: NewSession) -> Result<AttendanceSession> {
        self.create_attendance_session_impl(session).await
    }

    async fn get_attendance_session_by_id(&self, id: i64) -> Result<Option<AttendanceSession>> {
        self.get_attendance_session_by_id_impl(id).await
    }

    async fn list_attendance_sessions_with_pagination(
        &self,
        class_id: i64,
        page: Option<i64>,
        size: Option<i64>,
    ) -> Result<PaginatedResponse<AttendanceSession>> {
        self.list_attendance_sessions_with_pagination_impl(class_id, page, size).await
    }

    async fn list_class_attendance_sessions(&self, class_id: i64)
    -> Result<Vec<AttendanceSession>> {
        self.list_class_attendance_sessions_impl(class_id).await
    }

    async fn close_attendance_session(
        &self,
        id: i64,
        now: DateTime<Utc>,
    ) -> Result<Option<AttendanceSession>> {
        self.close_attendance_session_impl(id, now).await
    }

    async fn delete_attendance_session(&self, id: i64) -> Result<bool> {
        self.delete_attendance_session_impl(id).await
    }

    async fn upsert_attendance_record(&self, record: UpsertRecord) -> Result<AttendanceRecord> {
        self.upsert_attendance_record_impl(record).await
    }

    async fn get_attendance_record(
        &self,
        session_id: i64,
        student_id: i64,
    ) -> Result<Option<AttendanceRecord>> {
        self.get_attendance_record_impl(session_id, student_id).await
    }

    async fn list_attendance_records(&self, session_ids: &[i64]) -> Result<Vec<AttendanceRecord>> {
        self.list_attendance_records_impl(session_ids).await
    }

    // 私信
    async fn create_message(&self, sender_id: i64, message: SendMessageRequest)
    -> Result<Message> {
        self.create_message_impl(sender_id, message).await
    }

    async fn get_message_by_id(&self, id: i64) -> Result<Option<Message>> {
        self.get_message_by_id_impl(id).await
    }

    async fn list_messages_with_pagination(
        &self,
        query: MessageListQuery,
    ) -> Result<PaginatedResponse<Message>> {
        self.list_messages_with_pagination_impl(query).await
    }

    async fn mark_message_read(&self, id: i64) -> Result<bool> {
        self.mark_message_read_impl(id).await
    }

    async fn delete_message_for(&self, id: i64, user_id: i64) -> Result<bool> {
        self.delete_message_for_impl(id, user_id).await
    }

    async fn count_unread_messages(&self, user_id: i64) -> Result<i64> {
        self.count_unread_messages_impl(user_id).await
    }

    // 联系表单
    async fn create_contact_message(&self, contact: CreateContactRequest)
    -> Result<ContactMessage> {
        self.create_contact_message_impl(contact).await
    }

    async fn get_contact_message_by_id(&self, id: i64) -> Result<Option<ContactMessage>> {
        self.get_contact_message_by_id_impl(id).await
    }

    async fn list_contact_messages_with_pagination(
        &self,
        query: ContactListQuery,
    ) -> Result<ContactListResponse> {
        self.list_contact_messages_with_pagination_impl(query).await
    }

    async fn reply_contact_message(
        &self,
        id: i64,
        reply: &str,
        replied_by: i64,
    ) -> Result<Option<ContactMessage>> {
        self.reply_contact_message_impl(id, reply, replied_by).await
    }

    async fn update_contact_status(
        &self,
        id: i64,
        status: ContactStatus,
    ) -> Result<Option<ContactMessage>> {
        self.update_contact_status_impl(id, status).await
    }

    async fn delete_contact_message(&self, id: i64) -> Result<bool> {
        self.delete_contact_message_impl(id).await
    }

    // 通知
    async fn create_notifications(
        &self,
        user_ids: &[i64],
        notification: NewNotification,
    ) -> Result<u64> {
        self.create_notifications_impl(user_ids, notification).await
    }

    async fn list_notifications_with_pagination(
        &self,
        query: NotificationListQuery,
    ) -> Result<NotificationListResponse> {
        self.list_notifications_with_pagination_impl(query).await
    }

    async fn get_notification_by_id(&self, id: i64) -> Result<Option<Notification>> {
        self.get_notification_by_id_impl(id).await
    }

    async fn mark_notification_read(&self, id: i64, user_id: i64) -> Result<bool> {
        self.mark_notification_read_impl(id, user_id).await
    }

    async fn mark_all_notifications_read(&self, user_id: i64) -> Result<i64> {
        self.mark_all_notifications_read_impl(user_id).await
    }

    async fn delete_notification(&self, id: i64, user_id: i64) -> Result<bool> {
        self.delete_notification_impl(id, user_id).await
    }

    async fn count_unread_notifications(&self, user_id: i64) -> Result<i64> {
        self.count_unread_notifications_impl(user_id).await
    }

    // 文件管理方法
    async fn create_file(&self, file: NewFile) -> Result<File> {
        self.create_file_impl(file).await
    }

    async fn get_file_by_token(&self, token: &str) -> Result<Option<File>> {
        self.get_file_by_token_impl(token).await
    }

    // 系统设置
    async fn list_all_settings(&self) -> Result<Vec<SystemSetting>> {
        self.list_all_settings_impl().await
    }

    async fn get_setting_by_key(&self, key: &str) -> Result<Option<SystemSetting>> {
        self.get_setting_by_key_impl(key).await
    }

    async fn update_setting(
        &self,
        key: &str,
        value: &str,
        user_id: i64,
        ip_address: Option<String>,
    ) -> Result<SystemSetting> {
        self.update_setting_impl(key, value, user_id, ip_address).await
    }

    async fn batch_update_settings(
        &self,
        updates: Vec<(String, String)>,
        user_id: i64,
        ip_address: Option<String>,
    ) -> Result<Vec<SystemSetting>> {
        self.batch_update_settings_impl(updates, user_id, ip_address).await
    }

    async fn list_setting_audits(
        &self,
        query: SettingAuditQuery,
    ) -> Result<SettingAuditListResponse> {
        self.list_setting_audits_impl(query).await
    }

    // 备份
    async fn export_snapshot(&self) -> Result<TableSnapshot> {
        self.export_snapshot_impl().await
    }

    async fn create_backup_record(&self, backup: NewBackup) -> Result<Backup> {
        self.create_backup_record_impl(backup).await
    }

    async fn get_backup_by_id(&self, id: i64) -> Result<Option<Backup>> {
        self.get_backup_by_id_impl(id).await
    }

    async fn list_backups_with_pagination(
        &self,
        page: Option<i64>,
        size: Option<i64>,
    ) -> Result<BackupListResponse> {
        self.list_backups_with_pagination_impl(page, size).await
    }

    async fn list_backups_beyond(&self, keep: usize) -> Result<Vec<Backup>> {
        self.list_backups_beyond_impl(keep).await
    }

    async fn delete_backup_record(&self, id: i64) -> Result<bool> {
        self.delete_backup_record_impl(id).await
    }

    // 崩溃日志
    async fn create_crash_log(&self, log: NewCrashLog) -> Result<CrashLog> {
        self.create_crash_log_impl(log).await
    }

    async fn get_crash_log_by_id(&self, id: i64) -> Result<Option<CrashLog>> {
        self.get_crash_log_by_id_impl(id).await
    }

    async fn list_crash_logs_with_pagination(
        &self,
        query: CrashLogListQuery,
    ) -> Result<CrashLogListResponse> {
        self.list_crash_logs_with_pagination_impl(query).await
    }

    async fn set_crash_log_resolved(
        &self,
        id: i64,
        resolved: bool,
        resolved_by: i64,
    ) -> Result<Option<CrashLog>> {
        self.set_crash_log_resolved_impl(id, resolved, resolved_by).await
    }

    async fn delete_crash_log(&self, id: i64) -> Result<bool> {
        self.delete_crash_log_impl(id).await
    }

    async fn purge_resolved_crash_logs(&self) -> Result<u64> {
        self.purge_resolved_crash_logs_impl().await
    }
}
