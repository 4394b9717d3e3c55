//! SeaORM 实体定义
//!
//! 这些实体用于数据库操作，与 models 模块中的业务实体分离。
//! Storage 层使用这些实体进行 CRUD 操作，然后转换为 models 中的业务实体。
//! 时间统一存储为 unix 秒，列表类字段存储为 JSON 文本。

pub mod prelude;

pub mod assignments;
pub mod attendance_records;
pub mod attendance_sessions;
pub mod backups;
pub mod class_members;
pub mod classes;
pub mod contact_messages;
pub mod crash_logs;
pub mod files;
pub mod invitations;
pub mod messages;
pub mod notes;
pub mod notifications;
pub mod password_resets;
pub mod practice_questions;
pub mod quiz_attempts;
pub mod quizzes;
pub mod submissions;
pub mod system_settings;
pub mod system_settings_audit;
pub mod users;
