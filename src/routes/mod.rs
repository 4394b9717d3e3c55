pub mod assignments;
pub mod attendance;
pub mod auth;
pub mod backups;
pub mod classes;
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

use actix_web::web;

pub use assignments::configure_assignments_routes;
pub use attendance::configure_attendance_routes;
pub use auth::configure_auth_routes;
pub use backups::configure_backups_routes;
pub use classes::configure_classes_routes;
pub use contact::configure_contact_routes;
pub use crash_logs::configure_crash_logs_routes;
pub use files::configure_file_routes;
pub use invitations::configure_invitations_routes;
pub use messages::configure_messages_routes;
pub use notes::configure_notes_routes;
pub use notifications::configure_notifications_routes;
pub use practice::configure_practice_routes;
pub use quizzes::configure_quizzes_routes;
pub use system::configure_system_routes;
pub use users::configure_user_routes;

/// 注册全部 API 路由
pub fn configure_api_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(configure_auth_routes)
        .configure(configure_user_routes)
        .configure(configure_invitations_routes)
        .configure(configure_classes_routes)
        .configure(configure_notes_routes)
        .configure(configure_assignments_routes)
        .configure(configure_quizzes_routes)
        .configure(configure_practice_routes)
        .configure(configure_attendance_routes)
        .configure(configure_messages_routes)
        .configure(configure_notifications_routes)
        .configure(configure_contact_routes)
        .configure(configure_file_routes)
        .configure(configure_system_routes)
        .configure(configure_backups_routes)
        .configure(configure_crash_logs_routes);
}
