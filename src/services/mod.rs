/// 声明一个从 app_data 懒取存储的服务
macro_rules! declare_service {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        pub struct $name {
            storage: Option<std::sync::Arc<dyn $crate::storage::Storage>>,
        }

        impl $name {
            pub fn new_lazy() -> Self {
                Self { storage: None }
            }

            pub(crate) fn get_storage(
                &self,
                request: &actix_web::HttpRequest,
            ) -> std::sync::Arc<dyn $crate::storage::Storage> {
                if let Some(storage) = &self.storage {
                    storage.clone()
                } else {
                    request
                        .app_data::<actix_web::web::Data<std::sync::Arc<dyn $crate::storage::Storage>>>()
                        .expect("Storage not found in app data")
                        .get_ref()
                        .clone()
                }
            }
        }
    };
}

pub(crate) use declare_service;

pub mod access;
pub mod assignments;
pub mod attendance;
pub mod auth;
pub mod backups;
pub mod class_members;
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

mod common;

pub(crate) use common::{Reply, client_ip, current_user, finish, get_mailer, internal, reject};

pub use assignments::AssignmentService;
pub use attendance::AttendanceService;
pub use auth::AuthService;
pub use backups::BackupService;
pub use class_members::ClassMemberService;
pub use classes::ClassService;
pub use contact::ContactService;
pub use crash_logs::CrashLogService;
pub use files::FileService;
pub use invitations::InvitationService;
pub use messages::MessageService;
pub use notes::NoteService;
pub use notifications::NotificationService;
pub use practice::PracticeService;
pub use quizzes::QuizService;
pub use system::SystemService;
pub use users::UserService;
