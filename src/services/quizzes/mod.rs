pub mod attempts;
pub mod create;
pub mod delete;
pub mod get;
pub mod grading;
pub mod list;
pub mod update;

use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use super::access::{ClassAccess, load_class_access};
use super::{declare_service, finish, internal, reject};
use crate::config::AppConfig;
use crate::mail::{EmailTemplate, Mailer};
use crate::models::{
    ErrorCode,
    classes::entities::Class,
    notifications::{
        entities::{NotificationType, ReferenceType},
        requests::NewNotification,
    },
    quizzes::{
        entities::Quiz,
        requests::{
            AttemptListParams, CreateQuizRequest, QuizListParams, SaveAnswersRequest,
            UpdateQuizRequest,
        },
    },
    users::entities::User,
};
use crate::services::notifications::publish::notify_class_students;
use crate::storage::Storage;

declare_service!(QuizService);

const QUIZ_TITLE_MAX: usize = 200;

impl QuizService {
    pub async fn list_quizzes(
        &self,
        request: &HttpRequest,
        class_id: i64,
        query: QuizListParams,
    ) -> ActixResult<HttpResponse> {
        finish(list::list_quizzes(self, request, class_id, query).await)
    }

    pub async fn create_quiz(
        &self,
        request: &HttpRequest,
        class_id: i64,
        quiz: CreateQuizRequest,
    ) -> ActixResult<HttpResponse> {
        finish(create::create_quiz(self, request, class_id, quiz).await)
    }

    pub async fn get_quiz(&self, request: &HttpRequest, quiz_id: i64) -> ActixResult<HttpResponse> {
        finish(get::get_quiz(self, request, quiz_id).await)
    }

    pub async fn update_quiz(
        &self,
        request: &HttpRequest,
        quiz_id: i64,
        update: UpdateQuizRequest,
    ) -> ActixResult<HttpResponse> {
        finish(update::update_quiz(self, request, quiz_id, update).await)
    }

    pub async fn delete_quiz(
        &self,
        request: &HttpRequest,
        quiz_id: i64,
    ) -> ActixResult<HttpResponse> {
        finish(delete::delete_quiz(self, request, quiz_id).await)
    }

    // 开始作答，已有进行中的作答则继续
    pub async fn start_attempt(
        &self,
        request: &HttpRequest,
        quiz_id: i64,
    ) -> ActixResult<HttpResponse> {
        finish(attempts::start_attempt(self, request, quiz_id).await)
    }

    pub async fn list_attempts(
        &self,
        request: &HttpRequest,
        quiz_id: i64,
        query: AttemptListParams,
    ) -> ActixResult<HttpResponse> {
        finish(attempts::list_attempts(self, request, quiz_id, query).await)
    }

    pub async fn get_attempt(
        &self,
        request: &HttpRequest,
        attempt_id: i64,
    ) -> ActixResult<HttpResponse> {
        finish(attempts::get_attempt(self, request, attempt_id).await)
    }

    // 自动保存
    pub async fn save_answers(
        &self,
        request: &HttpRequest,
        attempt_id: i64,
        answers: SaveAnswersRequest,
    ) -> ActixResult<HttpResponse> {
        finish(attempts::save_answers(self, request, attempt_id, answers).await)
    }

    pub async fn submit_attempt(
        &self,
        request: &HttpRequest,
        attempt_id: i64,
        answers: SaveAnswersRequest,
    ) -> ActixResult<HttpResponse> {
        finish(attempts::submit_attempt(self, request, attempt_id, answers).await)
    }
}

/// 加载测验；学生看不到未发布的测验
pub(super) async fn load_quiz(
    storage: &dyn Storage,
    user: &User,
    quiz_id: i64,
) -> Result<(Quiz, Class, ClassAccess), HttpResponse> {
    let not_found = || reject(StatusCode::NOT_FOUND, ErrorCode::QuizNotFound, "Quiz not found");

    let quiz = storage
        .get_quiz_by_id(quiz_id)
        .await
        .map_err(internal("Failed to get quiz"))?
        .ok_or_else(not_found)?;
    let (class, access) = load_class_access(storage, user, quiz.class_id).await?;
    if !quiz.published && !access.can_manage_content() {
        return Err(not_found());
    }
    Ok((quiz, class, access))
}

pub(super) fn require_manager(access: &ClassAccess) -> Result<(), HttpResponse> {
    if access.can_manage_content() {
        Ok(())
    } else {
        Err(reject(
            StatusCode::FORBIDDEN,
            ErrorCode::ClassPermissionDenied,
            "Only professors and assistants of this class can manage quizzes",
        ))
    }
}

pub(super) fn invalid_quiz(message: String) -> HttpResponse {
    reject(StatusCode::BAD_REQUEST, ErrorCode::QuizInvalid, message)
}

/// 测验发布时通知学生
pub(super) async fn announce(storage: &dyn Storage, mailer: Arc<dyn Mailer>, class: &Class, quiz: &Quiz) {
    let available_until = quiz
        .available_until
        .map(|d| d.format("%Y-%m-%d %H:%M UTC").to_string());
    notify_class_students(
        storage,
        mailer,
        class.id,
        NewNotification {
            notification_type: NotificationType::QuizPublished,
            title: quiz.title.clone(),
            content: Some(format!("New quiz in {}", class.name)),
            reference_type: Some(ReferenceType::Quiz),
            reference_id: Some(quiz.id),
        },
        Some(EmailTemplate::QuizPublished {
            class_name: class.name.clone(),
            title: quiz.title.clone(),
            available_until,
            time_limit_minutes: quiz.time_limit_minutes,
            link: AppConfig::get().public_link(&format!("classes/{}/quizzes/{}", class.id, quiz.id)),
        }),
    )
    .await;
}
