use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::quizzes::requests::{
    AttemptListParams, CreateQuizRequest, QuizListParams, SaveAnswersRequest, UpdateQuizRequest,
};
use crate::services::QuizService;
use crate::utils::{SafeClassIdI64, SafeIDI64};

static QUIZ_SERVICE: Lazy<QuizService> = Lazy::new(QuizService::new_lazy);

pub async fn list_quizzes(
    req: HttpRequest,
    class_id: SafeClassIdI64,
    query: web::Query<QuizListParams>,
) -> ActixResult<HttpResponse> {
    QUIZ_SERVICE.list_quizzes(&req, class_id.0, query.into_inner()).await
}

pub async fn create_quiz(
    req: HttpRequest,
    class_id: SafeClassIdI64,
    quiz: web::Json<CreateQuizRequest>,
) -> ActixResult<HttpResponse> {
    QUIZ_SERVICE.create_quiz(&req, class_id.0, quiz.into_inner()).await
}

pub async fn get_quiz(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    QUIZ_SERVICE.get_quiz(&req, id.0).await
}

pub async fn update_quiz(
    req: HttpRequest,
    id: SafeIDI64,
    update: web::Json<UpdateQuizRequest>,
) -> ActixResult<HttpResponse> {
    QUIZ_SERVICE.update_quiz(&req, id.0, update.into_inner()).await
}

pub async fn delete_quiz(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    QUIZ_SERVICE.delete_quiz(&req, id.0).await
}

pub async fn start_attempt(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    QUIZ_SERVICE.start_attempt(&req, id.0).await
}

pub async fn list_attempts(
    req: HttpRequest,
    id: SafeIDI64,
    query: web::Query<AttemptListParams>,
) -> ActixResult<HttpResponse> {
    QUIZ_SERVICE.list_attempts(&req, id.0, query.into_inner()).await
}

pub async fn get_attempt(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    QUIZ_SERVICE.get_attempt(&req, id.0).await
}

pub async fn save_answers(
    req: HttpRequest,
    id: SafeIDI64,
    answers: web::Json<SaveAnswersRequest>,
) -> ActixResult<HttpResponse> {
    QUIZ_SERVICE.save_answers(&req, id.0, answers.into_inner()).await
}

pub async fn submit_attempt(
    req: HttpRequest,
    id: SafeIDI64,
    answers: web::Json<SaveAnswersRequest>,
) -> ActixResult<HttpResponse> {
    QUIZ_SERVICE.submit_attempt(&req, id.0, answers.into_inner()).await
}

/// 挂在 `/api/v1/classes` 下
pub fn configure_class_scoped(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/{class_id}/quizzes")
            .route(web::get().to(list_quizzes))
            .route(web::post().to(create_quiz)),
    );
}

pub fn configure_quizzes_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/quizzes")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_quiz))
                    .route(web::put().to(update_quiz))
                    .route(web::delete().to(delete_quiz)),
            )
            .service(
                // 开始作答时若已有进行中的尝试则直接返回
                web::resource("/{id}/attempts")
                    .route(web::get().to(list_attempts))
                    .route(web::post().to(start_attempt)),
            ),
    )
    .service(
        web::scope("/api/v1/quiz-attempts")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_attempt))
                    .route(web::put().to(save_answers)),
            )
            .route("/{id}/submit", web::post().to(submit_attempt)),
    );
}
