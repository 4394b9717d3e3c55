use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::practice::requests::{
    CheckAnswerRequest, CreatePracticeQuestionRequest, PracticeListParams, RandomPracticeParams,
    UpdatePracticeQuestionRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::PracticeService;
use crate::utils::SafeIDI64;

static PRACTICE_SERVICE: Lazy<PracticeService> = Lazy::new(PracticeService::new_lazy);

pub async fn list_questions(
    req: HttpRequest,
    query: web::Query<PracticeListParams>,
) -> ActixResult<HttpResponse> {
    PRACTICE_SERVICE.list_questions(&req, query.into_inner()).await
}

pub async fn random_questions(
    req: HttpRequest,
    query: web::Query<RandomPracticeParams>,
) -> ActixResult<HttpResponse> {
    PRACTICE_SERVICE.random_questions(&req, query.into_inner()).await
}

pub async fn list_topics(req: HttpRequest) -> ActixResult<HttpResponse> {
    PRACTICE_SERVICE.list_topics(&req).await
}

pub async fn create_question(
    req: HttpRequest,
    question: web::Json<CreatePracticeQuestionRequest>,
) -> ActixResult<HttpResponse> {
    PRACTICE_SERVICE.create_question(&req, question.into_inner()).await
}

pub async fn get_question(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    PRACTICE_SERVICE.get_question(&req, id.0).await
}

pub async fn update_question(
    req: HttpRequest,
    id: SafeIDI64,
    update: web::Json<UpdatePracticeQuestionRequest>,
) -> ActixResult<HttpResponse> {
    PRACTICE_SERVICE
        .update_question(&req, id.0, update.into_inner())
        .await
}

pub async fn delete_question(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    PRACTICE_SERVICE.delete_question(&req, id.0).await
}

pub async fn check_answer(
    req: HttpRequest,
    id: SafeIDI64,
    answer: web::Json<CheckAnswerRequest>,
) -> ActixResult<HttpResponse> {
    PRACTICE_SERVICE.check_answer(&req, id.0, answer.into_inner()).await
}

pub fn configure_practice_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/practice")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("/questions").route(web::get().to(list_questions)).route(
                    web::post()
                        .to(create_question)
                        .wrap(middlewares::RequireRole::new_any(UserRole::staff_roles())),
                ),
            )
            .route("/questions/random", web::get().to(random_questions))
            .route("/topics", web::get().to(list_topics))
            .service(
                web::resource("/questions/{id}")
                    .route(web::get().to(get_question))
                    .route(web::put().to(update_question))
                    .route(web::delete().to(delete_question)),
            )
            .route("/questions/{id}/check", web::post().to(check_answer)),
    );
}
