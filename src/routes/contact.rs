use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{self, RateLimit};
use crate::models::contact::requests::{
    ContactListParams, CreateContactRequest, ReplyContactRequest, UpdateContactStatusRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::ContactService;
use crate::utils::SafeIDI64;

static CONTACT_SERVICE: Lazy<ContactService> = Lazy::new(ContactService::new_lazy);

pub async fn create_contact(
    req: HttpRequest,
    contact: web::Json<CreateContactRequest>,
) -> ActixResult<HttpResponse> {
    CONTACT_SERVICE.create_contact(&req, contact.into_inner()).await
}

pub async fn list_contacts(
    req: HttpRequest,
    query: web::Query<ContactListParams>,
) -> ActixResult<HttpResponse> {
    CONTACT_SERVICE.list_contacts(&req, query.into_inner()).await
}

pub async fn get_contact(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    CONTACT_SERVICE.get_contact(&req, id.0).await
}

pub async fn update_status(
    req: HttpRequest,
    id: SafeIDI64,
    update: web::Json<UpdateContactStatusRequest>,
) -> ActixResult<HttpResponse> {
    CONTACT_SERVICE
        .update_status(&req, id.0, update.into_inner())
        .await
}

pub async fn reply_contact(
    req: HttpRequest,
    id: SafeIDI64,
    reply: web::Json<ReplyContactRequest>,
) -> ActixResult<HttpResponse> {
    CONTACT_SERVICE
        .reply_contact(&req, id.0, reply.into_inner())
        .await
}

pub async fn delete_contact(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    CONTACT_SERVICE.delete_contact(&req, id.0).await
}

pub fn configure_contact_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/contact")
            // 公开提交，其余仅管理员
            .service(
                web::resource("")
                    .route(web::post().to(create_contact).wrap(RateLimit::contact_form()))
                    .route(
                        web::get()
                            .to(list_contacts)
                            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles()))
                            .wrap(middlewares::RequireJWT),
                    ),
            )
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles()))
                    .wrap(middlewares::RequireJWT)
                    .service(
                        web::resource("/{id}")
                            .route(web::get().to(get_contact))
                            .route(web::delete().to(delete_contact)),
                    )
                    .route("/{id}/status", web::put().to(update_status))
                    .route("/{id}/reply", web::post().to(reply_contact)),
            ),
    );
}
