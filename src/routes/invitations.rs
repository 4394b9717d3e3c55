use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::invitations::requests::{CreateInvitationRequest, InvitationListParams};
use crate::models::users::entities::UserRole;
use crate::services::InvitationService;
use crate::utils::SafeIDI64;

static INVITATION_SERVICE: Lazy<InvitationService> = Lazy::new(InvitationService::new_lazy);

pub async fn list_invitations(
    req: HttpRequest,
    query: web::Query<InvitationListParams>,
) -> ActixResult<HttpResponse> {
    INVITATION_SERVICE
        .list_invitations(query.into_inner(), &req)
        .await
}

pub async fn create_invitation(
    req: HttpRequest,
    invitation: web::Json<CreateInvitationRequest>,
) -> ActixResult<HttpResponse> {
    INVITATION_SERVICE
        .create_invitation(invitation.into_inner(), &req)
        .await
}

pub async fn delete_invitation(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    INVITATION_SERVICE.delete_invitation(id.0, &req).await
}

// 接受邀请的公开接口在 auth 路由下
pub fn configure_invitations_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/invitations")
            .wrap(middlewares::RequireRole::new_any(UserRole::staff_roles()))
            .wrap(middlewares::RequireJWT)
            .route("", web::get().to(list_invitations))
            .route("", web::post().to(create_invitation))
            .route("/{id}", web::delete().to(delete_invitation)),
    );
}
