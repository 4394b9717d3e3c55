use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse};

use super::InvitationService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{Reply, current_user, internal, reject};

pub async fn delete_invitation(
    service: &InvitationService,
    invitation_id: i64,
    request: &HttpRequest,
) -> Reply {
    let user = current_user(request)?;
    let storage = service.get_storage(request);

    let invitation = storage
        .get_invitation_by_id(invitation_id)
        .await
        .map_err(internal("Failed to load invitation"))?
        .filter(|inv| user.is_admin() || inv.invited_by == user.id)
        .ok_or_else(|| {
            reject(
                StatusCode::NOT_FOUND,
                ErrorCode::NotFound,
                "Invitation not found",
            )
        })?;

    storage
        .delete_invitation(invitation.id)
        .await
        .map_err(internal("Failed to delete invitation"))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Invitation revoked")))
}
