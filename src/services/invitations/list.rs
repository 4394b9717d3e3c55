use actix_web::{HttpRequest, HttpResponse};

use super::InvitationService;
use crate::models::{
    ApiResponse,
    invitations::requests::{InvitationListParams, InvitationListQuery},
};
use crate::services::{Reply, current_user, internal};

pub async fn list_invitations(
    service: &InvitationService,
    query: InvitationListParams,
    request: &HttpRequest,
) -> Reply {
    let user = current_user(request)?;
    let storage = service.get_storage(request);

    // 教授只能看到自己发出的邀请
    let list_query = InvitationListQuery {
        page: Some(query.pagination.page),
        size: Some(query.pagination.size),
        invited_by: (!user.is_admin()).then_some(user.id),
        class_id: query.class_id,
    };

    let response = storage
        .list_invitations_with_pagination(list_query)
        .await
        .map_err(internal("Failed to list invitations"))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        response,
        "Invitations retrieved successfully",
    )))
}
