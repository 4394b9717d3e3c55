pub mod create;
pub mod delete;
pub mod list;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{declare_service, finish};
use crate::models::invitations::requests::{CreateInvitationRequest, InvitationListParams};

declare_service!(InvitationService);

impl InvitationService {
    pub async fn create_invitation(
        &self,
        invitation: CreateInvitationRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        finish(create::create_invitation(self, invitation, request).await)
    }

    pub async fn list_invitations(
        &self,
        query: InvitationListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        finish(list::list_invitations(self, query, request).await)
    }

    pub async fn delete_invitation(
        &self,
        invitation_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        finish(delete::delete_invitation(self, invitation_id, request).await)
    }
}
