pub mod create;
pub mod manage;
pub mod reply;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{declare_service, finish};
use crate::models::contact::requests::{
    ContactListParams, CreateContactRequest, ReplyContactRequest, UpdateContactStatusRequest,
};

declare_service!(ContactService);

impl ContactService {
    // 公开接口，无需登录
    pub async fn create_contact(
        &self,
        request: &HttpRequest,
        contact: CreateContactRequest,
    ) -> ActixResult<HttpResponse> {
        finish(create::create_contact(self, request, contact).await)
    }

    pub async fn list_contacts(
        &self,
        request: &HttpRequest,
        query: ContactListParams,
    ) -> ActixResult<HttpResponse> {
        finish(manage::list_contacts(self, request, query).await)
    }

    pub async fn get_contact(&self, request: &HttpRequest, id: i64) -> ActixResult<HttpResponse> {
        finish(manage::get_contact(self, request, id).await)
    }

    pub async fn update_status(
        &self,
        request: &HttpRequest,
        id: i64,
        update: UpdateContactStatusRequest,
    ) -> ActixResult<HttpResponse> {
        finish(manage::update_status(self, request, id, update).await)
    }

    pub async fn delete_contact(&self, request: &HttpRequest, id: i64) -> ActixResult<HttpResponse> {
        finish(manage::delete_contact(self, request, id).await)
    }

    pub async fn reply_contact(
        &self,
        request: &HttpRequest,
        id: i64,
        reply: ReplyContactRequest,
    ) -> ActixResult<HttpResponse> {
        finish(reply::reply_contact(self, request, id, reply).await)
    }
}
