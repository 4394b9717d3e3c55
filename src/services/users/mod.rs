//! 管理员用户管理

pub(crate) mod account;
pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{declare_service, finish};
use crate::models::users::requests::{CreateUserRequest, UpdateUserRequest, UserListParams};

declare_service!(UserService);

impl UserService {
    pub async fn list_users(
        &self,
        request: &HttpRequest,
        query: UserListParams,
    ) -> ActixResult<HttpResponse> {
        finish(list::list_users(self, request, query).await)
    }

    pub async fn create_user(
        &self,
        request: &HttpRequest,
        user: CreateUserRequest,
    ) -> ActixResult<HttpResponse> {
        finish(create::create_user(self, request, user).await)
    }

    pub async fn get_user(&self, request: &HttpRequest, user_id: i64) -> ActixResult<HttpResponse> {
        finish(get::get_user(self, request, user_id).await)
    }

    pub async fn update_user(
        &self,
        request: &HttpRequest,
        user_id: i64,
        update: UpdateUserRequest,
    ) -> ActixResult<HttpResponse> {
        finish(update::update_user(self, request, user_id, update).await)
    }

    pub async fn delete_user(
        &self,
        request: &HttpRequest,
        user_id: i64,
    ) -> ActixResult<HttpResponse> {
        finish(delete::delete_user(self, request, user_id).await)
    }
}
