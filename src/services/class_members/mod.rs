pub mod list;
pub mod remove;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{declare_service, finish};
use crate::models::class_members::requests::{ClassMemberListParams, UpdateClassMemberRequest};

declare_service!(ClassMemberService);

impl ClassMemberService {
    pub async fn list_members(
        &self,
        request: &HttpRequest,
        class_id: i64,
        query: ClassMemberListParams,
    ) -> ActixResult<HttpResponse> {
        finish(list::list_members(self, request, class_id, query).await)
    }

    pub async fn update_member(
        &self,
        request: &HttpRequest,
        class_id: i64,
        user_id: i64,
        update_data: UpdateClassMemberRequest,
    ) -> ActixResult<HttpResponse> {
        finish(update::update_member(self, request, class_id, user_id, update_data).await)
    }

    // 移除成员或自行退出
    pub async fn remove_member(
        &self,
        request: &HttpRequest,
        class_id: i64,
        user_id: i64,
    ) -> ActixResult<HttpResponse> {
        finish(remove::remove_member(self, request, class_id, user_id).await)
    }
}
