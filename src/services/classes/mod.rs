pub mod create;
pub mod delete;
pub mod get;
pub mod invite_code;
pub mod join;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{declare_service, finish};
use crate::models::classes::requests::{
    ClassQueryParams, CreateClassRequest, JoinClassRequest, UpdateClassRequest,
};

declare_service!(ClassService);

impl ClassService {
    // 获取班级列表
    pub async fn list_classes(
        &self,
        request: &HttpRequest,
        query: ClassQueryParams,
    ) -> ActixResult<HttpResponse> {
        finish(list::list_classes(self, request, query).await)
    }

    pub async fn create_class(
        &self,
        req: &HttpRequest,
        class_data: CreateClassRequest,
    ) -> ActixResult<HttpResponse> {
        finish(create::create_class(self, req, class_data).await)
    }

    // 根据班级 ID 获取班级详情
    pub async fn get_class(&self, req: &HttpRequest, class_id: i64) -> ActixResult<HttpResponse> {
        finish(get::get_class(self, req, class_id).await)
    }

    // 根据班级邀请码预览班级
    pub async fn get_class_by_code(
        &self,
        req: &HttpRequest,
        code: String,
    ) -> ActixResult<HttpResponse> {
        finish(get::get_class_by_code(self, req, code).await)
    }

    pub async fn update_class(
        &self,
        req: &HttpRequest,
        class_id: i64,
        update_data: UpdateClassRequest,
    ) -> ActixResult<HttpResponse> {
        finish(update::update_class(self, req, class_id, update_data).await)
    }

    pub async fn delete_class(
        &self,
        req: &HttpRequest,
        class_id: i64,
    ) -> ActixResult<HttpResponse> {
        finish(delete::delete_class(self, req, class_id).await)
    }

    // 重新生成邀请码
    pub async fn regenerate_invite_code(
        &self,
        req: &HttpRequest,
        class_id: i64,
    ) -> ActixResult<HttpResponse> {
        finish(invite_code::regenerate_invite_code(self, req, class_id).await)
    }

    // 学生通过邀请码加入班级
    pub async fn join_class(
        &self,
        req: &HttpRequest,
        join_data: JoinClassRequest,
    ) -> ActixResult<HttpResponse> {
        finish(join::join_class(self, req, join_data).await)
    }
}
