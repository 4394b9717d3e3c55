use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{self, RateLimit};
use crate::models::class_members::requests::{ClassMemberListParams, UpdateClassMemberRequest};
use crate::models::classes::requests::{
    ClassQueryParams, CreateClassRequest, JoinClassRequest, UpdateClassRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::{ClassMemberService, ClassService};
use crate::utils::{SafeClassIdI64, SafeInviteCode, SafeUserIdI64};

// 懒加载的全局 CLASS_SERVICE 实例
static CLASS_SERVICE: Lazy<ClassService> = Lazy::new(ClassService::new_lazy);
static CLASS_MEMBER_SERVICE: Lazy<ClassMemberService> = Lazy::new(ClassMemberService::new_lazy);

// HTTP处理程序
pub async fn list_classes(
    req: HttpRequest,
    query: web::Query<ClassQueryParams>,
) -> ActixResult<HttpResponse> {
    CLASS_SERVICE.list_classes(&req, query.into_inner()).await
}

pub async fn create_class(
    req: HttpRequest,
    class_data: web::Json<CreateClassRequest>,
) -> ActixResult<HttpResponse> {
    CLASS_SERVICE
        .create_class(&req, class_data.into_inner())
        .await
}

pub async fn join_class(
    req: HttpRequest,
    join_data: web::Json<JoinClassRequest>,
) -> ActixResult<HttpResponse> {
    CLASS_SERVICE.join_class(&req, join_data.into_inner()).await
}

pub async fn get_class_by_code(req: HttpRequest, code: SafeInviteCode) -> ActixResult<HttpResponse> {
    CLASS_SERVICE.get_class_by_code(&req, code.0).await
}

pub async fn get_class(req: HttpRequest, class_id: SafeClassIdI64) -> ActixResult<HttpResponse> {
    CLASS_SERVICE.get_class(&req, class_id.0).await
}

pub async fn update_class(
    req: HttpRequest,
    class_id: SafeClassIdI64,
    update_data: web::Json<UpdateClassRequest>,
) -> ActixResult<HttpResponse> {
    CLASS_SERVICE
        .update_class(&req, class_id.0, update_data.into_inner())
        .await
}

pub async fn delete_class(req: HttpRequest, class_id: SafeClassIdI64) -> ActixResult<HttpResponse> {
    CLASS_SERVICE.delete_class(&req, class_id.0).await
}

pub async fn regenerate_invite_code(
    req: HttpRequest,
    class_id: SafeClassIdI64,
) -> ActixResult<HttpResponse> {
    CLASS_SERVICE.regenerate_invite_code(&req, class_id.0).await
}

pub async fn list_members(
    req: HttpRequest,
    class_id: SafeClassIdI64,
    query: web::Query<ClassMemberListParams>,
) -> ActixResult<HttpResponse> {
    CLASS_MEMBER_SERVICE
        .list_members(&req, class_id.0, query.into_inner())
        .await
}

pub async fn update_member(
    req: HttpRequest,
    path: web::Path<(SafeClassIdI64, SafeUserIdI64)>,
    update_data: web::Json<UpdateClassMemberRequest>,
) -> ActixResult<HttpResponse> {
    let (class_id, user_id) = path.into_inner();
    CLASS_MEMBER_SERVICE
        .update_member(&req, class_id.0, user_id.0, update_data.into_inner())
        .await
}

pub async fn remove_member(
    req: HttpRequest,
    path: web::Path<(SafeClassIdI64, SafeUserIdI64)>,
) -> ActixResult<HttpResponse> {
    let (class_id, user_id) = path.into_inner();
    CLASS_MEMBER_SERVICE
        .remove_member(&req, class_id.0, user_id.0)
        .await
}

// 配置路由
pub fn configure_classes_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/classes")
            .wrap(middlewares::RequireJWT)
            .service(
                // 用户查询自己的班级列表，管理员可以查询所有班级
                web::resource("").route(web::get().to(list_classes)).route(
                    web::post()
                        .to(create_class)
                        // 教师创建自己的班级，管理员可以创建指定教师的班级
                        .wrap(middlewares::RequireRole::new_any(UserRole::staff_roles())),
                ),
            )
            .service(
                web::resource("/join")
                    .route(web::post().to(join_class).wrap(RateLimit::invite_code())),
            )
            .service(
                web::resource("/code/{code}")
                    .route(web::get().to(get_class_by_code).wrap(RateLimit::invite_code())),
            )
            // 班级级权限在服务层按成员身份判断
            .service(
                web::resource("/{class_id}")
                    .route(web::get().to(get_class))
                    .route(web::put().to(update_class))
                    .route(web::delete().to(delete_class)),
            )
            .route("/{class_id}/invite-code", web::post().to(regenerate_invite_code))
            .route("/{class_id}/members", web::get().to(list_members))
            .service(
                web::resource("/{class_id}/members/{user_id}")
                    .route(web::put().to(update_member))
                    .route(web::delete().to(remove_member)),
            )
            .configure(super::notes::configure_class_scoped)
            .configure(super::assignments::configure_class_scoped)
            .configure(super::quizzes::configure_class_scoped)
            .configure(super::attendance::configure_class_scoped),
    );
}
