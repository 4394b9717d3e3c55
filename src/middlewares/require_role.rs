/*!
 * 全局角色校验中间件
 *
 * 依赖 RequireJWT 放入请求扩展的 `User`，因此注册时要让 RequireJWT 位于外层
 * （actix 中后 `wrap` 的先执行）：
 *
 * ```rust,ignore
 * web::scope("/api/v1/backups")
 *     .wrap(RequireRole::new_any(UserRole::admin_roles()))
 *     .wrap(RequireJWT)
 * ```
 *
 * 班级内的角色（助教、任课教授）由各服务自行判断，这里只看全局角色。
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use tracing::info;

use crate::models::{
    ErrorCode,
    users::entities::{User, UserRole},
};

use super::create_error_response;

#[derive(Clone)]
pub struct RequireRole {
    allowed: Rc<[UserRole]>,
}

impl RequireRole {
    /// 允许列表中的任一角色
    pub fn new_any(roles: &[&UserRole]) -> Self {
        Self {
            allowed: roles.iter().map(|r| **r).collect(),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequireRole
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireRoleMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireRoleMiddleware {
            service: Rc::new(service),
            allowed: self.allowed.clone(),
        }))
    }
}

#[derive(Debug, PartialEq, Eq)]
enum RoleCheck {
    Allowed,
    Forbidden,
    Unauthenticated,
}

fn check_role(user: Option<(i64, UserRole)>, allowed: &[UserRole]) -> RoleCheck {
    match user {
        Some((_, role)) if allowed.contains(&role) => RoleCheck::Allowed,
        Some((user_id, role)) => {
            info!(
                "Access denied for user {} (role: {}), allowed roles: {:?}",
                user_id, role, allowed
            );
            RoleCheck::Forbidden
        }
        None => RoleCheck::Unauthenticated,
    }
}

pub struct RequireRoleMiddleware<S> {
    service: Rc<S>,
    allowed: Rc<[UserRole]>,
}

impl<S, B> Service<ServiceRequest> for RequireRoleMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        let allowed = self.allowed.clone();

        Box::pin(async move {
            let user = req.extensions().get::<User>().map(|u| (u.id, u.role));

            let rejection = match check_role(user, &allowed) {
                RoleCheck::Allowed => return Ok(srv.call(req).await?.map_into_left_body()),
                RoleCheck::Forbidden => create_error_response(
                    StatusCode::FORBIDDEN,
                    ErrorCode::Forbidden,
                    "Access denied",
                ),
                RoleCheck::Unauthenticated => create_error_response(
                    StatusCode::UNAUTHORIZED,
                    ErrorCode::Unauthorized,
                    "Authentication required",
                ),
            };
            Ok(req.into_response(rejection.map_into_right_body()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test as atest;
    use actix_web::{App, HttpResponse, web};

    #[test]
    fn test_check_role() {
        let staff = [UserRole::Professor, UserRole::Admin];
        assert_eq!(check_role(Some((1, UserRole::Admin)), &staff), RoleCheck::Allowed);
        assert_eq!(
            check_role(Some((2, UserRole::Student)), &staff),
            RoleCheck::Forbidden
        );
        assert_eq!(check_role(None, &staff), RoleCheck::Unauthenticated);
    }

    #[actix_web::test]
    async fn test_missing_user_is_unauthorized() {
        let app = atest::init_service(
            App::new().service(
                web::scope("/admin")
                    .wrap(RequireRole::new_any(UserRole::admin_roles()))
                    .route("", web::get().to(HttpResponse::Ok)),
            ),
        )
        .await;

        let res = atest::call_service(&app, atest::TestRequest::get().uri("/admin").to_request()).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }
}
