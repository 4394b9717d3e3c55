use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{self, RateLimit};
use crate::models::auth::requests::{
    AcceptInvitationRequest, ChangePasswordRequest, ForgotPasswordRequest, LoginRequest,
    RegisterRequest, ResetPasswordRequest, UpdateProfileRequest,
};
use crate::services::AuthService;
use crate::utils::SafeToken;

// 懒加载的全局 AuthService 实例
static AUTH_SERVICE: Lazy<AuthService> = Lazy::new(AuthService::new_lazy);

pub async fn login(
    req: HttpRequest,
    user_data: web::Json<LoginRequest>,
) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.login(user_data.into_inner(), &req).await
}

pub async fn refresh_token(request: HttpRequest) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.refresh_token(&request).await
}

pub async fn logout(request: HttpRequest) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.logout(&request).await
}

pub async fn register(
    req: HttpRequest,
    user_data: web::Json<RegisterRequest>,
) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.register(user_data.into_inner(), &req).await
}

pub async fn forgot_password(
    req: HttpRequest,
    body: web::Json<ForgotPasswordRequest>,
) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.forgot_password(body.into_inner(), &req).await
}

pub async fn reset_password(
    req: HttpRequest,
    body: web::Json<ResetPasswordRequest>,
) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.reset_password(body.into_inner(), &req).await
}

pub async fn preview_invitation(req: HttpRequest, token: SafeToken) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.preview_invitation(token.0, &req).await
}

pub async fn accept_invitation(
    req: HttpRequest,
    body: web::Json<AcceptInvitationRequest>,
) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.accept_invitation(body.into_inner(), &req).await
}

pub async fn verify_token(request: HttpRequest) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.verify_token(&request).await
}

pub async fn get_user(request: HttpRequest) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.get_user(&request).await
}

pub async fn update_profile(
    req: HttpRequest,
    body: web::Json<UpdateProfileRequest>,
) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.update_profile(body.into_inner(), &req).await
}

pub async fn change_password(
    req: HttpRequest,
    body: web::Json<ChangePasswordRequest>,
) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.change_password(body.into_inner(), &req).await
}

// 配置路由
pub fn configure_auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/auth")
            .route("/login", web::post().to(login).wrap(RateLimit::login()))
            .route("/register", web::post().to(register).wrap(RateLimit::register()))
            .route("/refresh", web::post().to(refresh_token).wrap(RateLimit::refresh_token()))
            .route("/logout", web::post().to(logout))
            .route(
                "/forgot-password",
                web::post().to(forgot_password).wrap(RateLimit::forgot_password()),
            )
            .route(
                "/reset-password",
                web::post().to(reset_password).wrap(RateLimit::forgot_password()),
            )
            .route(
                "/accept-invitation",
                web::post().to(accept_invitation).wrap(RateLimit::invite_code()),
            )
            .route(
                "/invitations/{token}",
                web::get().to(preview_invitation).wrap(RateLimit::invite_code()),
            )
            .service(
                web::scope("")
                    .wrap(middlewares::RequireJWT)
                    .route("/verify-token", web::get().to(verify_token))
                    .service(
                        web::resource("/me")
                            .route(web::get().to(get_user))
                            .route(web::put().to(update_profile)),
                    )
                    .route("/password", web::put().to(change_password)),
            ),
    );
}
