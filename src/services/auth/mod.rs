pub mod invitation;
pub mod login;
pub mod password_reset;
pub mod profile;
pub mod register;
pub mod token;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{declare_service, finish};
use crate::models::auth::requests::{
    AcceptInvitationRequest, ChangePasswordRequest, ForgotPasswordRequest, LoginRequest,
    RegisterRequest, ResetPasswordRequest, UpdateProfileRequest,
};

declare_service!(AuthService);

impl AuthService {
    // 登录验证
    pub async fn login(
        &self,
        login_request: LoginRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        finish(login::handle_login(self, login_request, request).await)
    }

    // 公开注册
    pub async fn register(
        &self,
        register_request: RegisterRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        finish(register::handle_register(self, register_request, request).await)
    }

    // 刷新令牌
    pub async fn refresh_token(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        finish(token::handle_refresh_token(self, request).await)
    }

    pub async fn logout(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        finish(token::handle_logout(request).await)
    }

    // 验证令牌
    pub async fn verify_token(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        finish(token::handle_verify_token(request).await)
    }

    // 获取当前用户
    pub async fn get_user(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        finish(token::handle_get_user(request).await)
    }

    // 更新用户资料
    pub async fn update_profile(
        &self,
        update_request: UpdateProfileRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        finish(profile::handle_update_profile(self, update_request, request).await)
    }

    pub async fn change_password(
        &self,
        change_request: ChangePasswordRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        finish(profile::handle_change_password(self, change_request, request).await)
    }

    pub async fn forgot_password(
        &self,
        forgot_request: ForgotPasswordRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        finish(password_reset::handle_forgot_password(self, forgot_request, request).await)
    }

    pub async fn reset_password(
        &self,
        reset_request: ResetPasswordRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        finish(password_reset::handle_reset_password(self, reset_request, request).await)
    }

    pub async fn preview_invitation(
        &self,
        token: String,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        finish(invitation::handle_preview_invitation(self, token, request).await)
    }

    pub async fn accept_invitation(
        &self,
        accept_request: AcceptInvitationRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        finish(invitation::handle_accept_invitation(self, accept_request, request).await)
    }
}
