use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse};

use crate::models::{
    ApiResponse, ErrorCode,
    auth::requests::RegisterRequest,
    users::{entities::UserRole, requests::CreateUserRequest},
};
use crate::services::system::DynamicConfig;
use crate::services::users::account::{ensure_available, hash_or_reject, validate_new_account};
use crate::services::{Reply, internal, reject};

use super::AuthService;

pub async fn handle_register(
    service: &AuthService,
    register_request: RegisterRequest,
    request: &HttpRequest,
) -> Reply {
    if !DynamicConfig::allow_registration().await {
        return Err(reject(
            StatusCode::FORBIDDEN,
            ErrorCode::RegistrationDisabled,
            "Public registration is disabled",
        ));
    }

    let storage = service.get_storage(request);
    let username = register_request.username.trim().to_string();
    let email = validate_new_account(&username, &register_request.email, &register_request.password)?;
    ensure_available(storage.as_ref(), &username, &email).await?;

    let user = storage
        .create_user(CreateUserRequest {
            username,
            email,
            password: hash_or_reject(&register_request.password)?,
            role: UserRole::Student,
            display_name: register_request
                .display_name
                .map(|n| n.trim().to_string())
                .filter(|n| !n.is_empty()),
            avatar_url: None,
        })
        .await
        .map_err(internal("Registration failed"))?;

    tracing::info!("User {} registered", user.username);
    Ok(HttpResponse::Created().json(ApiResponse::success(user, "Registration successful")))
}
