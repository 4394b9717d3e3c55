use actix_web::{HttpRequest, HttpResponse};
use tracing::info;

use super::UserService;
use super::account::{ensure_available, hash_or_reject, validate_new_account};
use crate::models::{ApiResponse, users::requests::CreateUserRequest};
use crate::services::{Reply, current_user, internal};

pub async fn create_user(
    service: &UserService,
    request: &HttpRequest,
    mut user_data: CreateUserRequest,
) -> Reply {
    let admin = current_user(request)?;
    let storage = service.get_storage(request);

    user_data.username = user_data.username.trim().to_string();
    user_data.email =
        validate_new_account(&user_data.username, &user_data.email, &user_data.password)?;
    ensure_available(storage.as_ref(), &user_data.username, &user_data.email).await?;
    user_data.password = hash_or_reject(&user_data.password)?;

    let user = storage
        .create_user(user_data)
        .await
        .map_err(internal("Failed to create user"))?;

    info!(
        "Admin {} created user {} ({})",
        admin.id, user.username, user.role
    );
    Ok(HttpResponse::Created().json(ApiResponse::success(user, "User created successfully")))
}
