use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse};
use tracing::info;

use super::ClassService;
use super::invite_code::fresh_invite_code;
use crate::models::classes::requests::CreateClassRequest;
use crate::models::users::entities::{User, UserRole};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{Reply, current_user, internal, reject};
use crate::storage::Storage;
use crate::utils::validate::validate_required_text;

const CLASS_NAME_MAX: usize = 100;

pub async fn create_class(
    service: &ClassService,
    request: &HttpRequest,
    class_data: CreateClassRequest,
) -> Reply {
    let user = current_user(request)?;
    let storage = service.get_storage(request);

    validate_required_text("Class name", &class_data.name, CLASS_NAME_MAX)
        .map_err(|msg| reject(StatusCode::BAD_REQUEST, ErrorCode::BadRequest, msg))?;

    let professor_id = resolve_professor(&user, class_data.professor_id, storage.as_ref()).await?;
    let invite_code = fresh_invite_code(storage.as_ref()).await?;

    let description = class_data
        .description
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty());
    let class = storage
        .create_class(professor_id, class_data.name.trim(), description, &invite_code)
        .await
        .map_err(|e| {
            tracing::error!("Class creation failed: {e}");
            reject(
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorCode::ClassCreationFailed,
                "Class creation failed",
            )
        })?;

    info!("Class {} created by {} for professor {}", class.name, user.id, professor_id);
    Ok(HttpResponse::Created().json(ApiResponse::success(class, "Class created successfully")))
}

/// 教授为自己创建，管理员为指定教授创建
async fn resolve_professor(
    user: &User,
    requested: Option<i64>,
    storage: &dyn Storage,
) -> Result<i64, HttpResponse> {
    match user.role {
        UserRole::Admin => {
            let professor_id = requested.ok_or_else(|| {
                reject(
                    StatusCode::BAD_REQUEST,
                    ErrorCode::BadRequest,
                    "professor_id is required when an admin creates a class",
                )
            })?;
            let professor = storage
                .get_user_by_id(professor_id)
                .await
                .map_err(internal("Failed to get professor"))?
                .ok_or_else(|| {
                    reject(StatusCode::NOT_FOUND, ErrorCode::UserNotFound, "User not found")
                })?;
            if professor.role != UserRole::Professor {
                return Err(reject(
                    StatusCode::BAD_REQUEST,
                    ErrorCode::ClassPermissionDenied,
                    "Admin can only create classes for professors",
                ));
            }
            Ok(professor_id)
        }
        UserRole::Professor => match requested {
            Some(id) if id != user.id => Err(reject(
                StatusCode::FORBIDDEN,
                ErrorCode::ClassPermissionDenied,
                "You do not have permission to create a class for another professor",
            )),
            _ => Ok(user.id),
        },
        UserRole::Student => Err(reject(
            StatusCode::FORBIDDEN,
            ErrorCode::ClassPermissionDenied,
            "You do not have permission to create a class",
        )),
    }
}
