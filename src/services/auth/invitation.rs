use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse};
use chrono::Utc;

use crate::errors::Result;
use crate::models::{
    ApiResponse, ErrorCode,
    auth::requests::AcceptInvitationRequest,
    class_members::entities::ClassMemberRole,
    invitations::{
        entities::{Invitation, InvitationStatus},
        responses::InvitationPreviewResponse,
    },
    users::requests::CreateUserRequest,
};
use crate::services::users::account::{ensure_available, hash_or_reject, validate_new_account};
use crate::services::{Reply, internal, reject};
use crate::storage::Storage;

use super::AuthService;

fn invalid_invitation() -> HttpResponse {
    reject(
        StatusCode::BAD_REQUEST,
        ErrorCode::InvitationInvalid,
        "Invitation is invalid, expired or already used",
    )
}

/// 仅返回仍处于待接受状态的邀请
async fn load_pending(
    storage: &dyn Storage,
    token: &str,
) -> std::result::Result<Invitation, HttpResponse> {
    storage
        .get_invitation_by_token(token.trim())
        .await
        .map_err(internal("Failed to load invitation"))?
        .filter(|inv| inv.status_at(Utc::now()) == InvitationStatus::Pending)
        .ok_or_else(invalid_invitation)
}

/// 先占用邀请再执行 `create`，避免同一邀请被并发接受两次；`create` 失败时撤销占用
async fn create_claimed<T>(
    storage: &dyn Storage,
    invitation_id: i64,
    create: impl Future<Output = Result<T>>,
) -> std::result::Result<T, HttpResponse> {
    let claimed = storage
        .mark_invitation_accepted(invitation_id)
        .await
        .map_err(internal("Failed to accept invitation"))?;
    if !claimed {
        return Err(invalid_invitation());
    }

    match create.await {
        Ok(created) => Ok(created),
        Err(e) => {
            if let Err(release) = storage.release_invitation(invitation_id).await {
                tracing::error!("Failed to release invitation {invitation_id}: {release}");
            }
            Err(internal("Failed to create invited user")(e))
        }
    }
}

pub async fn handle_preview_invitation(
    service: &AuthService,
    token: String,
    request: &HttpRequest,
) -> Reply {
    let storage = service.get_storage(request);
    let invitation = load_pending(storage.as_ref(), &token).await?;

    let class_name = match invitation.class_id {
        Some(class_id) => storage
            .get_class_by_id(class_id)
            .await
            .map_err(internal("Failed to load class"))?
            .map(|c| c.name),
        None => None,
    };

    let preview = InvitationPreviewResponse {
        email: invitation.email,
        role: invitation.role,
        class_name,
        expires_at: invitation.expires_at,
    };
    Ok(HttpResponse::Ok().json(ApiResponse::success(preview, "Invitation is valid")))
}

pub async fn handle_accept_invitation(
    service: &AuthService,
    accept_request: AcceptInvitationRequest,
    request: &HttpRequest,
) -> Reply {
    let storage = service.get_storage(request);
    let invitation = load_pending(storage.as_ref(), &accept_request.token).await?;

    let username = accept_request.username.trim().to_string();
    let email = validate_new_account(&username, &invitation.email, &accept_request.password)?;
    ensure_available(storage.as_ref(), &username, &email).await?;

    let password = hash_or_reject(&accept_request.password)?;

    let user = create_claimed(
        storage.as_ref(),
        invitation.id,
        storage.create_user(CreateUserRequest {
            username,
            email,
            password,
            role: invitation.role,
            display_name: accept_request
                .display_name
                .map(|n| n.trim().to_string())
                .filter(|n| !n.is_empty()),
            avatar_url: None,
        }),
    )
    .await?;

    if let Some(class_id) = invitation.class_id {
        let class_exists = storage
            .get_class_by_id(class_id)
            .await
            .map_err(internal("Failed to load class"))?
            .is_some();
        if class_exists {
            storage
                .add_class_member(class_id, user.id, ClassMemberRole::Student)
                .await
                .map_err(internal("Failed to join invited class"))?;
        } else {
            tracing::warn!(
                "Invitation {} references missing class {}",
                invitation.id,
                class_id
            );
        }
    }

    tracing::info!(
        "Invitation {} accepted by user {} ({})",
        invitation.id,
        user.id,
        user.role
    );
    Ok(HttpResponse::Created().json(ApiResponse::success(user, "Invitation accepted")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ClassHubError;
    use crate::models::invitations::requests::NewInvitation;
    use crate::models::users::entities::UserRole;
    use crate::storage::sea_orm_storage::SeaOrmStorage;
    use sea_orm::{ConnectOptions, Database};

    async fn storage_with_invitation() -> (SeaOrmStorage, Invitation) {
        let mut opt = ConnectOptions::new("sqlite::memory:");
        opt.max_connections(1).min_connections(1).sqlx_logging(false);
        let s = SeaOrmStorage::from_connection(Database::connect(opt).await.unwrap())
            .await
            .unwrap();
        let admin = s
            .create_user(CreateUserRequest {
                username: "root".to_string(),
                email: "root@example.com".to_string(),
                password: "hashed".to_string(),
                role: UserRole::Admin,
                display_name: None,
                avatar_url: None,
            })
            .await
            .unwrap();
        let invitation = s
            .create_invitation(NewInvitation {
                email: "new@example.com".to_string(),
                role: UserRole::Student,
                class_id: None,
                token: "invite-token".to_string(),
                invited_by: admin.id,
                expires_at: Utc::now() + chrono::Duration::days(1),
            })
            .await
            .unwrap();
        (s, invitation)
    }

    #[tokio::test]
    async fn test_failed_creation_releases_invitation() {
        let (s, invitation) = storage_with_invitation().await;

        let err = create_claimed(&s, invitation.id, async {
            Err::<(), _>(ClassHubError::database_operation("UNIQUE constraint failed: users.username"))
        })
        .await
        .unwrap_err();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let stored = s.get_invitation_by_id(invitation.id).await.unwrap().unwrap();
        assert_eq!(stored.status_at(Utc::now()), InvitationStatus::Pending);
        assert!(load_pending(&s, "invite-token").await.is_ok());
    }

    #[tokio::test]
    async fn test_invitation_claimed_once() {
        let (s, invitation) = storage_with_invitation().await;

        let created = create_claimed(&s, invitation.id, async { Ok::<_, ClassHubError>(7) })
            .await
            .unwrap();
        assert_eq!(created, 7);

        let again = create_claimed(&s, invitation.id, async { Ok::<_, ClassHubError>(8) })
            .await
            .unwrap_err();
        assert_eq!(again.status(), StatusCode::BAD_REQUEST);
        assert!(load_pending(&s, "invite-token").await.is_err());
    }
}
