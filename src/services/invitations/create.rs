use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse};
use chrono::{Duration, Utc};

use super::InvitationService;
use crate::config::AppConfig;
use crate::mail::{self, EmailTemplate};
use crate::models::{
    ApiResponse, ErrorCode,
    class_members::entities::ClassMemberRole,
    invitations::{
        requests::{CreateInvitationRequest, NewInvitation},
        responses::InvitationResponse,
    },
    users::entities::{User, UserRole},
};
use crate::services::access::load_class_access;
use crate::services::{Reply, current_user, get_mailer, internal, reject};
use crate::utils::random_code::generate_secure_token;
use crate::utils::validate::{normalize_email, validate_email};

/// 管理员可邀请任意角色；教授只能邀请学生加入自己负责或任教的班级
fn check_invite_permission(
    inviter: &User,
    role: UserRole,
    class_role: Option<ClassMemberRole>,
) -> Result<(), &'static str> {
    if inviter.is_admin() {
        return Ok(());
    }
    if inviter.role != UserRole::Professor {
        return Err("Only admins and professors can send invitations");
    }
    if role != UserRole::Student {
        return Err("Professors can only invite students");
    }
    match class_role {
        Some(ClassMemberRole::Professor) => Ok(()),
        _ => Err("Professors must invite into a class they teach"),
    }
}

pub async fn create_invitation(
    service: &InvitationService,
    invitation: CreateInvitationRequest,
    request: &HttpRequest,
) -> Reply {
    let inviter = current_user(request)?;
    let storage = service.get_storage(request);
    let config = AppConfig::get();

    let email = normalize_email(&invitation.email);
    validate_email(&email)
        .map_err(|msg| reject(StatusCode::BAD_REQUEST, ErrorCode::UserEmailInvalid, msg))?;

    let class = match invitation.class_id {
        Some(class_id) => Some(load_class_access(storage.as_ref(), &inviter, class_id).await?),
        None => None,
    };
    let class_role = class.as_ref().and_then(|(_, access)| access.member_role());
    check_invite_permission(&inviter, invitation.role, class_role)
        .map_err(|msg| reject(StatusCode::FORBIDDEN, ErrorCode::Forbidden, msg))?;

    if storage
        .get_user_by_email(&email)
        .await
        .map_err(internal("Failed to check email"))?
        .is_some()
    {
        return Err(reject(
            StatusCode::CONFLICT,
            ErrorCode::UserAlreadyExists,
            "A user with this email already exists",
        ));
    }

    let token = generate_secure_token();
    let expires_at = Utc::now() + Duration::days(config.auth.invitation_ttl_days.max(1));
    let created = storage
        .create_invitation(NewInvitation {
            email: email.clone(),
            role: invitation.role,
            class_id: invitation.class_id,
            token: token.clone(),
            invited_by: inviter.id,
            expires_at,
        })
        .await
        .map_err(|e| {
            tracing::error!("Failed to create invitation: {e}");
            reject(
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorCode::InvitationCreationFailed,
                "Failed to create invitation",
            )
        })?;

    let template = EmailTemplate::Invitation {
        role: created.role.to_string(),
        class_name: class.map(|(c, _)| c.name),
        inviter: inviter.display_name().to_string(),
        link: config.public_link(&format!("accept-invitation?token={token}")),
        expires_at: expires_at.format("%Y-%m-%d %H:%M UTC").to_string(),
    };
    mail::dispatch_template(get_mailer(request), template, vec![email]).await;

    tracing::info!(
        "User {} invited {} as {}",
        inviter.id,
        created.email,
        created.role
    );
    let status = created.status_at(Utc::now());
    Ok(HttpResponse::Created().json(ApiResponse::success(
        InvitationResponse {
            invitation: created,
            status,
        },
        "Invitation sent",
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::entities::{UserProfile, UserStatus};

    fn user(role: UserRole) -> User {
        User {
            id: 1,
            username: "inviter".into(),
            email: "inviter@example.com".into(),
            password_hash: String::new(),
            role,
            status: UserStatus::Active,
            profile: UserProfile::default(),
            last_login: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_admin_can_invite_any_role() {
        let admin = user(UserRole::Admin);
        assert!(check_invite_permission(&admin, UserRole::Professor, None).is_ok());
        assert!(check_invite_permission(&admin, UserRole::Admin, None).is_ok());
    }

    #[test]
    fn test_professor_invites_students_into_taught_class() {
        let professor = user(UserRole::Professor);
        assert!(
            check_invite_permission(&professor, UserRole::Student, Some(ClassMemberRole::Professor))
                .is_ok()
        );
        assert!(check_invite_permission(&professor, UserRole::Student, None).is_err());
        assert!(
            check_invite_permission(&professor, UserRole::Student, Some(ClassMemberRole::Assistant))
                .is_err()
        );
        assert!(
            check_invite_permission(&professor, UserRole::Professor, Some(ClassMemberRole::Professor))
                .is_err()
        );
    }

    #[test]
    fn test_student_cannot_invite() {
        let student = user(UserRole::Student);
        assert!(
            check_invite_permission(&student, UserRole::Student, Some(ClassMemberRole::Professor))
                .is_err()
        );
    }
}
