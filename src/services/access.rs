//! 班级级别的访问判定
//!
//! 管理员通过所有检查；班级负责人（`classes.professor_id`）视为 owner；
//! 其他用户按 `class_members` 中的角色判定。

use actix_web::HttpResponse;
use actix_web::http::StatusCode;

use super::{internal, reject};
use crate::models::ErrorCode;
use crate::models::class_members::entities::ClassMemberRole;
use crate::models::classes::entities::Class;
use crate::models::users::entities::User;
use crate::storage::Storage;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassAccess {
    Admin,
    Owner,
    Member(ClassMemberRole),
}

impl ClassAccess {
    pub fn resolve(user: &User, class: &Class, membership: Option<ClassMemberRole>) -> Option<Self> {
        if user.is_admin() {
            Some(ClassAccess::Admin)
        } else if class.professor_id == user.id {
            Some(ClassAccess::Owner)
        } else {
            membership.map(ClassAccess::Member)
        }
    }

    /// 管理班级本身：修改、删除、邀请码、成员角色
    pub fn can_manage_class(&self) -> bool {
        matches!(self, ClassAccess::Admin | ClassAccess::Owner)
    }

    /// 管理课程内容：笔记、作业、测验、考勤
    pub fn can_manage_content(&self) -> bool {
        match self {
            ClassAccess::Admin | ClassAccess::Owner => true,
            ClassAccess::Member(role) => role.can_manage_content(),
        }
    }

    pub fn is_student(&self) -> bool {
        matches!(self, ClassAccess::Member(ClassMemberRole::Student))
    }

    /// 在班级中的角色，管理员为空
    pub fn member_role(&self) -> Option<ClassMemberRole> {
        match self {
            ClassAccess::Admin => None,
            ClassAccess::Owner => Some(ClassMemberRole::Professor),
            ClassAccess::Member(role) => Some(*role),
        }
    }
}

/// 加载班级并判定访问级别，非成员返回 403
pub async fn load_class_access(
    storage: &dyn Storage,
    user: &User,
    class_id: i64,
) -> Result<(Class, ClassAccess), HttpResponse> {
    let class = storage
        .get_class_by_id(class_id)
        .await
        .map_err(internal("Failed to get class"))?
        .ok_or_else(|| reject(StatusCode::NOT_FOUND, ErrorCode::ClassNotFound, "Class not found"))?;

    let membership = if user.is_admin() || class.professor_id == user.id {
        None
    } else {
        storage
            .get_class_member(class_id, user.id)
            .await
            .map_err(internal("Failed to get class membership"))?
            .map(|m| m.role)
    };

    match ClassAccess::resolve(user, &class, membership) {
        Some(access) => Ok((class, access)),
        None => Err(reject(
            StatusCode::FORBIDDEN,
            ErrorCode::ClassPermissionDenied,
            "You are not a member of this class",
        )),
    }
}

/// 要求可以管理课程内容
pub async fn require_content_manager(
    storage: &dyn Storage,
    user: &User,
    class_id: i64,
) -> Result<(Class, ClassAccess), HttpResponse> {
    let (class, access) = load_class_access(storage, user, class_id).await?;
    if !access.can_manage_content() {
        return Err(reject(
            StatusCode::FORBIDDEN,
            ErrorCode::ClassPermissionDenied,
            "Only professors and assistants of this class can do this",
        ));
    }
    Ok((class, access))
}

/// 已归档班级拒绝新增内容
pub fn ensure_not_archived(class: &Class) -> Result<(), HttpResponse> {
    if class.archived {
        return Err(reject(
            StatusCode::CONFLICT,
            ErrorCode::ClassArchived,
            "Class is archived",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::entities::{UserProfile, UserRole, UserStatus};
    use chrono::Utc;

    fn user(id: i64, role: UserRole) -> User {
        User {
            id,
            username: format!("u{id}"),
            email: format!("u{id}@example.com"),
            password_hash: String::new(),
            role,
            status: UserStatus::Active,
            profile: UserProfile::default(),
            last_login: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn class(owner: i64) -> Class {
        Class {
            id: 1,
            name: "Algebra".into(),
            description: None,
            professor_id: owner,
            invite_code: "ABCDEFGH".into(),
            archived: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_resolve_access() {
        let class = class(10);
        assert_eq!(
            ClassAccess::resolve(&user(1, UserRole::Admin), &class, None),
            Some(ClassAccess::Admin)
        );
        assert_eq!(
            ClassAccess::resolve(&user(10, UserRole::Professor), &class, None),
            Some(ClassAccess::Owner)
        );
        assert_eq!(
            ClassAccess::resolve(&user(11, UserRole::Professor), &class, None),
            None
        );
        let assistant =
            ClassAccess::resolve(&user(12, UserRole::Student), &class, Some(ClassMemberRole::Assistant))
                .unwrap();
        assert!(assistant.can_manage_content());
        assert!(!assistant.can_manage_class());
    }

    #[test]
    fn test_student_permissions() {
        let student = ClassAccess::Member(ClassMemberRole::Student);
        assert!(student.is_student());
        assert!(!student.can_manage_content());
        assert_eq!(ClassAccess::Owner.member_role(), Some(ClassMemberRole::Professor));
        assert_eq!(ClassAccess::Admin.member_role(), None);
    }
}
