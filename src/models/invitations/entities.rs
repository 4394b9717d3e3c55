use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::users::entities::UserRole;

crate::define_string_enum! {
    #[ts(export, export_to = "../frontend/src/types/generated/invitation.ts")]
    pub enum InvitationStatus ("邀请状态") {
        Pending = "pending",
        Accepted = "accepted",
        Expired = "expired",
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/invitation.ts")]
pub struct Invitation {
    pub id: i64,
    pub email: String,
    pub role: UserRole,
    pub class_id: Option<i64>,
    #[serde(skip_serializing, default)]
    #[ts(skip)]
    pub token: String,
    pub invited_by: i64,
    pub expires_at: chrono::DateTime<chrono::Utc>,
    pub accepted_at: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Invitation {
    pub fn status_at(&self, now: chrono::DateTime<chrono::Utc>) -> InvitationStatus {
        if self.accepted_at.is_some() {
            InvitationStatus::Accepted
        } else if now > self.expires_at {
            InvitationStatus::Expired
        } else {
            InvitationStatus::Pending
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn invitation(expires_in: Duration, accepted: bool) -> Invitation {
        let now = Utc::now();
        Invitation {
            id: 1,
            email: "a@b.c".into(),
            role: UserRole::Student,
            class_id: None,
            token: "t".into(),
            invited_by: 1,
            expires_at: now + expires_in,
            accepted_at: accepted.then_some(now),
            created_at: now,
        }
    }

    #[test]
    fn test_status() {
        let now = Utc::now();
        assert_eq!(
            invitation(Duration::days(1), false).status_at(now),
            InvitationStatus::Pending
        );
        assert_eq!(
            invitation(Duration::days(-1), false).status_at(now),
            InvitationStatus::Expired
        );
        assert_eq!(
            invitation(Duration::days(-1), true).status_at(now),
            InvitationStatus::Accepted
        );
    }
}
