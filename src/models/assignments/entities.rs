use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct Assignment {
    pub id: i64,
    pub class_id: i64,
    pub created_by: i64,
    pub title: String,
    pub description: Option<String>,
    pub max_score: f64,
    pub due_at: Option<DateTime<Utc>>,
    pub allow_late: bool,
    pub attachments: Vec<String>,
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Assignment {
    pub fn is_past_due(&self, now: DateTime<Utc>) -> bool {
        self.due_at.is_some_and(|due| now > due)
    }

    /// 当前时刻是否还能提交；返回是否迟交
    pub fn submission_window(&self, now: DateTime<Utc>) -> Result<bool, &'static str> {
        if !self.published {
            return Err("Assignment is not published");
        }
        match (self.is_past_due(now), self.allow_late) {
            (false, _) => Ok(false),
            (true, true) => Ok(true),
            (true, false) => Err("Assignment is past due"),
        }
    }
}

crate::define_string_enum! {
    /// 学生视角的作业状态
    #[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
    pub enum SubmissionStatus ("提交状态") {
        Pending = "pending",
        Submitted = "submitted",
        Late = "late",
        Graded = "graded",
        Missing = "missing",
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct Submission {
    pub id: i64,
    pub assignment_id: i64,
    pub student_id: i64,
    pub content: String,
    pub attachments: Vec<String>,
    pub is_late: bool,
    pub score: Option<f64>,
    pub feedback: Option<String>,
    pub graded_by: Option<i64>,
    pub graded_at: Option<DateTime<Utc>>,
    pub submitted_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Submission {
    pub fn is_graded(&self) -> bool {
        self.graded_at.is_some()
    }
}

/// 根据作业与提交计算学生视角状态
pub fn submission_status(
    assignment: &Assignment,
    submission: Option<&Submission>,
    now: DateTime<Utc>,
) -> SubmissionStatus {
    match submission {
        Some(s) if s.is_graded() => SubmissionStatus::Graded,
        Some(s) if s.is_late => SubmissionStatus::Late,
        Some(_) => SubmissionStatus::Submitted,
        None if assignment.is_past_due(now) && !assignment.allow_late => SubmissionStatus::Missing,
        None => SubmissionStatus::Pending,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn assignment(due_in: Option<Duration>, allow_late: bool) -> Assignment {
        let now = Utc::now();
        Assignment {
            id: 1,
            class_id: 1,
            created_by: 1,
            title: "Essay".into(),
            description: None,
            max_score: 100.0,
            due_at: due_in.map(|d| now + d),
            allow_late,
            attachments: vec![],
            published: true,
            created_at: now,
            updated_at: now,
        }
    }

    fn submission(is_late: bool, graded: bool) -> Submission {
        let now = Utc::now();
        Submission {
            id: 1,
            assignment_id: 1,
            student_id: 2,
            content: "text".into(),
            attachments: vec![],
            is_late,
            score: graded.then_some(90.0),
            feedback: None,
            graded_by: graded.then_some(1),
            graded_at: graded.then_some(now),
            submitted_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_submission_window() {
        let now = Utc::now();
        assert_eq!(assignment(None, false).submission_window(now), Ok(false));
        assert_eq!(
            assignment(Some(Duration::hours(1)), false).submission_window(now),
            Ok(false)
        );
        assert_eq!(
            assignment(Some(Duration::hours(-1)), true).submission_window(now),
            Ok(true)
        );
        assert!(
            assignment(Some(Duration::hours(-1)), false)
                .submission_window(now)
                .is_err()
        );

        let mut draft = assignment(None, true);
        draft.published = false;
        assert!(draft.submission_window(now).is_err());
    }

    #[test]
    fn test_status_for_student() {
        let now = Utc::now();
        let open = assignment(Some(Duration::hours(1)), false);
        let closed = assignment(Some(Duration::hours(-1)), false);

        assert_eq!(submission_status(&open, None, now), SubmissionStatus::Pending);
        assert_eq!(submission_status(&closed, None, now), SubmissionStatus::Missing);
        assert_eq!(
            submission_status(&open, Some(&submission(false, false)), now),
            SubmissionStatus::Submitted
        );
        assert_eq!(
            submission_status(&closed, Some(&submission(true, false)), now),
            SubmissionStatus::Late
        );
        assert_eq!(
            submission_status(&closed, Some(&submission(true, true)), now),
            SubmissionStatus::Graded
        );
    }
}
