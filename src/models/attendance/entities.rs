use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

crate::define_string_enum! {
    #[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
    pub enum AttendanceStatus ("考勤状态") {
        Present = "present",
        Late = "late",
        Absent = "absent",
        Excused = "excused",
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct AttendanceSession {
    pub id: i64,
    pub class_id: i64,
    pub created_by: i64,
    pub title: String,
    /// 签到码，仅教师可见
    pub code: String,
    pub opens_at: DateTime<Utc>,
    pub closes_at: DateTime<Utc>,
    pub late_after_minutes: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckInError {
    NotOpen,
    Closed,
}

impl AttendanceSession {
    pub fn is_open(&self, now: DateTime<Utc>) -> bool {
        self.opens_at <= now && now <= self.closes_at
    }

    /// 签到时刻对应的状态：开始后 late_after_minutes 内为 present，之后为 late
    pub fn check_in_status(&self, now: DateTime<Utc>) -> Result<AttendanceStatus, CheckInError> {
        if now < self.opens_at {
            return Err(CheckInError::NotOpen);
        }
        if now > self.closes_at {
            return Err(CheckInError::Closed);
        }
        let late_from = self.opens_at + Duration::minutes(i64::from(self.late_after_minutes.max(0)));
        if now <= late_from {
            Ok(AttendanceStatus::Present)
        } else {
            Ok(AttendanceStatus::Late)
        }
    }

    /// 学生视角隐藏签到码
    pub fn without_code(mut self) -> Self {
        self.code.clear();
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct AttendanceRecord {
    pub id: i64,
    pub session_id: i64,
    pub student_id: i64,
    pub status: AttendanceStatus,
    pub checked_in_at: Option<DateTime<Utc>>,
    pub note: Option<String>,
    pub updated_at: DateTime<Utc>,
}

/// 单个学生的出勤统计
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct AttendanceTally {
    pub present: i64,
    pub late: i64,
    pub absent: i64,
    pub excused: i64,
    /// (present + late) / (总场次 - excused)，无可计场次时为空
    pub rate: Option<f64>,
}

impl AttendanceTally {
    /// `statuses` 为该学生每场已记录的状态，未记录的场次计为缺勤
    pub fn from_statuses<I>(statuses: I, session_count: i64) -> Self
    where
        I: IntoIterator<Item = AttendanceStatus>,
    {
        let mut tally = AttendanceTally::default();
        for status in statuses {
            match status {
                AttendanceStatus::Present => tally.present += 1,
                AttendanceStatus::Late => tally.late += 1,
                AttendanceStatus::Absent => tally.absent += 1,
                AttendanceStatus::Excused => tally.excused += 1,
            }
        }
        let recorded = tally.present + tally.late + tally.absent + tally.excused;
        tally.absent += (session_count - recorded).max(0);

        let countable = session_count - tally.excused;
        tally.rate = (countable > 0).then(|| (tally.present + tally.late) as f64 / countable as f64);
        tally
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(late_after: i32) -> AttendanceSession {
        let opens = DateTime::<Utc>::from_timestamp(1_700_000_000, 0).unwrap();
        AttendanceSession {
            id: 1,
            class_id: 1,
            created_by: 1,
            title: "Lecture 1".into(),
            code: "ABC123".into(),
            opens_at: opens,
            closes_at: opens + Duration::hours(1),
            late_after_minutes: late_after,
            created_at: opens,
        }
    }

    #[test]
    fn test_check_in_status_boundaries() {
        let s = session(10);
        assert_eq!(
            s.check_in_status(s.opens_at - Duration::seconds(1)),
            Err(CheckInError::NotOpen)
        );
        assert_eq!(s.check_in_status(s.opens_at), Ok(AttendanceStatus::Present));
        assert_eq!(
            s.check_in_status(s.opens_at + Duration::minutes(10)),
            Ok(AttendanceStatus::Present)
        );
        assert_eq!(
            s.check_in_status(s.opens_at + Duration::minutes(11)),
            Ok(AttendanceStatus::Late)
        );
        assert_eq!(s.check_in_status(s.closes_at), Ok(AttendanceStatus::Late));
        assert_eq!(
            s.check_in_status(s.closes_at + Duration::seconds(1)),
            Err(CheckInError::Closed)
        );
    }

    #[test]
    fn test_zero_grace_is_late_immediately() {
        let s = session(0);
        assert_eq!(s.check_in_status(s.opens_at), Ok(AttendanceStatus::Present));
        assert_eq!(
            s.check_in_status(s.opens_at + Duration::seconds(1)),
            Ok(AttendanceStatus::Late)
        );
    }

    #[test]
    fn test_tally_counts_missing_as_absent() {
        use AttendanceStatus::*;
        let tally = AttendanceTally::from_statuses([Present, Late, Excused], 5);
        assert_eq!(tally.present, 1);
        assert_eq!(tally.late, 1);
        assert_eq!(tally.excused, 1);
        assert_eq!(tally.absent, 2);
        assert_eq!(tally.rate, Some(0.5));
    }

    #[test]
    fn test_tally_without_countable_sessions() {
        let tally = AttendanceTally::from_statuses([AttendanceStatus::Excused], 1);
        assert_eq!(tally.rate, None);
        assert_eq!(AttendanceTally::from_statuses([], 0).rate, None);
    }
}
