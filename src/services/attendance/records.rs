use std::collections::HashMap;

use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse};

use super::{AttendanceService, load_session, require_manager};
use crate::models::{
    ApiResponse, ErrorCode,
    attendance::{
        entities::AttendanceStatus,
        requests::{SetRecordRequest, UpsertRecord},
        responses::{RosterEntry, SessionRosterResponse},
    },
    class_members::entities::ClassMemberRole,
};
use crate::services::{Reply, current_user, internal, reject};

pub async fn get_roster(
    service: &AttendanceService,
    request: &HttpRequest,
    session_id: i64,
) -> Reply {
    let user = current_user(request)?;
    let storage = service.get_storage(request);

    let (session, access) = load_session(storage.as_ref(), &user, session_id).await?;
    require_manager(&access)?;

    let students = storage
        .list_class_users(session.class_id, Some(ClassMemberRole::Student))
        .await
        .map_err(internal("Failed to load students"))?;
    let mut records: HashMap<i64, _> = storage
        .list_attendance_records(&[session.id])
        .await
        .map_err(internal("Failed to load attendance records"))?
        .into_iter()
        .map(|r| (r.student_id, r))
        .collect();

    let entries = students
        .iter()
        .map(|student| {
            let record = records.remove(&student.id);
            RosterEntry {
                student: student.summary(),
                status: record.as_ref().map_or(AttendanceStatus::Absent, |r| r.status),
                record,
            }
        })
        .collect();

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        SessionRosterResponse { session, entries },
        "Attendance roster retrieved successfully",
    )))
}

/// 教师手动设置某个学生的考勤
pub async fn set_record(
    service: &AttendanceService,
    request: &HttpRequest,
    session_id: i64,
    student_id: i64,
    record: SetRecordRequest,
) -> Reply {
    let user = current_user(request)?;
    let storage = service.get_storage(request);

    let (session, access) = load_session(storage.as_ref(), &user, session_id).await?;
    require_manager(&access)?;

    let is_student = storage
        .get_class_member(session.class_id, student_id)
        .await
        .map_err(internal("Failed to load class member"))?
        .is_some_and(|m| m.role == ClassMemberRole::Student);
    if !is_student {
        return Err(reject(
            StatusCode::NOT_FOUND,
            ErrorCode::ClassMemberNotFound,
            "Student is not a member of this class",
        ));
    }

    let existing = storage
        .get_attendance_record(session.id, student_id)
        .await
        .map_err(internal("Failed to load attendance record"))?;
    let saved = storage
        .upsert_attendance_record(UpsertRecord {
            session_id: session.id,
            student_id,
            status: record.status,
            checked_in_at: existing.and_then(|r| r.checked_in_at),
            note: record.note.map(|n| n.trim().to_string()).filter(|n| !n.is_empty()),
        })
        .await
        .map_err(internal("Failed to save attendance record"))?;

    tracing::info!(
        "Attendance of student {} in session {} set to {} by {}",
        student_id,
        session.id,
        saved.status,
        user.id
    );
    Ok(HttpResponse::Ok().json(ApiResponse::success(saved, "Attendance record saved")))
}
