use std::collections::HashMap;

use actix_web::{HttpRequest, HttpResponse};
use chrono::Utc;

use super::AttendanceService;
use crate::models::{
    ApiResponse,
    attendance::{
        entities::{AttendanceStatus, AttendanceTally},
        responses::{AttendanceSummaryResponse, StudentAttendanceSummary},
    },
    class_members::entities::ClassMemberRole,
};
use crate::services::access::load_class_access;
use crate::services::{Reply, current_user, internal};

/// 按学生统计出勤；只计入已开始的场次，学生只看到自己
pub async fn get_summary(service: &AttendanceService, request: &HttpRequest, class_id: i64) -> Reply {
    let user = current_user(request)?;
    let storage = service.get_storage(request);
    let now = Utc::now();

    let (_, access) = load_class_access(storage.as_ref(), &user, class_id).await?;

    let session_ids: Vec<i64> = storage
        .list_class_attendance_sessions(class_id)
        .await
        .map_err(internal("Failed to load attendance sessions"))?
        .into_iter()
        .filter(|s| s.opens_at <= now)
        .map(|s| s.id)
        .collect();
    let session_count = session_ids.len() as i64;

    let mut by_student: HashMap<i64, Vec<AttendanceStatus>> = HashMap::new();
    for record in storage
        .list_attendance_records(&session_ids)
        .await
        .map_err(internal("Failed to load attendance records"))?
    {
        by_student.entry(record.student_id).or_default().push(record.status);
    }

    let mut students = storage
        .list_class_users(class_id, Some(ClassMemberRole::Student))
        .await
        .map_err(internal("Failed to load students"))?;
    if !access.can_manage_content() {
        students.retain(|s| s.id == user.id);
    }

    let students = students
        .iter()
        .map(|student| StudentAttendanceSummary {
            student: student.summary(),
            tally: AttendanceTally::from_statuses(
                by_student.remove(&student.id).unwrap_or_default(),
                session_count,
            ),
        })
        .collect();

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        AttendanceSummaryResponse {
            session_count,
            students,
        },
        "Attendance summary retrieved successfully",
    )))
}
