use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse};
use chrono::Utc;

use super::{AttendanceService, load_session};
use crate::models::{
    ApiResponse, ErrorCode,
    attendance::{
        entities::CheckInError,
        requests::{CheckInRequest, UpsertRecord},
    },
};
use crate::services::{Reply, current_user, internal, reject};
use crate::utils::random_code::normalize_code;

pub async fn check_in(
    service: &AttendanceService,
    request: &HttpRequest,
    session_id: i64,
    check_in: CheckInRequest,
) -> Reply {
    let user = current_user(request)?;
    let storage = service.get_storage(request);
    let now = Utc::now();

    let (session, access) = load_session(storage.as_ref(), &user, session_id).await?;
    if !access.is_student() {
        return Err(reject(
            StatusCode::FORBIDDEN,
            ErrorCode::ClassPermissionDenied,
            "Only students of this class can check in",
        ));
    }

    let status = session.check_in_status(now).map_err(|e| {
        let message = match e {
            CheckInError::NotOpen => "Check-in has not started yet",
            CheckInError::Closed => "Check-in is closed",
        };
        reject(StatusCode::CONFLICT, ErrorCode::AttendanceClosed, message)
    })?;

    if normalize_code(&check_in.code) != session.code {
        tracing::debug!("Wrong attendance code from user {} for session {}", user.id, session.id);
        return Err(reject(
            StatusCode::BAD_REQUEST,
            ErrorCode::AttendanceCodeInvalid,
            "Invalid check-in code",
        ));
    }

    let existing = storage
        .get_attendance_record(session.id, user.id)
        .await
        .map_err(internal("Failed to load attendance record"))?;
    if existing.is_some() {
        return Err(reject(
            StatusCode::CONFLICT,
            ErrorCode::AttendanceAlreadyRecorded,
            "You have already checked in",
        ));
    }

    let record = storage
        .upsert_attendance_record(UpsertRecord {
            session_id: session.id,
            student_id: user.id,
            status,
            checked_in_at: Some(now),
            note: None,
        })
        .await
        .map_err(internal("Failed to record attendance"))?;

    tracing::info!("Student {} checked in to session {} as {}", user.id, session.id, status);
    Ok(HttpResponse::Created().json(ApiResponse::success(record, "Checked in")))
}
