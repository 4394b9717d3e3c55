use std::collections::HashMap;

use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse};
use chrono::{DateTime, Duration, Utc};

use super::{AttendanceService, load_session, require_manager};
use crate::models::{
    ApiResponse, ErrorCode,
    attendance::{
        entities::{AttendanceSession, AttendanceStatus},
        requests::{CreateSessionRequest, NewSession, SessionListParams},
        responses::{SessionListResponse, SessionView},
    },
    notifications::{
        entities::{NotificationType, ReferenceType},
        requests::NewNotification,
    },
};
use crate::services::access::{
    ClassAccess, ensure_not_archived, load_class_access, require_content_manager,
};
use crate::services::notifications::publish::notify_class_students;
use crate::services::{Reply, current_user, get_mailer, internal, reject};
use crate::utils::random_code::generate_attendance_code;
use crate::utils::validate::validate_required_text;

const DEFAULT_DURATION_MINUTES: i64 = 60;
const MAX_DURATION_MINUTES: i64 = 24 * 60;

/// 计算签到窗口
fn resolve_window(
    req: &CreateSessionRequest,
    now: DateTime<Utc>,
) -> Result<(DateTime<Utc>, DateTime<Utc>), &'static str> {
    let opens_at = req.opens_at.unwrap_or(now);
    let closes_at = match (req.closes_at, req.duration_minutes) {
        (Some(closes), _) => closes,
        (None, Some(minutes)) if !(1..=MAX_DURATION_MINUTES).contains(&minutes) => {
            return Err("duration_minutes must be between 1 and 1440");
        }
        (None, minutes) => opens_at + Duration::minutes(minutes.unwrap_or(DEFAULT_DURATION_MINUTES)),
    };
    if closes_at <= opens_at {
        return Err("closes_at must be after opens_at");
    }
    if closes_at - opens_at > Duration::minutes(MAX_DURATION_MINUTES) {
        return Err("An attendance session can last at most 24 hours");
    }
    if req.late_after_minutes < 0 {
        return Err("late_after_minutes must not be negative");
    }
    Ok((opens_at, closes_at))
}

/// 学生视角隐藏签到码
fn view(
    session: AttendanceSession,
    access: &ClassAccess,
    my_status: Option<AttendanceStatus>,
    now: DateTime<Utc>,
) -> SessionView {
    let is_open = session.is_open(now);
    let session = if access.can_manage_content() {
        session
    } else {
        session.without_code()
    };
    SessionView {
        session,
        is_open,
        my_status,
    }
}

pub async fn create_session(
    service: &AttendanceService,
    request: &HttpRequest,
    class_id: i64,
    session: CreateSessionRequest,
) -> Reply {
    let user = current_user(request)?;
    let storage = service.get_storage(request);
    let now = Utc::now();

    let (class, _) = require_content_manager(storage.as_ref(), &user, class_id).await?;
    ensure_not_archived(&class)?;
    validate_required_text("Title", &session.title, 200)
        .map_err(|msg| reject(StatusCode::BAD_REQUEST, ErrorCode::BadRequest, msg))?;
    let (opens_at, closes_at) = resolve_window(&session, now)
        .map_err(|msg| reject(StatusCode::BAD_REQUEST, ErrorCode::BadRequest, msg))?;

    let created = storage
        .create_attendance_session(NewSession {
            class_id,
            created_by: user.id,
            title: session.title.trim().to_string(),
            code: generate_attendance_code(),
            opens_at,
            closes_at,
            late_after_minutes: session.late_after_minutes,
        })
        .await
        .map_err(internal("Failed to create attendance session"))?;

    notify_class_students(
        storage.as_ref(),
        get_mailer(request),
        class_id,
        NewNotification {
            notification_type: NotificationType::AttendanceOpened,
            title: created.title.clone(),
            content: Some(format!("Attendance check-in for {}", class.name)),
            reference_type: Some(ReferenceType::AttendanceSession),
            reference_id: Some(created.id),
        },
        None,
    )
    .await;

    Ok(HttpResponse::Created().json(ApiResponse::success(
        created,
        "Attendance session created",
    )))
}

pub async fn list_sessions(
    service: &AttendanceService,
    request: &HttpRequest,
    class_id: i64,
    query: SessionListParams,
) -> Reply {
    let user = current_user(request)?;
    let storage = service.get_storage(request);
    let now = Utc::now();

    let (_, access) = load_class_access(storage.as_ref(), &user, class_id).await?;
    let page = storage
        .list_attendance_sessions_with_pagination(
            class_id,
            Some(query.pagination.page),
            Some(query.pagination.size),
        )
        .await
        .map_err(internal("Failed to list attendance sessions"))?;

    let mut mine = HashMap::new();
    if access.is_student() {
        let ids: Vec<i64> = page.items.iter().map(|s| s.id).collect();
        mine = storage
            .list_attendance_records(&ids)
            .await
            .map_err(internal("Failed to load attendance records"))?
            .into_iter()
            .filter(|r| r.student_id == user.id)
            .map(|r| (r.session_id, r.status))
            .collect();
    }

    // 学生未签到时 my_status 为空
    let items = page
        .items
        .into_iter()
        .map(|session| {
            let my_status = mine.get(&session.id).copied();
            view(session, &access, my_status, now)
        })
        .collect();

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        SessionListResponse {
            items,
            pagination: page.pagination,
        },
        "Attendance sessions retrieved successfully",
    )))
}

pub async fn get_session(
    service: &AttendanceService,
    request: &HttpRequest,
    session_id: i64,
) -> Reply {
    let user = current_user(request)?;
    let storage = service.get_storage(request);

    let (session, access) = load_session(storage.as_ref(), &user, session_id).await?;
    let my_status = if access.is_student() {
        storage
            .get_attendance_record(session.id, user.id)
            .await
            .map_err(internal("Failed to load attendance record"))?
            .map(|r| r.status)
    } else {
        None
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        view(session, &access, my_status, Utc::now()),
        "Attendance session retrieved successfully",
    )))
}

pub async fn close_session(
    service: &AttendanceService,
    request: &HttpRequest,
    session_id: i64,
) -> Reply {
    let user = current_user(request)?;
    let storage = service.get_storage(request);
    let now = Utc::now();

    let (session, access) = load_session(storage.as_ref(), &user, session_id).await?;
    require_manager(&access)?;
    if session.closes_at <= now {
        return Err(reject(
            StatusCode::CONFLICT,
            ErrorCode::AttendanceClosed,
            "Attendance session is already closed",
        ));
    }

    let closed = storage
        .close_attendance_session(session_id, now)
        .await
        .map_err(internal("Failed to close attendance session"))?
        .ok_or_else(|| {
            reject(
                StatusCode::NOT_FOUND,
                ErrorCode::AttendanceSessionNotFound,
                "Attendance session not found",
            )
        })?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(closed, "Attendance session closed")))
}

pub async fn delete_session(
    service: &AttendanceService,
    request: &HttpRequest,
    session_id: i64,
) -> Reply {
    let user = current_user(request)?;
    let storage = service.get_storage(request);

    let (_, access) = load_session(storage.as_ref(), &user, session_id).await?;
    require_manager(&access)?;

    storage
        .delete_attendance_session(session_id)
        .await
        .map_err(internal("Failed to delete attendance session"))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Attendance session deleted")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(
        opens_at: Option<DateTime<Utc>>,
        closes_at: Option<DateTime<Utc>>,
        duration_minutes: Option<i64>,
    ) -> CreateSessionRequest {
        CreateSessionRequest {
            title: "Lecture".into(),
            opens_at,
            closes_at,
            duration_minutes,
            late_after_minutes: 10,
        }
    }

    #[test]
    fn test_window_defaults_to_one_hour_from_now() {
        let now = Utc::now();
        let (opens, closes) = resolve_window(&request(None, None, None), now).unwrap();
        assert_eq!(opens, now);
        assert_eq!(closes, now + Duration::minutes(60));
    }

    #[test]
    fn test_window_validation() {
        let now = Utc::now();
        assert!(resolve_window(&request(None, Some(now - Duration::minutes(1)), None), now).is_err());
        assert!(resolve_window(&request(None, None, Some(0)), now).is_err());
        assert!(resolve_window(&request(None, None, Some(2000)), now).is_err());
        let (_, closes) = resolve_window(&request(None, None, Some(15)), now).unwrap();
        assert_eq!(closes, now + Duration::minutes(15));
    }
}
