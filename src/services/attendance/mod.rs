pub mod check_in;
pub mod records;
pub mod sessions;
pub mod summary;

use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::access::{ClassAccess, load_class_access};
use super::{declare_service, finish, internal, reject};
use crate::models::{
    ErrorCode,
    attendance::{
        entities::AttendanceSession,
        requests::{CheckInRequest, CreateSessionRequest, SessionListParams, SetRecordRequest},
    },
    users::entities::User,
};
use crate::storage::Storage;

declare_service!(AttendanceService);

impl AttendanceService {
    pub async fn create_session(
        &self,
        request: &HttpRequest,
        class_id: i64,
        session: CreateSessionRequest,
    ) -> ActixResult<HttpResponse> {
        finish(sessions::create_session(self, request, class_id, session).await)
    }

    pub async fn list_sessions(
        &self,
        request: &HttpRequest,
        class_id: i64,
        query: SessionListParams,
    ) -> ActixResult<HttpResponse> {
        finish(sessions::list_sessions(self, request, class_id, query).await)
    }

    pub async fn get_session(
        &self,
        request: &HttpRequest,
        session_id: i64,
    ) -> ActixResult<HttpResponse> {
        finish(sessions::get_session(self, request, session_id).await)
    }

    // 提前结束签到
    pub async fn close_session(
        &self,
        request: &HttpRequest,
        session_id: i64,
    ) -> ActixResult<HttpResponse> {
        finish(sessions::close_session(self, request, session_id).await)
    }

    pub async fn delete_session(
        &self,
        request: &HttpRequest,
        session_id: i64,
    ) -> ActixResult<HttpResponse> {
        finish(sessions::delete_session(self, request, session_id).await)
    }

    pub async fn check_in(
        &self,
        request: &HttpRequest,
        session_id: i64,
        check_in: CheckInRequest,
    ) -> ActixResult<HttpResponse> {
        finish(check_in::check_in(self, request, session_id, check_in).await)
    }

    // 场次名单，未签到的学生显示为缺勤
    pub async fn get_roster(
        &self,
        request: &HttpRequest,
        session_id: i64,
    ) -> ActixResult<HttpResponse> {
        finish(records::get_roster(self, request, session_id).await)
    }

    pub async fn set_record(
        &self,
        request: &HttpRequest,
        session_id: i64,
        student_id: i64,
        record: SetRecordRequest,
    ) -> ActixResult<HttpResponse> {
        finish(records::set_record(self, request, session_id, student_id, record).await)
    }

    pub async fn get_summary(
        &self,
        request: &HttpRequest,
        class_id: i64,
    ) -> ActixResult<HttpResponse> {
        finish(summary::get_summary(self, request, class_id).await)
    }
}

pub(super) async fn load_session(
    storage: &dyn Storage,
    user: &User,
    session_id: i64,
) -> Result<(AttendanceSession, ClassAccess), HttpResponse> {
    let session = storage
        .get_attendance_session_by_id(session_id)
        .await
        .map_err(internal("Failed to get attendance session"))?
        .ok_or_else(|| {
            reject(
                StatusCode::NOT_FOUND,
                ErrorCode::AttendanceSessionNotFound,
                "Attendance session not found",
            )
        })?;
    let (_, access) = load_class_access(storage, user, session.class_id).await?;
    Ok((session, access))
}

pub(super) fn require_manager(access: &ClassAccess) -> Result<(), HttpResponse> {
    if access.can_manage_content() {
        Ok(())
    } else {
        Err(reject(
            StatusCode::FORBIDDEN,
            ErrorCode::ClassPermissionDenied,
            "Only professors and assistants of this class can manage attendance",
        ))
    }
}
