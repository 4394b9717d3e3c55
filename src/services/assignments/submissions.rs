use std::collections::HashMap;

use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse};

use super::{AssignmentService, load_assignment, require_manager};
use crate::models::{
    ApiResponse, ErrorCode,
    assignments::{
        entities::{Assignment, Submission},
        requests::{SubmissionListParams, SubmissionListQuery},
        responses::{SubmissionListResponse, SubmissionView},
    },
    users::entities::User,
};
use crate::services::access::ClassAccess;
use crate::services::{Reply, current_user, internal, reject};
use crate::storage::Storage;

/// 加载提交：学生只能看到自己的，教师需能管理该班内容
pub(super) async fn load_submission(
    storage: &dyn Storage,
    user: &User,
    submission_id: i64,
) -> Result<(Submission, Assignment, ClassAccess), HttpResponse> {
    let not_found =
        || reject(StatusCode::NOT_FOUND, ErrorCode::SubmissionNotFound, "Submission not found");

    let submission = storage
        .get_submission_by_id(submission_id)
        .await
        .map_err(internal("Failed to get submission"))?
        .ok_or_else(not_found)?;
    let (assignment, _, access) =
        load_assignment(storage, user, submission.assignment_id).await?;
    if !access.can_manage_content() && submission.student_id != user.id {
        return Err(not_found());
    }
    Ok((submission, assignment, access))
}

pub async fn list_submissions(
    service: &AssignmentService,
    request: &HttpRequest,
    assignment_id: i64,
    query: SubmissionListParams,
) -> Reply {
    let user = current_user(request)?;
    let storage = service.get_storage(request);

    let (_, _, access) = load_assignment(storage.as_ref(), &user, assignment_id).await?;
    require_manager(&access)?;

    let page = storage
        .list_submissions_with_pagination(SubmissionListQuery {
            page: Some(query.pagination.page),
            size: Some(query.pagination.size),
            assignment_id,
            ungraded_only: query.ungraded_only,
        })
        .await
        .map_err(internal("Failed to list submissions"))?;

    let student_ids: Vec<i64> = page.items.iter().map(|s| s.student_id).collect();
    let students: HashMap<i64, User> = storage
        .get_users_by_ids(&student_ids)
        .await
        .map_err(internal("Failed to load students"))?
        .into_iter()
        .map(|u| (u.id, u))
        .collect();

    let items = page
        .items
        .into_iter()
        .map(|submission| SubmissionView {
            student: students.get(&submission.student_id).map(User::summary),
            submission,
        })
        .collect();

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        SubmissionListResponse {
            items,
            pagination: page.pagination,
        },
        "Submissions retrieved successfully",
    )))
}

pub async fn get_submission(
    service: &AssignmentService,
    request: &HttpRequest,
    submission_id: i64,
) -> Reply {
    let user = current_user(request)?;
    let storage = service.get_storage(request);

    let (submission, _, _) = load_submission(storage.as_ref(), &user, submission_id).await?;
    let student = storage
        .get_user_by_id(submission.student_id)
        .await
        .map_err(internal("Failed to load student"))?
        .map(|u| u.summary());

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        SubmissionView {
            submission,
            student,
        },
        "Submission retrieved successfully",
    )))
}
