use std::collections::HashMap;

use actix_web::{HttpRequest, HttpResponse};
use chrono::Utc;

use super::AssignmentService;
use crate::models::{
    ApiResponse,
    assignments::{
        entities::submission_status,
        requests::{AssignmentListParams, AssignmentListQuery},
        responses::{AssignmentListResponse, AssignmentView},
    },
};
use crate::services::access::load_class_access;
use crate::services::{Reply, current_user, internal};

/// 学生只看到已发布作业，并附带自己的提交状态
pub async fn list_assignments(
    service: &AssignmentService,
    request: &HttpRequest,
    class_id: i64,
    query: AssignmentListParams,
) -> Reply {
    let user = current_user(request)?;
    let storage = service.get_storage(request);

    let (_, access) = load_class_access(storage.as_ref(), &user, class_id).await?;
    let manager = access.can_manage_content();

    let page = storage
        .list_assignments_with_pagination(AssignmentListQuery {
            page: Some(query.pagination.page),
            size: Some(query.pagination.size),
            class_id,
            search: query.search,
            published_only: !manager,
        })
        .await
        .map_err(internal("Failed to list assignments"))?;

    let mut submissions = HashMap::new();
    if access.is_student() {
        let ids: Vec<i64> = page.items.iter().map(|a| a.id).collect();
        submissions = storage
            .list_student_submissions(user.id, &ids)
            .await
            .map_err(internal("Failed to load submissions"))?
            .into_iter()
            .map(|s| (s.assignment_id, s))
            .collect();
    }

    let now = Utc::now();
    let items = page
        .items
        .into_iter()
        .map(|assignment| {
            if !access.is_student() {
                return AssignmentView {
                    assignment,
                    my_status: None,
                    my_submission: None,
                };
            }
            let mine = submissions.remove(&assignment.id);
            AssignmentView {
                my_status: Some(submission_status(&assignment, mine.as_ref(), now)),
                my_submission: mine,
                assignment,
            }
        })
        .collect();

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        AssignmentListResponse {
            items,
            pagination: page.pagination,
        },
        "Assignments retrieved successfully",
    )))
}
