use actix_web::{HttpRequest, HttpResponse};

use super::ClassService;
use crate::models::{
    ApiResponse,
    classes::requests::{ClassListQuery, ClassQueryParams},
};
use crate::services::{Reply, current_user, internal};

/// 管理员看到全部班级，其他用户只看到负责、任教或加入的班级
pub async fn list_classes(
    service: &ClassService,
    request: &HttpRequest,
    query: ClassQueryParams,
) -> Reply {
    let user = current_user(request)?;
    let storage = service.get_storage(request);

    let list_query = ClassListQuery {
        page: Some(query.pagination.page),
        size: Some(query.pagination.size),
        member_id: (!user.is_admin()).then_some(user.id),
        search: query.search,
        include_archived: query.include_archived,
    };

    let response = storage
        .list_classes_with_pagination(list_query)
        .await
        .map_err(internal("Failed to list classes"))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        response,
        "Classes retrieved successfully",
    )))
}
