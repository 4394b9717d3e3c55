use actix_web::{HttpRequest, HttpResponse};

use super::ClassMemberService;
use crate::models::{
    ApiResponse,
    class_members::requests::{ClassMemberListParams, ClassMemberQuery},
};
use crate::services::access::load_class_access;
use crate::services::{Reply, current_user, internal};

pub async fn list_members(
    service: &ClassMemberService,
    request: &HttpRequest,
    class_id: i64,
    query: ClassMemberListParams,
) -> Reply {
    let user = current_user(request)?;
    let storage = service.get_storage(request);

    load_class_access(storage.as_ref(), &user, class_id).await?;

    let member_query = ClassMemberQuery {
        page: Some(query.pagination.page),
        size: Some(query.pagination.size),
        search: query.search,
        role: query.role,
    };
    let response = storage
        .list_class_members_with_pagination(class_id, member_query)
        .await
        .map_err(internal("Failed to list class members"))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        response,
        "Class members retrieved successfully",
    )))
}
