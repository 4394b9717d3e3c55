use actix_web::{HttpRequest, HttpResponse};

use super::UserService;
use crate::models::{
    ApiResponse,
    users::requests::{UserListParams, UserListQuery},
};
use crate::services::{Reply, internal};

pub async fn list_users(service: &UserService, request: &HttpRequest, query: UserListParams) -> Reply {
    // 空白搜索词视为不过滤
    let search = query
        .search
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());

    let users = service
        .get_storage(request)
        .list_users_with_pagination(UserListQuery {
            page: Some(query.pagination.page),
            size: Some(query.pagination.size),
            role: query.role,
            status: query.status,
            search,
        })
        .await
        .map_err(internal("Failed to list users"))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(users, "Users retrieved")))
}
