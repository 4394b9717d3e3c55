use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse};

use super::ContactService;
use crate::models::{
    ApiResponse, ErrorCode,
    contact::requests::{ContactListParams, ContactListQuery, UpdateContactStatusRequest},
};
use crate::services::{Reply, internal, reject};

pub(super) fn not_found() -> HttpResponse {
    reject(
        StatusCode::NOT_FOUND,
        ErrorCode::ContactMessageNotFound,
        "Contact message not found",
    )
}

pub async fn list_contacts(
    service: &ContactService,
    request: &HttpRequest,
    query: ContactListParams,
) -> Reply {
    let storage = service.get_storage(request);

    let response = storage
        .list_contact_messages_with_pagination(ContactListQuery {
            page: Some(query.pagination.page),
            size: Some(query.pagination.size),
            status: query.status,
            search: query.search.filter(|s| !s.trim().is_empty()),
        })
        .await
        .map_err(internal("Failed to list contact messages"))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(response, "Contact submissions retrieved")))
}

pub async fn get_contact(service: &ContactService, request: &HttpRequest, id: i64) -> Reply {
    let storage = service.get_storage(request);

    let contact = storage
        .get_contact_message_by_id(id)
        .await
        .map_err(internal("Failed to get contact message"))?
        .ok_or_else(not_found)?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(contact, "Contact submission retrieved")))
}

pub async fn update_status(
    service: &ContactService,
    request: &HttpRequest,
    id: i64,
    update: UpdateContactStatusRequest,
) -> Reply {
    let storage = service.get_storage(request);

    let contact = storage
        .update_contact_status(id, update.status)
        .await
        .map_err(internal("Failed to update contact message"))?
        .ok_or_else(not_found)?;

    tracing::info!("Contact message {} marked as {}", contact.id, contact.status);
    Ok(HttpResponse::Ok().json(ApiResponse::success(contact, "Status updated")))
}

pub async fn delete_contact(service: &ContactService, request: &HttpRequest, id: i64) -> Reply {
    let storage = service.get_storage(request);

    let deleted = storage
        .delete_contact_message(id)
        .await
        .map_err(internal("Failed to delete contact message"))?;
    if !deleted {
        return Err(not_found());
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Contact message deleted")))
}
