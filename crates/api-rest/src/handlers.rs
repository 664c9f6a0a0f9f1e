//! Contact endpoints.
//!
//! Each handler authenticates the caller, runs one [`ContactService`](contacts_core::ContactService)
//! operation scoped to that caller and maps an absent result to `404 Contact not found`.

use crate::auth::CurrentUser;
use crate::error::{found, ApiResult};
use crate::extract::{JsonBody, PathParam, QueryParams};
use crate::AppState;
use api_shared::{ContactReq, ContactRes, ErrorRes, HealthRes, HealthService, ListQuery};
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use contacts_core::{Contact, ContactId};

fn to_res(contacts: Vec<Contact>) -> Json<Vec<ContactRes>> {
    Json(contacts.into_iter().map(ContactRes::from).collect())
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint. Does not require authentication.
#[axum::debug_handler]
pub async fn health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthService::check_health())
}

#[utoipa::path(
    get,
    path = "/contacts",
    params(ListQuery),
    security(("bearer" = [])),
    responses(
        (status = 200, description = "The caller's contacts", body = [ContactRes]),
        (status = 401, description = "Missing or invalid token", body = ErrorRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// List the caller's contacts
///
/// `skip` and `limit` default to the server's configured list defaults (0 and 100 unless
/// overridden).
#[axum::debug_handler]
pub async fn read_contacts(
    State(state): State<AppState>,
    CurrentUser(owner): CurrentUser,
    QueryParams(query): QueryParams<ListQuery>,
) -> ApiResult<Json<Vec<ContactRes>>> {
    let contacts = state.contacts.list(query.skip, query.limit, owner)?;
    Ok(to_res(contacts))
}

#[utoipa::path(
    get,
    path = "/contacts/{contact_id}",
    params(("contact_id" = i64, Path, description = "Contact identifier")),
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Contact found", body = ContactRes),
        (status = 404, description = "Contact not found", body = ErrorRes),
        (status = 401, description = "Missing or invalid token", body = ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn read_contact(
    State(state): State<AppState>,
    CurrentUser(owner): CurrentUser,
    PathParam(contact_id): PathParam<i64>,
) -> ApiResult<Json<ContactRes>> {
    let contact = state
        .contacts
        .get_by_id(ContactId::new(contact_id), owner)?;
    Ok(Json(found(contact)?.into()))
}

#[utoipa::path(
    post,
    path = "/contacts",
    request_body = ContactReq,
    security(("bearer" = [])),
    responses(
        (status = 201, description = "Contact created", body = ContactRes),
        (status = 401, description = "Missing or invalid token", body = ErrorRes),
        (status = 422, description = "Invalid request body", body = ErrorRes)
    )
)]
/// Create a contact owned by the caller
#[axum::debug_handler]
pub async fn create_contact(
    State(state): State<AppState>,
    CurrentUser(owner): CurrentUser,
    JsonBody(req): JsonBody<ContactReq>,
) -> ApiResult<(StatusCode, Json<ContactRes>)> {
    let contact = state.contacts.create(req.into(), owner)?;
    Ok((StatusCode::CREATED, Json(contact.into())))
}

#[utoipa::path(
    delete,
    path = "/contacts/delete/{contact_id}",
    params(("contact_id" = i64, Path, description = "Contact identifier")),
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Contact deleted; the removed record", body = ContactRes),
        (status = 404, description = "Contact not found", body = ErrorRes),
        (status = 401, description = "Missing or invalid token", body = ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn remove_contact(
    State(state): State<AppState>,
    CurrentUser(owner): CurrentUser,
    PathParam(contact_id): PathParam<i64>,
) -> ApiResult<Json<ContactRes>> {
    let contact = state.contacts.delete(ContactId::new(contact_id), owner)?;
    Ok(Json(found(contact)?.into()))
}

#[utoipa::path(
    put,
    path = "/contacts/update/{contact_id}",
    params(("contact_id" = i64, Path, description = "Contact identifier")),
    request_body = ContactReq,
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Contact updated", body = ContactRes),
        (status = 404, description = "Contact not found", body = ErrorRes),
        (status = 401, description = "Missing or invalid token", body = ErrorRes),
        (status = 422, description = "Invalid request body", body = ErrorRes)
    )
)]
/// Replace every editable field of a contact
#[axum::debug_handler]
pub async fn update_contact(
    State(state): State<AppState>,
    CurrentUser(owner): CurrentUser,
    PathParam(contact_id): PathParam<i64>,
    JsonBody(req): JsonBody<ContactReq>,
) -> ApiResult<Json<ContactRes>> {
    let contact = state
        .contacts
        .update(ContactId::new(contact_id), req.into(), owner)?;
    Ok(Json(found(contact)?.into()))
}

#[utoipa::path(
    get,
    path = "/contacts/contact_by_first_name/{contact_first_name}",
    params(("contact_first_name" = String, Path, description = "Exact first name, not trimmed")),
    security(("bearer" = [])),
    responses(
        (status = 200, description = "First matching contact", body = ContactRes),
        (status = 404, description = "Contact not found", body = ErrorRes),
        (status = 401, description = "Missing or invalid token", body = ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn read_contact_by_first_name(
    State(state): State<AppState>,
    CurrentUser(owner): CurrentUser,
    PathParam(first_name): PathParam<String>,
) -> ApiResult<Json<ContactRes>> {
    let contact = state.contacts.get_by_first_name(&first_name, owner)?;
    Ok(Json(found(contact)?.into()))
}

#[utoipa::path(
    get,
    path = "/contacts/contact_by_last_name/{contact_last_name}",
    params(("contact_last_name" = String, Path, description = "Last name; surrounding whitespace ignored")),
    security(("bearer" = [])),
    responses(
        (status = 200, description = "First matching contact", body = ContactRes),
        (status = 404, description = "Contact not found", body = ErrorRes),
        (status = 401, description = "Missing or invalid token", body = ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn read_contact_by_last_name(
    State(state): State<AppState>,
    CurrentUser(owner): CurrentUser,
    PathParam(last_name): PathParam<String>,
) -> ApiResult<Json<ContactRes>> {
    let contact = state.contacts.get_by_last_name(&last_name, owner)?;
    Ok(Json(found(contact)?.into()))
}

#[utoipa::path(
    get,
    path = "/contacts/contact_by_email/{contact_email}",
    params(("contact_email" = String, Path, description = "Email; surrounding whitespace ignored")),
    security(("bearer" = [])),
    responses(
        (status = 200, description = "First matching contact", body = ContactRes),
        (status = 404, description = "Contact not found", body = ErrorRes),
        (status = 401, description = "Missing or invalid token", body = ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn read_contact_by_email(
    State(state): State<AppState>,
    CurrentUser(owner): CurrentUser,
    PathParam(email): PathParam<String>,
) -> ApiResult<Json<ContactRes>> {
    let contact = state.contacts.get_by_email(&email, owner)?;
    Ok(Json(found(contact)?.into()))
}

#[utoipa::path(
    get,
    path = "/contacts/upcoming_birthdays",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Contacts with a birthday in the next 8 days, today included", body = [ContactRes]),
        (status = 401, description = "Missing or invalid token", body = ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn upcoming_birthdays(
    State(state): State<AppState>,
    CurrentUser(owner): CurrentUser,
) -> ApiResult<Json<Vec<ContactRes>>> {
    let contacts = state.contacts.upcoming_birthdays(owner)?;
    Ok(to_res(contacts))
}
