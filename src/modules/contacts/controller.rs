use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use rolodex_core::{AppError, ErrorResponse, PageParams, Paginated};
use rolodex_db::UnitOfWork;
use rolodex_models::{
    ContactFilterParams, ContactId, ContactWithDetails, CreateContactDto, MessageResponse,
    UpdateContactDto, UserId,
};
use tracing::instrument;

use crate::modules::contacts::service::ContactService;
use crate::state::AppState;
use crate::validator::{ValidPath, ValidatedJson};

/// Create a contact, optionally with details
#[utoipa::path(
    post,
    path = "/api/v1/users/{user_id}/contacts",
    params(("user_id" = Uuid, Path, description = "Owner ID")),
    request_body = CreateContactDto,
    responses(
        (status = 201, description = "Contact created", body = ContactWithDetails),
        (status = 400, description = "Malformed request", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Contacts"
)]
#[instrument(skip(state, dto))]
pub async fn create_contact(
    State(state): State<AppState>,
    ValidPath(user_id): ValidPath<UserId>,
    ValidatedJson(dto): ValidatedJson<CreateContactDto>,
) -> Result<(StatusCode, Json<ContactWithDetails>), AppError> {
    let mut uow = UnitOfWork::begin(&state.db).await?;
    let contact = ContactService::create_contact(&mut uow, user_id, dto).await?;
    uow.commit().await?;

    Ok((StatusCode::CREATED, Json(contact)))
}

/// List a user's contacts with their details
#[utoipa::path(
    get,
    path = "/api/v1/users/{user_id}/contacts",
    params(("user_id" = Uuid, Path, description = "Owner ID"), ContactFilterParams, PageParams),
    responses(
        (status = 200, description = "Page of contacts", body = Paginated<ContactWithDetails>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Contacts"
)]
#[instrument(skip(state))]
pub async fn list_contacts(
    State(state): State<AppState>,
    ValidPath(user_id): ValidPath<UserId>,
    Query(filters): Query<ContactFilterParams>,
    Query(page): Query<PageParams>,
) -> Result<Json<Paginated<ContactWithDetails>>, AppError> {
    let mut uow = UnitOfWork::read_only(&state.db).await?;
    let contacts = ContactService::list_contacts(&mut uow, user_id, &filters, &page).await?;

    Ok(Json(contacts))
}

#[utoipa::path(
    get,
    path = "/api/v1/users/{user_id}/contacts/{contact_id}",
    params(
        ("user_id" = Uuid, Path, description = "Owner ID"),
        ("contact_id" = Uuid, Path, description = "Contact ID")
    ),
    responses(
        (status = 200, description = "Contact", body = ContactWithDetails),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 404, description = "Contact not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Contacts"
)]
#[instrument(skip(state))]
pub async fn get_contact(
    State(state): State<AppState>,
    ValidPath((user_id, contact_id)): ValidPath<(UserId, ContactId)>,
) -> Result<Json<ContactWithDetails>, AppError> {
    let mut uow = UnitOfWork::read_only(&state.db).await?;
    let contact = ContactService::get_contact(&mut uow, user_id, contact_id).await?;

    Ok(Json(contact))
}

#[utoipa::path(
    put,
    path = "/api/v1/users/{user_id}/contacts/{contact_id}",
    params(
        ("user_id" = Uuid, Path, description = "Owner ID"),
        ("contact_id" = Uuid, Path, description = "Contact ID")
    ),
    request_body = UpdateContactDto,
    responses(
        (status = 200, description = "Updated contact", body = ContactWithDetails),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 404, description = "Contact not found", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Contacts"
)]
#[instrument(skip(state, dto))]
pub async fn update_contact(
    State(state): State<AppState>,
    ValidPath((user_id, contact_id)): ValidPath<(UserId, ContactId)>,
    ValidatedJson(dto): ValidatedJson<UpdateContactDto>,
) -> Result<Json<ContactWithDetails>, AppError> {
    let mut uow = UnitOfWork::begin(&state.db).await?;
    let contact = ContactService::update_contact(&mut uow, user_id, contact_id, dto).await?;
    uow.commit().await?;

    Ok(Json(contact))
}

/// Delete a contact together with its details
#[utoipa::path(
    delete,
    path = "/api/v1/users/{user_id}/contacts/{contact_id}",
    params(
        ("user_id" = Uuid, Path, description = "Owner ID"),
        ("contact_id" = Uuid, Path, description = "Contact ID")
    ),
    responses(
        (status = 200, description = "Contact deleted", body = MessageResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 404, description = "Contact not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Contacts"
)]
#[instrument(skip(state))]
pub async fn delete_contact(
    State(state): State<AppState>,
    ValidPath((user_id, contact_id)): ValidPath<(UserId, ContactId)>,
) -> Result<Json<MessageResponse>, AppError> {
    let mut uow = UnitOfWork::begin(&state.db).await?;
    ContactService::delete_contact(&mut uow, user_id, contact_id).await?;
    uow.commit().await?;

    Ok(Json(MessageResponse::new("Contact deleted successfully")))
}
