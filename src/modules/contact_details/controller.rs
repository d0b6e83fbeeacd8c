use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use rolodex_core::{AppError, ErrorResponse, PageParams, Paginated};
use rolodex_db::UnitOfWork;
use rolodex_models::{
    ContactDetail, ContactDetailId, ContactId, CreateContactDetailDto, DetailFilterParams,
    MessageResponse, UpdateContactDetailDto, UserId,
};
use tracing::instrument;

use crate::modules::contact_details::service::ContactDetailService;
use crate::state::AppState;
use crate::validator::{ValidPath, ValidatedJson};

type DetailPath = (UserId, ContactId, ContactDetailId);

/// Add an email or phone entry to a contact
#[utoipa::path(
    post,
    path = "/api/v1/users/{user_id}/contacts/{contact_id}/details",
    params(
        ("user_id" = Uuid, Path, description = "Owner ID"),
        ("contact_id" = Uuid, Path, description = "Contact ID")
    ),
    request_body = CreateContactDetailDto,
    responses(
        (status = 201, description = "Detail created", body = ContactDetail),
        (status = 400, description = "Malformed request", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 404, description = "Contact not found", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Contact Details"
)]
#[instrument(skip(state, dto))]
pub async fn create_detail(
    State(state): State<AppState>,
    ValidPath((user_id, contact_id)): ValidPath<(UserId, ContactId)>,
    ValidatedJson(dto): ValidatedJson<CreateContactDetailDto>,
) -> Result<(StatusCode, Json<ContactDetail>), AppError> {
    let mut uow = UnitOfWork::begin(&state.db).await?;
    let detail = ContactDetailService::add_detail(&mut uow, user_id, contact_id, dto).await?;
    uow.commit().await?;

    Ok((StatusCode::CREATED, Json(detail)))
}

#[utoipa::path(
    get,
    path = "/api/v1/users/{user_id}/contacts/{contact_id}/details",
    params(
        ("user_id" = Uuid, Path, description = "Owner ID"),
        ("contact_id" = Uuid, Path, description = "Contact ID"),
        DetailFilterParams,
        PageParams
    ),
    responses(
        (status = 200, description = "Page of details", body = Paginated<ContactDetail>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 404, description = "Contact not found", body = ErrorResponse),
        (status = 422, description = "Unknown detail type filter", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Contact Details"
)]
#[instrument(skip(state))]
pub async fn list_details(
    State(state): State<AppState>,
    ValidPath((user_id, contact_id)): ValidPath<(UserId, ContactId)>,
    Query(filters): Query<DetailFilterParams>,
    Query(page): Query<PageParams>,
) -> Result<Json<Paginated<ContactDetail>>, AppError> {
    let mut uow = UnitOfWork::read_only(&state.db).await?;
    let details =
        ContactDetailService::list_details(&mut uow, user_id, contact_id, &filters, &page).await?;

    Ok(Json(details))
}

#[utoipa::path(
    get,
    path = "/api/v1/users/{user_id}/contacts/{contact_id}/details/{detail_id}",
    params(
        ("user_id" = Uuid, Path, description = "Owner ID"),
        ("contact_id" = Uuid, Path, description = "Contact ID"),
        ("detail_id" = Uuid, Path, description = "Detail ID")
    ),
    responses(
        (status = 200, description = "Detail", body = ContactDetail),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 404, description = "Contact detail not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Contact Details"
)]
#[instrument(skip(state))]
pub async fn get_detail(
    State(state): State<AppState>,
    ValidPath((user_id, contact_id, detail_id)): ValidPath<DetailPath>,
) -> Result<Json<ContactDetail>, AppError> {
    let mut uow = UnitOfWork::read_only(&state.db).await?;
    let detail = ContactDetailService::get_detail(&mut uow, user_id, contact_id, detail_id).await?;

    Ok(Json(detail))
}

#[utoipa::path(
    put,
    path = "/api/v1/users/{user_id}/contacts/{contact_id}/details/{detail_id}",
    params(
        ("user_id" = Uuid, Path, description = "Owner ID"),
        ("contact_id" = Uuid, Path, description = "Contact ID"),
        ("detail_id" = Uuid, Path, description = "Detail ID")
    ),
    request_body = UpdateContactDetailDto,
    responses(
        (status = 200, description = "Updated detail", body = ContactDetail),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 404, description = "Contact detail not found", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Contact Details"
)]
#[instrument(skip(state, dto))]
pub async fn update_detail(
    State(state): State<AppState>,
    ValidPath((user_id, contact_id, detail_id)): ValidPath<DetailPath>,
    ValidatedJson(dto): ValidatedJson<UpdateContactDetailDto>,
) -> Result<Json<ContactDetail>, AppError> {
    let mut uow = UnitOfWork::begin(&state.db).await?;
    let detail =
        ContactDetailService::update_detail(&mut uow, user_id, contact_id, detail_id, dto).await?;
    uow.commit().await?;

    Ok(Json(detail))
}

#[utoipa::path(
    delete,
    path = "/api/v1/users/{user_id}/contacts/{contact_id}/details/{detail_id}",
    params(
        ("user_id" = Uuid, Path, description = "Owner ID"),
        ("contact_id" = Uuid, Path, description = "Contact ID"),
        ("detail_id" = Uuid, Path, description = "Detail ID")
    ),
    responses(
        (status = 200, description = "Detail deleted", body = MessageResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 404, description = "Contact detail not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Contact Details"
)]
#[instrument(skip(state))]
pub async fn delete_detail(
    State(state): State<AppState>,
    ValidPath((user_id, contact_id, detail_id)): ValidPath<DetailPath>,
) -> Result<Json<MessageResponse>, AppError> {
    let mut uow = UnitOfWork::begin(&state.db).await?;
    ContactDetailService::delete_detail(&mut uow, user_id, contact_id, detail_id).await?;
    uow.commit().await?;

    Ok(Json(MessageResponse::new("Contact detail deleted successfully")))
}
