use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use rolodex_core::{AppError, ErrorResponse, PageParams, Paginated};
use rolodex_db::UnitOfWork;
use rolodex_models::{CreateUserDto, MessageResponse, UpdateUserDto, User, UserFilterParams, UserId};
use tracing::instrument;

use crate::middleware::auth::AuthUser;
use crate::modules::users::service::UserService;
use crate::state::AppState;
use crate::validator::{ValidPath, ValidatedJson};

/// Create a user (admin only)
#[utoipa::path(
    post,
    path = "/api/v1/user",
    request_body = CreateUserDto,
    responses(
        (status = 201, description = "User created", body = User),
        (status = 400, description = "Malformed request body", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - admin only", body = ErrorResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state, dto))]
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateUserDto>,
) -> Result<(StatusCode, Json<User>), AppError> {
    let mut uow = UnitOfWork::begin(&state.db).await?;
    let user = UserService::create_user(&mut uow, dto).await?;
    uow.commit().await?;

    Ok((StatusCode::CREATED, Json(user)))
}

/// List users (admin only)
#[utoipa::path(
    get,
    path = "/api/v1/users",
    params(UserFilterParams, PageParams),
    responses(
        (status = 200, description = "Page of users", body = Paginated<User>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - admin only", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state))]
pub async fn list_users(
    State(state): State<AppState>,
    Query(filters): Query<UserFilterParams>,
    Query(page): Query<PageParams>,
) -> Result<Json<Paginated<User>>, AppError> {
    let mut uow = UnitOfWork::read_only(&state.db).await?;
    let users = UserService::list_users(&mut uow, &filters, &page).await?;

    Ok(Json(users))
}

/// Get a user (admin only)
#[utoipa::path(
    get,
    path = "/api/v1/user/{user_id}",
    params(("user_id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "User", body = User),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - admin only", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state))]
pub async fn get_user(
    State(state): State<AppState>,
    ValidPath(user_id): ValidPath<UserId>,
) -> Result<Json<User>, AppError> {
    let mut uow = UnitOfWork::read_only(&state.db).await?;
    let user = UserService::get_user(&mut uow, user_id).await?;

    Ok(Json(user))
}

/// Update a user (admin only)
#[utoipa::path(
    put,
    path = "/api/v1/user/{user_id}",
    params(("user_id" = Uuid, Path, description = "User ID")),
    request_body = UpdateUserDto,
    responses(
        (status = 200, description = "Updated user", body = User),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - admin only", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state, dto))]
pub async fn update_user(
    State(state): State<AppState>,
    ValidPath(user_id): ValidPath<UserId>,
    ValidatedJson(dto): ValidatedJson<UpdateUserDto>,
) -> Result<Json<User>, AppError> {
    let mut uow = UnitOfWork::begin(&state.db).await?;
    let user = UserService::update_user(&mut uow, user_id, dto).await?;
    uow.commit().await?;

    Ok(Json(user))
}

/// Delete a user and their contacts (admin only)
#[utoipa::path(
    delete,
    path = "/api/v1/user/{user_id}",
    params(("user_id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "User deleted", body = MessageResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - admin only", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 422, description = "Admin attempted to delete their own account", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state, auth_user), fields(admin_id = %auth_user.user_id()))]
pub async fn delete_user(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidPath(user_id): ValidPath<UserId>,
) -> Result<Json<MessageResponse>, AppError> {
    let mut uow = UnitOfWork::begin(&state.db).await?;
    UserService::delete_user(&mut uow, auth_user.user_id(), user_id).await?;
    uow.commit().await?;

    Ok(Json(MessageResponse::new("User deleted successfully")))
}
