use axum::{Json, extract::State, http::StatusCode};
use rolodex_core::{AppError, ErrorResponse};
use rolodex_db::UnitOfWork;
use rolodex_models::{LoginRequest, LoginResponse, SignupDto, User};
use tracing::instrument;

use crate::modules::auth::service::AuthService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Register a new account
#[utoipa::path(
    post,
    path = "/api/v1/signup",
    request_body = SignupDto,
    responses(
        (status = 201, description = "Account created", body = User),
        (status = 400, description = "Malformed request body", body = ErrorResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn signup(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<SignupDto>,
) -> Result<(StatusCode, Json<User>), AppError> {
    let mut uow = UnitOfWork::begin(&state.db).await?;
    let user = AuthService::signup(&mut uow, dto).await?;
    uow.commit().await?;

    Ok((StatusCode::CREATED, Json(user)))
}

/// Exchange credentials for an access token
#[utoipa::path(
    post,
    path = "/api/v1/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Malformed request body", body = ErrorResponse),
        (status = 401, description = "Invalid email or password", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let mut uow = UnitOfWork::read_only(&state.db).await?;
    let response = AuthService::login(&mut uow, dto, &state.jwt_config).await?;

    Ok(Json(response))
}
