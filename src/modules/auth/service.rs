use rolodex_auth::create_access_token;
use rolodex_config::JwtConfig;
use rolodex_core::{AppError, verify_password};
use rolodex_db::{Filter, Repository, UnitOfWork};
use rolodex_models::validation::normalize_email;
use rolodex_models::{LoginRequest, LoginResponse, SignupDto, User};
use tracing::instrument;

use crate::metrics::track_login;
use crate::modules::users::service::UserService;

const INVALID_CREDENTIALS: &str = "Invalid email or password";

pub struct AuthService;

impl AuthService {
    /// Registers a regular, active account.
    #[instrument(skip(uow, dto), fields(email = %dto.email))]
    pub async fn signup(uow: &mut UnitOfWork, dto: SignupDto) -> Result<User, AppError> {
        UserService::create_user(uow, dto.into()).await
    }

    /// Unknown, inactive and wrong-password logins fail identically.
    #[instrument(skip(uow, dto, jwt_config), fields(email = %dto.email))]
    pub async fn login(
        uow: &mut UnitOfWork,
        dto: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<LoginResponse, AppError> {
        let email = normalize_email(&dto.email);

        let Some(user) = Repository::<User>::find_first(uow, &[Filter::eq("email", email)]).await?
        else {
            track_login("unknown_email");
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        };

        if !verify_password(&dto.password, &user.password)? {
            track_login("wrong_password");
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        }

        let token =
            create_access_token(user.id.into_inner(), user.is_admin, user.is_active, jwt_config)?;

        track_login("success");
        tracing::info!(user_id = %user.id, "User logged in");

        Ok(LoginResponse {
            message: "Login successful".to_string(),
            token,
            user,
        })
    }
}
