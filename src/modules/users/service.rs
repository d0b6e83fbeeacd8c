use anyhow::anyhow;
use rolodex_config::AdminSeedConfig;
use rolodex_core::{AppError, ErrorKind, PageParams, Paginated, hash_password};
use rolodex_db::{Changes, Filter, Repository, UnitOfWork};
use rolodex_models::validation::{normalize_email, optional_text, required_text};
use rolodex_models::{
    Contact, ContactDetail, CreateUserDto, UpdateUserDto, User, UserFilterParams, UserId,
};
use tracing::instrument;

use crate::metrics::track_user_created;

pub struct UserService;

/// Reports a duplicate address against the `email` field.
fn email_taken(err: AppError) -> AppError {
    if err.kind() == ErrorKind::Conflict {
        AppError::conflict(anyhow!("Email is already registered")).with_context("email")
    } else {
        err
    }
}

impl UserService {
    #[instrument(skip(uow, dto), fields(email = %dto.email, is_admin = dto.is_admin))]
    pub async fn create_user(uow: &mut UnitOfWork, dto: CreateUserDto) -> Result<User, AppError> {
        let first_name = required_text("first_name", &dto.first_name)?;
        let last_name = required_text("last_name", &dto.last_name)?;
        let email = normalize_email(&dto.email);
        let password = hash_password(&dto.password)?;

        let values = Changes::new()
            .set("first_name", first_name)
            .set("last_name", last_name)
            .set("email", email)
            .set("password", password)
            .set("is_admin", dto.is_admin)
            .set("is_active", dto.is_active);

        let user = Repository::<User>::add(uow, &values)
            .await
            .map_err(email_taken)?;

        track_user_created(user.is_admin);
        tracing::info!(user_id = %user.id, "User created");

        Ok(user)
    }

    #[instrument(skip(uow))]
    pub async fn get_user(uow: &mut UnitOfWork, id: UserId) -> Result<User, AppError> {
        Repository::<User>::get_by_id(uow, id, &[]).await
    }

    #[instrument(skip(uow))]
    pub async fn list_users(
        uow: &mut UnitOfWork,
        filters: &UserFilterParams,
        page: &PageParams,
    ) -> Result<Paginated<User>, AppError> {
        Repository::<User>::paginate(uow, &filters.to_filters(), page).await
    }

    #[instrument(skip(uow, dto))]
    pub async fn update_user(
        uow: &mut UnitOfWork,
        id: UserId,
        dto: UpdateUserDto,
    ) -> Result<User, AppError> {
        let password = match dto.password.as_deref() {
            Some(p) => Some(hash_password(p)?),
            None => None,
        };

        let changes = Changes::new()
            .set_opt("first_name", optional_text("first_name", dto.first_name.as_deref())?)
            .set_opt("last_name", optional_text("last_name", dto.last_name.as_deref())?)
            .set_opt("email", dto.email.as_deref().map(normalize_email))
            .set_opt("password", password)
            .set_opt("is_admin", dto.is_admin);

        Repository::<User>::update_with_map(uow, &changes, &[Filter::eq("id", id)])
            .await
            .map_err(email_taken)?
            .into_iter()
            .next()
            .ok_or_else(Repository::<User>::not_found)
    }

    /// Soft-deletes the user together with their contacts and details.
    #[instrument(skip(uow))]
    pub async fn delete_user(
        uow: &mut UnitOfWork,
        acting_admin: UserId,
        id: UserId,
    ) -> Result<(), AppError> {
        if acting_admin == id {
            return Err(AppError::validation(
                "user_id",
                "Admin cannot delete their own account",
            ));
        }

        let owned = [Filter::eq("user_id", id)];
        let details = Repository::<ContactDetail>::delete(uow, &owned).await?;
        let contacts = Repository::<Contact>::delete(uow, &owned).await?;

        if Repository::<User>::delete(uow, &[Filter::eq("id", id)]).await? == 0 {
            return Err(Repository::<User>::not_found());
        }

        tracing::info!(user_id = %id, contacts, details, "User deleted");
        Ok(())
    }

    /// Makes sure the configured administrator exists. An active account with
    /// the same email is promoted instead of duplicated.
    ///
    /// Returns `true` when something was written.
    #[instrument(skip(uow, seed), fields(email = %seed.email))]
    pub async fn ensure_admin(
        uow: &mut UnitOfWork,
        seed: &AdminSeedConfig,
    ) -> Result<bool, AppError> {
        let email = normalize_email(&seed.email);

        match Repository::<User>::find_first(uow, &[Filter::eq("email", email.clone())]).await? {
            Some(user) if user.is_admin => Ok(false),
            Some(mut user) => {
                user.is_admin = true;
                Repository::<User>::update(uow, &user).await?;
                tracing::info!(user_id = %user.id, "Existing user promoted to admin");
                Ok(true)
            }
            None => {
                Self::create_user(
                    uow,
                    CreateUserDto {
                        first_name: seed.first_name.clone(),
                        last_name: seed.last_name.clone(),
                        email,
                        password: seed.password.clone(),
                        is_admin: true,
                        is_active: true,
                    },
                )
                .await?;
                Ok(true)
            }
        }
    }
}
