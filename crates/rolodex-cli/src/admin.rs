//! Interactive-free part of `create-admin`, shared with tests.

use anyhow::anyhow;
use rolodex_core::{AppError, hash_password};
use rolodex_db::{Changes, Filter, PgPool, Repository, UnitOfWork};
use rolodex_models::User;
use rolodex_models::validation::{normalize_email, required_text};

/// Creates an active administrator. Fails with a conflict when an active
/// account already uses the email.
pub async fn create_admin(
    pool: &PgPool,
    first_name: &str,
    last_name: &str,
    email: &str,
    password: &str,
) -> Result<User, AppError> {
    let first_name = required_text("first_name", first_name)?;
    let last_name = required_text("last_name", last_name)?;
    let email = normalize_email(email);
    if password.len() < 8 {
        return Err(AppError::validation(
            "password",
            "Password must be at least 8 characters",
        ));
    }

    let mut uow = UnitOfWork::begin(pool).await?;

    if Repository::<User>::find_first(&mut uow, &[Filter::eq("email", email.clone())])
        .await?
        .is_some()
    {
        return Err(
            AppError::conflict(anyhow!("A user with this email already exists"))
                .with_context("email"),
        );
    }

    let user = Repository::<User>::add(
        &mut uow,
        &Changes::new()
            .set("first_name", first_name)
            .set("last_name", last_name)
            .set("email", email)
            .set("password", hash_password(password)?)
            .set("is_admin", true)
            .set("is_active", true),
    )
    .await?;

    uow.commit().await?;
    Ok(user)
}
