//! Fake user accounts.

use fake::Fake;
use fake::faker::name::en::{FirstName, LastName};
use rayon::prelude::*;
use rolodex_models::UserId;
use sqlx::{Postgres, QueryBuilder, Transaction};

use super::models::{SEED_EMAIL_DOMAIN, UserSeed};

// 4 binds per row, well under the 65535 parameter limit
const BATCH_SIZE: usize = 1000;

/// Generates `count` users sharing one password hash. Emails carry the index
/// so they stay unique across a run.
pub fn generate_users(count: usize, password_hash: &str) -> Vec<UserSeed> {
    (0..count)
        .into_par_iter()
        .map(|idx| {
            let first_name: String = FirstName().fake();
            let last_name: String = LastName().fake();
            let email = format!(
                "{}.{}+{}@{}",
                first_name.to_lowercase(),
                last_name.to_lowercase(),
                idx,
                SEED_EMAIL_DOMAIN
            );

            UserSeed {
                first_name,
                last_name,
                email,
                password_hash: password_hash.to_string(),
            }
        })
        .collect()
}

pub async fn insert_users(
    tx: &mut Transaction<'static, Postgres>,
    users: &[UserSeed],
) -> Result<Vec<UserId>, sqlx::Error> {
    let mut ids = Vec::with_capacity(users.len());

    for chunk in users.chunks(BATCH_SIZE) {
        let mut qb =
            QueryBuilder::new("INSERT INTO users (first_name, last_name, email, password) ");
        qb.push_values(chunk, |mut row, user| {
            row.push_bind(&user.first_name)
                .push_bind(&user.last_name)
                .push_bind(&user.email)
                .push_bind(&user.password_hash);
        });
        qb.push(" RETURNING id");

        let chunk_ids: Vec<UserId> = qb.build_query_scalar().fetch_all(&mut **tx).await?;
        ids.extend(chunk_ids);
    }

    Ok(ids)
}
