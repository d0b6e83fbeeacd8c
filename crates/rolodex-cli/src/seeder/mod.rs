//! Database seeding.
//!
//! Data is generated in parallel with rayon and inserted with multi-row
//! `INSERT`s inside a single transaction, so a failed run leaves nothing
//! behind.

mod contacts;
mod models;
mod users;

use std::time::Instant;

use rolodex_core::hash_password;
use sqlx::PgPool;

pub use contacts::generate_contacts;
pub use models::{ContactSeed, DetailSeed, SEED_EMAIL_DOMAIN, SeedConfig, UserSeed};
pub use users::generate_users;

pub type SeedResult<T> = Result<T, Box<dyn std::error::Error>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub users: usize,
    pub contacts: usize,
    pub details: usize,
}

pub async fn seed_all(db: &PgPool, config: SeedConfig) -> SeedResult<SeedSummary> {
    let start_time = Instant::now();
    println!(
        "🌱 Seeding {} users with {} contacts each ({} details per contact)...",
        config.users, config.contacts_per_user, config.details_per_contact
    );

    let password_hash = hash_password(&config.password).map_err(|e| e.error.to_string())?;

    let user_seeds = generate_users(config.users, &password_hash);

    let mut tx = db.begin().await?;

    let user_ids = users::insert_users(&mut tx, &user_seeds).await?;
    println!("   ✓ Inserted {} users", user_ids.len());

    let contact_seeds =
        generate_contacts(&user_ids, config.contacts_per_user, config.details_per_contact);
    let details = contacts::insert_contacts(&mut tx, &contact_seeds).await?;
    println!(
        "   ✓ Inserted {} contacts and {} details",
        contact_seeds.len(),
        details
    );

    tx.commit().await?;

    println!("✅ Seeding finished in {:?}", start_time.elapsed());

    Ok(SeedSummary {
        users: user_ids.len(),
        contacts: contact_seeds.len(),
        details,
    })
}

/// Hard-deletes every seeded user with their contacts and details.
/// Administrators are never removed.
pub async fn clear_all(db: &PgPool) -> SeedResult<u64> {
    let start_time = Instant::now();
    println!("🗑️  Clearing seeded data...");

    let pattern = format!("%@{}", SEED_EMAIL_DOMAIN);
    let mut tx = db.begin().await?;

    let seeded = "SELECT id FROM users WHERE email LIKE $1 AND is_admin = FALSE";

    sqlx::query(&format!(
        "DELETE FROM contact_details WHERE user_id IN ({seeded})"
    ))
    .bind(&pattern)
    .execute(&mut *tx)
    .await?;

    sqlx::query(&format!("DELETE FROM contacts WHERE user_id IN ({seeded})"))
        .bind(&pattern)
        .execute(&mut *tx)
        .await?;

    let users = sqlx::query("DELETE FROM users WHERE email LIKE $1 AND is_admin = FALSE")
        .bind(&pattern)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    tx.commit().await?;

    println!(
        "   ✓ Deleted {} users in {:?}",
        users,
        start_time.elapsed()
    );

    Ok(users)
}
