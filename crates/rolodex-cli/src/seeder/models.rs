//! Seed rows and seeding configuration.

use rolodex_models::{DetailType, UserId};

/// Domain every seeded email lives under; `clear-seed` deletes by it.
pub const SEED_EMAIL_DOMAIN: &str = "seed.rolodex.test";

pub struct UserSeed {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
}

pub struct ContactSeed {
    pub user_id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub details: Vec<DetailSeed>,
}

pub struct DetailSeed {
    pub detail_type: DetailType,
    pub value: String,
}

/// How much data `seed_all` generates.
#[derive(Clone, Debug)]
pub struct SeedConfig {
    pub users: usize,
    pub contacts_per_user: usize,
    pub details_per_contact: usize,
    /// Plain-text password shared by every seeded account.
    pub password: String,
}

impl SeedConfig {
    pub fn new(users: usize) -> Self {
        Self {
            users,
            ..Self::default()
        }
    }

    pub fn with_contacts(mut self, contacts_per_user: usize, details_per_contact: usize) -> Self {
        self.contacts_per_user = contacts_per_user;
        self.details_per_contact = details_per_contact;
        self
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = password.into();
        self
    }
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            users: 10,
            contacts_per_user: 20,
            details_per_contact: 2,
            password: "password123".to_string(),
        }
    }
}
