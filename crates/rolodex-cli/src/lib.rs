//! # Rolodex CLI
//!
//! Administration and database seeding for Rolodex development environments.
//!
//! ## Usage
//!
//! ```ignore
//! use rolodex_cli::seeder::{seed_all, SeedConfig};
//!
//! let config = SeedConfig::new(50); // 50 users with default contact counts
//! seed_all(&pool, config).await?;
//! ```

pub mod admin;
pub mod seeder;
