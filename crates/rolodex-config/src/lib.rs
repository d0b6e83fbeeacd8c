//! # Rolodex Config
//!
//! Configuration types for the Rolodex API, loaded from environment variables
//! (a `.env` file is read by the binaries through `dotenvy` before these run).
//!
//! - [`jwt`]: token signing secret, lifetime and issuer
//! - [`cors`]: allowed browser origins
//! - [`database`]: connection string and pool size
//! - [`admin`]: optional bootstrap administrator
//! - [`server`]: listen address
//!
//! # Example
//!
//! ```ignore
//! use rolodex_config::{CorsConfig, DatabaseConfig, JwtConfig};
//!
//! let jwt_config = JwtConfig::from_env();
//! let cors_config = CorsConfig::from_env();
//! let database = DatabaseConfig::from_env()?;
//! ```

pub mod admin;
pub mod cors;
pub mod database;
pub mod jwt;
pub mod server;

// Re-export commonly used types at crate root
pub use admin::AdminSeedConfig;
pub use cors::CorsConfig;
pub use database::{DatabaseConfig, MissingDatabaseUrl};
pub use jwt::JwtConfig;
pub use server::ServerConfig;

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}
