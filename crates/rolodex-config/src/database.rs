//! Database connection settings.
//!
//! `DATABASE_URL` wins when set. Otherwise the URL is assembled from the
//! discrete `DB_USER`, `DB_PASS`, `DB_HOST`, `DB_PORT` and `DB_NAME`
//! variables, which is how container deployments usually hand them out.

use std::env;
use std::fmt;

#[derive(Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

/// Neither `DATABASE_URL` nor the `DB_*` variables are set.
#[derive(Debug)]
pub struct MissingDatabaseUrl;

impl fmt::Display for MissingDatabaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DATABASE_URL (or DB_USER/DB_HOST/DB_NAME) must be set")
    }
}

impl std::error::Error for MissingDatabaseUrl {}

impl DatabaseConfig {
    pub fn from_env() -> Result<Self, MissingDatabaseUrl> {
        let url = match env::var("DATABASE_URL") {
            Ok(url) if !url.trim().is_empty() => url,
            _ => Self::url_from_parts()?,
        };

        Ok(Self {
            url,
            max_connections: crate::env_or("DATABASE_MAX_CONNECTIONS", 10),
        })
    }

    fn url_from_parts() -> Result<String, MissingDatabaseUrl> {
        let user = env::var("DB_USER").map_err(|_| MissingDatabaseUrl)?;
        let host = env::var("DB_HOST").map_err(|_| MissingDatabaseUrl)?;
        let name = env::var("DB_NAME").map_err(|_| MissingDatabaseUrl)?;
        let pass = env::var("DB_PASS").unwrap_or_default();
        let port = env::var("DB_PORT").unwrap_or_else(|_| "5432".to_string());

        Ok(compose_url(&user, &pass, &host, &port, &name))
    }
}

// The URL embeds the password.
impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("url", &"<redacted>")
            .field("max_connections", &self.max_connections)
            .finish()
    }
}

fn compose_url(user: &str, pass: &str, host: &str, port: &str, name: &str) -> String {
    if pass.is_empty() {
        format!("postgres://{user}@{host}:{port}/{name}")
    } else {
        format!("postgres://{user}:{pass}@{host}:{port}/{name}")
    }
}
