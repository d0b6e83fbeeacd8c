use rolodex_config::{CorsConfig, JwtConfig};
use sqlx::PgPool;

/// Shared, cheaply cloneable state handed to every handler.
#[derive(Clone, Debug)]
pub struct AppState {
    pub db: PgPool,
    pub jwt_config: JwtConfig,
    pub cors_config: CorsConfig,
}

impl AppState {
    pub fn new(db: PgPool, jwt_config: JwtConfig, cors_config: CorsConfig) -> Self {
        Self {
            db,
            jwt_config,
            cors_config,
        }
    }

    /// State built from the environment around an existing pool.
    pub fn from_env(db: PgPool) -> Self {
        Self::new(db, JwtConfig::from_env(), CorsConfig::from_env())
    }
}
