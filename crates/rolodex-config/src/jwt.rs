use std::env;

pub const DEFAULT_ISSUER: &str = "contact-app";
pub const DEFAULT_ACCESS_EXPIRY_SECS: i64 = 24 * 60 * 60;

const DEV_SECRET: &str = "your-secret-key";

#[derive(Clone)]
pub struct JwtConfig {
    pub secret: String,
    /// Access token lifetime in seconds.
    pub access_token_expiry: i64,
    pub issuer: String,
}

impl JwtConfig {
    pub fn from_env() -> Self {
        let secret = env::var("JWT_SECRET").unwrap_or_else(|_| {
            tracing::warn!("JWT_SECRET is not set; falling back to an insecure development secret");
            DEV_SECRET.to_string()
        });

        Self {
            secret,
            access_token_expiry: crate::env_or("JWT_ACCESS_EXPIRY", DEFAULT_ACCESS_EXPIRY_SECS),
            issuer: env::var("JWT_ISSUER").unwrap_or_else(|_| DEFAULT_ISSUER.to_string()),
        }
    }
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("access_token_expiry", &self.access_token_expiry)
            .field("issuer", &self.issuer)
            .finish()
    }
}
