use std::env;

/// Credentials for the administrator created at startup when none exists yet.
///
/// Bootstrapping only happens when both `ADMIN_EMAIL` and `ADMIN_PASSWORD`
/// are set; otherwise use `rolodex-cli create-admin`.
#[derive(Clone)]
pub struct AdminSeedConfig {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

impl AdminSeedConfig {
    pub fn from_env() -> Option<Self> {
        let email = env::var("ADMIN_EMAIL").ok().filter(|v| !v.trim().is_empty())?;
        let password = env::var("ADMIN_PASSWORD").ok().filter(|v| !v.is_empty())?;

        Some(Self {
            email,
            password,
            first_name: env::var("ADMIN_FIRST_NAME").unwrap_or_else(|_| "Admin".to_string()),
            last_name: env::var("ADMIN_LAST_NAME").unwrap_or_else(|_| "User".to_string()),
        })
    }
}

impl std::fmt::Debug for AdminSeedConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminSeedConfig")
            .field("email", &self.email)
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .finish_non_exhaustive()
    }
}
