//! JWT claim structure for access tokens.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Claims embedded in every access token.
///
/// - `sub`: the user's ID
/// - `is_admin` / `is_active`: role flags captured when the token was issued
/// - `iss`: issuer, checked on verification
/// - `iat` / `exp`: issued-at and expiry as Unix timestamps
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Claims {
    pub sub: Uuid,
    pub is_admin: bool,
    pub is_active: bool,
    pub iss: String,
    pub iat: usize,
    pub exp: usize,
}

impl Claims {
    pub fn user_id(&self) -> Uuid {
        self.sub
    }
}
