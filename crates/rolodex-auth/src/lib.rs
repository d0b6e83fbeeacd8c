//! # Rolodex Auth
//!
//! Identity tokens and role predicates for the Rolodex API.
//!
//! - [`claims`]: the claim set carried by an access token
//! - [`jwt`]: issuing and verifying HS256 access tokens
//! - [`gates`]: the admin, staff and user predicates evaluated on claims
//!
//! Tokens are stateless: everything an authorization decision needs
//! (`sub`, `is_admin`, `is_active`) travels inside the signed claims.
//!
//! # Example
//!
//! ```ignore
//! use rolodex_auth::{create_access_token, verify_token, gates};
//! use rolodex_config::JwtConfig;
//!
//! let config = JwtConfig::from_env();
//! let token = create_access_token(user_id, false, true, &config)?;
//!
//! let claims = verify_token(&token, &config)?;
//! gates::check_user_access(&claims, user_id)?;
//! ```

pub mod claims;
pub mod gates;
pub mod jwt;

// Re-export commonly used types at crate root
pub use claims::Claims;
pub use jwt::{TokenError, create_access_token, decode_token, encode_claims, verify_token};
