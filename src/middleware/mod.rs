//! Authentication and role gates.
//!
//! 1. [`auth::authenticate`] validates `Authorization: Bearer <token>` and
//!    attaches the claims to the request as an [`auth::AuthUser`].
//! 2. A role gate from [`role`] runs as a `route_layer` and rejects callers
//!    whose claims fail its predicate with a 403.
//! 3. Handlers take `AuthUser` as an extractor when they need the caller.
//!
//! # Example
//!
//! ```ignore
//! use axum::{Router, middleware};
//! use crate::middleware::role::require_admin;
//!
//! let admin_routes = init_users_router()
//!     .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));
//! ```

pub mod auth;
pub mod role;
