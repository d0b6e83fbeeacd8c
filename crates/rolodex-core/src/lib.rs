//! # Rolodex Core
//!
//! Core types, errors, and utilities for the Rolodex API.
//!
//! This crate provides foundational types used throughout the application:
//!
//! - [`errors`]: The error taxonomy and its HTTP response conversion
//! - [`pagination`]: Page/limit parameters and the `{data, total, page, limit}` envelope
//! - [`password`]: bcrypt password hashing and verification
//! - [`serde`]: Lenient deserializers for query-string parameters
//!
//! # Example
//!
//! ```ignore
//! use rolodex_core::errors::AppError;
//! use rolodex_core::pagination::{PageParams, Paginated};
//! use rolodex_core::password::{hash_password, verify_password};
//!
//! let error = AppError::not_found(anyhow::anyhow!("Contact not found")).with_context("contact");
//!
//! let hash = hash_password("secure_password")?;
//!
//! let params = PageParams::default();
//! let page = Paginated::new(rows, total, &params);
//! ```

pub mod errors;
pub mod pagination;
pub mod password;
pub mod serde;

// Re-export commonly used types at crate root
pub use errors::{AppError, ErrorKind, ErrorResponse};
pub use pagination::{PageParams, Paginated};
pub use password::{hash_password, verify_password};
