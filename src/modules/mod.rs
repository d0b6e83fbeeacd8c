//! Feature modules. Each one has a `controller` (HTTP handlers with OpenAPI
//! annotations), a `router` and, where there is business logic, a `service`
//! that works inside a caller-provided [`UnitOfWork`](rolodex_db::UnitOfWork).

pub mod auth;
pub mod contact_details;
pub mod contacts;
pub mod health;
pub mod users;
