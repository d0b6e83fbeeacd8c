//! # Rolodex Models
//!
//! Entities, typed IDs and request/response DTOs for the Rolodex API.
//!
//! - [`ids`]: UUID newtypes per entity
//! - [`users`]: user accounts
//! - [`contacts`]: contacts owned by a user
//! - [`contact_details`]: email/phone entries on a contact
//! - [`auth`]: login bodies
//! - [`validation`]: field rules shared by DTOs and services
//!
//! Every entity implements [`rolodex_db::Entity`], so it can be loaded and
//! stored through [`rolodex_db::Repository`].

pub mod auth;
pub mod contact_details;
pub mod contacts;
pub mod ids;
pub mod users;
pub mod validation;

pub use auth::{LoginRequest, LoginResponse, MessageResponse};
pub use contact_details::{
    ContactDetail, CreateContactDetailDto, DetailFilterParams, DetailType, UpdateContactDetailDto,
};
pub use contacts::{
    Contact, ContactFilterParams, ContactWithDetails, CreateContactDto, UpdateContactDto,
};
pub use ids::{ContactDetailId, ContactId, UserId};
pub use users::{CreateUserDto, SignupDto, UpdateUserDto, User, UserFilterParams};
