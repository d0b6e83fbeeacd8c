use rolodex_core::{ErrorResponse, PageParams};
use rolodex_models::{
    Contact, ContactDetail, ContactWithDetails, CreateContactDetailDto, CreateContactDto,
    CreateUserDto, DetailType, LoginRequest, LoginResponse, MessageResponse, SignupDto,
    UpdateContactDetailDto, UpdateContactDto, UpdateUserDto, User,
};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::modules::health::controller::HealthResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::health::controller::health,
        crate::modules::auth::controller::signup,
        crate::modules::auth::controller::login,
        crate::modules::users::controller::create_user,
        crate::modules::users::controller::list_users,
        crate::modules::users::controller::get_user,
        crate::modules::users::controller::update_user,
        crate::modules::users::controller::delete_user,
        crate::modules::contacts::controller::create_contact,
        crate::modules::contacts::controller::list_contacts,
        crate::modules::contacts::controller::get_contact,
        crate::modules::contacts::controller::update_contact,
        crate::modules::contacts::controller::delete_contact,
        crate::modules::contact_details::controller::create_detail,
        crate::modules::contact_details::controller::list_details,
        crate::modules::contact_details::controller::get_detail,
        crate::modules::contact_details::controller::update_detail,
        crate::modules::contact_details::controller::delete_detail,
    ),
    components(
        schemas(
            User,
            SignupDto,
            CreateUserDto,
            UpdateUserDto,
            LoginRequest,
            LoginResponse,
            MessageResponse,
            Contact,
            ContactWithDetails,
            CreateContactDto,
            UpdateContactDto,
            ContactDetail,
            DetailType,
            CreateContactDetailDto,
            UpdateContactDetailDto,
            PageParams,
            ErrorResponse,
            HealthResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Service health"),
        (name = "Authentication", description = "Signup and login"),
        (name = "Users", description = "User administration (admin only)"),
        (name = "Contacts", description = "Contacts owned by a user"),
        (name = "Contact Details", description = "Email and phone entries on a contact")
    ),
    info(
        title = "Rolodex API",
        version = "0.1.0",
        description = "Multi-tenant contact management with JWT authentication, built on Axum and PostgreSQL.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
