//! User accounts and the DTOs that create, update and list them.

use chrono::{DateTime, Utc};
use rolodex_core::serde::deserialize_optional_trimmed;
use rolodex_db::{Changes, Entity, Filter};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::ids::UserId;
use crate::validation::not_blank;

/// A user account.
///
/// `password` holds the bcrypt hash and is never serialized.
#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct User {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    #[schema(example = "ada@example.com")]
    pub email: String,
    #[serde(skip)]
    pub password: String,
    pub is_admin: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Entity for User {
    type Id = UserId;

    const TABLE: &'static str = "users";
    const COLUMNS: &'static str =
        "id, first_name, last_name, email, password, is_admin, is_active, created_at, updated_at";
    const NAME: &'static str = "user";

    fn id(&self) -> UserId {
        self.id
    }

    fn changes(&self) -> Changes {
        Changes::new()
            .set("first_name", self.first_name.as_str())
            .set("last_name", self.last_name.as_str())
            .set("email", self.email.as_str())
            .set("password", self.password.as_str())
            .set("is_admin", self.is_admin)
            .set("is_active", self.is_active)
    }
}

/// Self-service registration. Role flags cannot be chosen here.
#[derive(Deserialize, Debug, Clone, Validate, ToSchema)]
pub struct SignupDto {
    #[validate(custom(function = "not_blank"))]
    pub first_name: String,
    #[validate(custom(function = "not_blank"))]
    pub last_name: String,
    #[validate(email)]
    #[schema(example = "ada@example.com")]
    pub email: String,
    #[validate(length(min = 8))]
    #[schema(example = "password123")]
    pub password: String,
}

/// Admin-created user with explicit role flags.
#[derive(Deserialize, Debug, Clone, Validate, ToSchema)]
pub struct CreateUserDto {
    #[validate(custom(function = "not_blank"))]
    pub first_name: String,
    #[validate(custom(function = "not_blank"))]
    pub last_name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8))]
    pub password: String,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl From<SignupDto> for CreateUserDto {
    fn from(dto: SignupDto) -> Self {
        Self {
            first_name: dto.first_name,
            last_name: dto.last_name,
            email: dto.email,
            password: dto.password,
            is_admin: false,
            is_active: true,
        }
    }
}

/// Partial update; absent fields are left untouched. Activation is not
/// editable here: removing an account goes through the delete endpoint so
/// its contacts follow it.
#[derive(Deserialize, Debug, Clone, Default, Validate, ToSchema)]
pub struct UpdateUserDto {
    #[validate(custom(function = "not_blank"))]
    pub first_name: Option<String>,
    #[validate(custom(function = "not_blank"))]
    pub last_name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(min = 8))]
    pub password: Option<String>,
    pub is_admin: Option<bool>,
}

/// Substring filters for the user listing.
#[derive(Deserialize, Debug, Clone, Default, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UserFilterParams {
    #[serde(default, deserialize_with = "deserialize_optional_trimmed")]
    pub first_name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_trimmed")]
    pub last_name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_trimmed")]
    pub email: Option<String>,
}

impl UserFilterParams {
    pub fn to_filters(&self) -> Vec<Filter> {
        let mut filters = Vec::new();
        if let Some(v) = &self.first_name {
            filters.push(Filter::contains("first_name", v.as_str()));
        }
        if let Some(v) = &self.last_name {
            filters.push(Filter::contains("last_name", v.as_str()));
        }
        if let Some(v) = &self.email {
            filters.push(Filter::contains("email", v.to_lowercase()));
        }
        filters
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signup() -> SignupDto {
        SignupDto {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: "ada@example.com".into(),
            password: "password123".into(),
        }
    }

    #[test]
    fn test_signup_validation() {
        assert!(signup().validate().is_ok());

        let blank = SignupDto {
            first_name: "   ".into(),
            ..signup()
        };
        let errors = blank.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("first_name"));

        let short = SignupDto {
            password: "short".into(),
            ..signup()
        };
        assert!(short.validate().is_err());

        let bad_email = SignupDto {
            email: "not-an-email".into(),
            ..signup()
        };
        assert!(bad_email.validate().is_err());
    }

    #[test]
    fn test_signup_never_grants_admin() {
        let dto: SignupDto = serde_json::from_value(serde_json::json!({
            "first_name": "Mallory",
            "last_name": "M",
            "email": "m@example.com",
            "password": "password123",
            "is_admin": true
        }))
        .unwrap();
        let create = CreateUserDto::from(dto);
        assert!(!create.is_admin);
        assert!(create.is_active);
    }

    #[test]
    fn test_create_user_defaults() {
        let dto: CreateUserDto = serde_json::from_value(serde_json::json!({
            "first_name": "Bo",
            "last_name": "B",
            "email": "bo@example.com",
            "password": "password123"
        }))
        .unwrap();
        assert!(!dto.is_admin);
        assert!(dto.is_active);
    }

    #[test]
    fn test_password_is_never_serialized() {
        let user = User {
            id: UserId::new(),
            first_name: "Ada".into(),
            last_name: "L".into(),
            email: "ada@example.com".into(),
            password: "$2b$12$hash".into(),
            is_admin: false,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password").is_none());
        assert_eq!(json["email"], "ada@example.com");
    }

    #[test]
    fn test_update_user_dto_allows_partial() {
        let dto = UpdateUserDto {
            last_name: Some("Byron".into()),
            ..Default::default()
        };
        assert!(dto.validate().is_ok());

        let blank = UpdateUserDto {
            first_name: Some(" ".into()),
            ..Default::default()
        };
        assert!(blank.validate().is_err());
    }

    #[test]
    fn test_update_user_dto_ignores_is_active() {
        let dto: UpdateUserDto = serde_json::from_str(r#"{"is_active":false}"#).unwrap();
        assert!(dto.first_name.is_none());
        assert!(dto.is_admin.is_none());
    }

    #[test]
    fn test_user_filters() {
        let params = UserFilterParams {
            first_name: Some("ad".into()),
            email: Some("EXAMPLE".into()),
            ..Default::default()
        };
        assert_eq!(
            params.to_filters(),
            vec![
                Filter::contains("first_name", "ad"),
                Filter::contains("email", "example"),
            ]
        );
        assert!(UserFilterParams::default().to_filters().is_empty());
    }
}
