//! Contacts owned by a user.

use chrono::{DateTime, Utc};
use rolodex_core::serde::deserialize_optional_trimmed;
use rolodex_db::{Changes, Entity, Filter};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::contact_details::{ContactDetail, CreateContactDetailDto};
use crate::ids::{ContactId, UserId};
use crate::validation::not_blank;

#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct Contact {
    pub id: ContactId,
    pub user_id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Entity for Contact {
    type Id = ContactId;

    const TABLE: &'static str = "contacts";
    const COLUMNS: &'static str =
        "id, user_id, first_name, last_name, is_active, created_at, updated_at";
    const NAME: &'static str = "contact";

    fn id(&self) -> ContactId {
        self.id
    }

    fn changes(&self) -> Changes {
        Changes::new()
            .set("first_name", self.first_name.as_str())
            .set("last_name", self.last_name.as_str())
    }
}

/// A contact together with its active details.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct ContactWithDetails {
    #[serde(flatten)]
    pub contact: Contact,
    pub details: Vec<ContactDetail>,
}

#[derive(Deserialize, Debug, Clone, Validate, ToSchema)]
pub struct CreateContactDto {
    #[validate(custom(function = "not_blank"))]
    #[schema(example = "Grace")]
    pub first_name: String,
    #[validate(custom(function = "not_blank"))]
    #[schema(example = "Hopper")]
    pub last_name: String,
    /// Details created together with the contact.
    #[serde(default)]
    #[validate(nested)]
    pub details: Vec<CreateContactDetailDto>,
}

/// Partial update; absent fields are left untouched.
#[derive(Deserialize, Debug, Clone, Default, Validate, ToSchema)]
pub struct UpdateContactDto {
    #[validate(custom(function = "not_blank"))]
    pub first_name: Option<String>,
    #[validate(custom(function = "not_blank"))]
    pub last_name: Option<String>,
}

#[derive(Deserialize, Debug, Clone, Default, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ContactFilterParams {
    #[serde(default, deserialize_with = "deserialize_optional_trimmed")]
    pub first_name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_trimmed")]
    pub last_name: Option<String>,
    /// Matches either the first or the last name.
    #[serde(default, deserialize_with = "deserialize_optional_trimmed")]
    pub name: Option<String>,
}

impl ContactFilterParams {
    pub fn to_filters(&self) -> Vec<Filter> {
        let mut filters = Vec::new();
        if let Some(v) = &self.first_name {
            filters.push(Filter::contains("first_name", v.as_str()));
        }
        if let Some(v) = &self.last_name {
            filters.push(Filter::contains("last_name", v.as_str()));
        }
        if let Some(v) = &self.name {
            filters.push(Filter::any_contains(&["first_name", "last_name"], v.as_str()));
        }
        filters
    }
}
