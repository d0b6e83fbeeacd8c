//! Email and phone entries attached to a contact.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rolodex_core::AppError;
use rolodex_core::serde::deserialize_optional_trimmed;
use rolodex_db::{Changes, Entity, Filter, SqlValue};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::ids::{ContactDetailId, ContactId, UserId};
use crate::validation::not_blank;

/// The kind of a contact detail. Stored as lower-case text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum DetailType {
    Email,
    Phone,
}

impl DetailType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Phone => "phone",
        }
    }

    /// Parses client input, reporting failures against the `type` field.
    pub fn parse_field(raw: &str) -> Result<Self, AppError> {
        raw.parse()
            .map_err(|e: ParseDetailTypeError| AppError::validation("type", e.to_string()))
    }
}

impl fmt::Display for DetailType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseDetailTypeError(String);

impl fmt::Display for ParseDetailTypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid detail type '{}': must be 'email' or 'phone'", self.0)
    }
}

impl std::error::Error for ParseDetailTypeError {}

impl FromStr for DetailType {
    type Err = ParseDetailTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "email" => Ok(Self::Email),
            "phone" => Ok(Self::Phone),
            _ => Err(ParseDetailTypeError(s.trim().to_string())),
        }
    }
}

impl TryFrom<String> for DetailType {
    type Error = ParseDetailTypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DetailType> for SqlValue {
    fn from(t: DetailType) -> Self {
        SqlValue::Text(t.as_str().to_string())
    }
}

/// A single email or phone entry.
///
/// `user_id` duplicates the owning contact's user so every query can be
/// scoped to the owner without a join.
#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct ContactDetail {
    pub id: ContactDetailId,
    pub contact_id: ContactId,
    pub user_id: UserId,
    #[serde(rename = "type")]
    #[sqlx(try_from = "String")]
    pub detail_type: DetailType,
    pub value: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Entity for ContactDetail {
    type Id = ContactDetailId;

    const TABLE: &'static str = "contact_details";
    const COLUMNS: &'static str =
        "id, contact_id, user_id, detail_type, value, is_active, created_at, updated_at";
    const NAME: &'static str = "contact detail";

    fn id(&self) -> ContactDetailId {
        self.id
    }

    fn changes(&self) -> Changes {
        Changes::new()
            .set("detail_type", self.detail_type)
            .set("value", self.value.as_str())
    }
}

#[derive(Deserialize, Debug, Clone, Validate, ToSchema)]
pub struct CreateContactDetailDto {
    /// `email` or `phone`, case-insensitive.
    #[serde(rename = "type")]
    #[schema(example = "email")]
    pub detail_type: String,
    #[validate(custom(function = "not_blank"))]
    #[schema(example = "ada@example.com")]
    pub value: String,
}

/// Partial update; absent fields are left untouched.
#[derive(Deserialize, Debug, Clone, Default, Validate, ToSchema)]
pub struct UpdateContactDetailDto {
    #[serde(rename = "type")]
    pub detail_type: Option<String>,
    #[validate(custom(function = "not_blank"))]
    pub value: Option<String>,
}

#[derive(Deserialize, Debug, Clone, Default, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DetailFilterParams {
    /// Exact detail type.
    #[serde(default, rename = "type", deserialize_with = "deserialize_optional_trimmed")]
    pub detail_type: Option<String>,
    /// Substring of the value.
    #[serde(default, deserialize_with = "deserialize_optional_trimmed")]
    pub value: Option<String>,
}

impl DetailFilterParams {
    pub fn to_filters(&self) -> Result<Vec<Filter>, AppError> {
        let mut filters = Vec::new();
        if let Some(t) = &self.detail_type {
            filters.push(Filter::eq("detail_type", DetailType::parse_field(t)?));
        }
        if let Some(v) = &self.value {
            filters.push(Filter::contains("value", v.as_str()));
        }
        Ok(filters)
    }
}
