use std::borrow::Cow;

use rolodex_core::AppError;
use validator::ValidationError;

/// Rejects strings that are empty once surrounding whitespace is removed.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message(Cow::Borrowed("must not be blank")));
    }
    Ok(())
}

/// Trims a required text field, failing with a field-scoped validation error
/// when nothing is left.
pub fn required_text(field: &'static str, value: &str) -> Result<String, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation(
            field,
            format!("{} cannot be empty", humanize(field)),
        ));
    }
    Ok(trimmed.to_string())
}

/// Same as [`required_text`] for a field that may be absent from a partial update.
pub fn optional_text(field: &'static str, value: Option<&str>) -> Result<Option<String>, AppError> {
    value.map(|v| required_text(field, v)).transpose()
}

/// Lower-cases and trims an email address.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn humanize(field: &str) -> String {
    let spaced = field.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_blank() {
        assert!(not_blank("Ada").is_ok());
        assert!(not_blank("").is_err());
        assert!(not_blank(" \t\n").is_err());
    }

    #[test]
    fn test_required_text_trims() {
        assert_eq!(required_text("first_name", "  Ada ").unwrap(), "Ada");
    }

    #[test]
    fn test_required_text_rejects_whitespace() {
        let err = required_text("last_name", "   ").unwrap_err();
        assert_eq!(err.status.as_u16(), 422);
        assert_eq!(err.context, "last_name");
        assert_eq!(err.error.to_string(), "Last name cannot be empty");
    }

    #[test]
    fn test_optional_text() {
        assert_eq!(optional_text("first_name", None).unwrap(), None);
        assert_eq!(
            optional_text("first_name", Some(" Bo ")).unwrap().as_deref(),
            Some("Bo")
        );
        assert!(optional_text("first_name", Some("")).is_err());
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  Ada@Example.COM "), "ada@example.com");
    }
}
