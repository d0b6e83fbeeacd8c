use anyhow::anyhow;
use rolodex_core::AppError;

/// Wraps a persistence error into the application error taxonomy.
///
/// - unique violation: conflict (409), context = violated constraint
/// - check violation: validation (422)
/// - foreign key violation: bad request (400)
/// - anything else: internal (500)
pub fn map_db_error(err: sqlx::Error, entity: &'static str) -> AppError {
    if let sqlx::Error::Database(db_err) = &err {
        let constraint = db_err.constraint().unwrap_or(entity).to_string();

        if db_err.is_unique_violation() {
            return AppError::conflict(anyhow!("{} already exists", capitalize(entity)))
                .with_context(constraint);
        }
        if db_err.is_check_violation() {
            return AppError::unprocessable(anyhow!("Invalid value for {}", entity))
                .with_context(constraint);
        }
        if db_err.is_foreign_key_violation() {
            return AppError::bad_request(anyhow!("Referenced record does not exist"))
                .with_context(constraint);
        }
    }

    AppError::internal(err).with_context(entity)
}

pub(crate) fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
