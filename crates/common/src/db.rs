//! Shared database helpers for Laminas
//!
//! Classifies driver errors so repositories can surface domain errors
//! instead of opaque database failures.

use crate::error::Error;

/// Returns true when the error is a unique-constraint violation
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}

/// Returns true when the error is a foreign-key violation
pub fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_foreign_key_violation())
}

/// Postgres SQLSTATE for `numeric_value_out_of_range`
const NUMERIC_VALUE_OUT_OF_RANGE: &str = "22003";

/// Returns true when an arithmetic result overflowed its column type
pub fn is_numeric_overflow(err: &sqlx::Error) -> bool {
    matches!(
        err,
        sqlx::Error::Database(db) if db.code().as_deref() == Some(NUMERIC_VALUE_OUT_OF_RANGE)
    )
}

/// Map a write error, turning constraint violations into domain errors.
///
/// `on_duplicate` and `on_missing_parent` build the messages for unique and
/// foreign-key violations respectively; anything else stays a database error.
pub fn map_write_error(
    err: sqlx::Error,
    on_duplicate: impl FnOnce() -> String,
    on_missing_parent: impl FnOnce() -> String,
) -> Error {
    if is_unique_violation(&err) {
        Error::DuplicateNumber(on_duplicate())
    } else if is_foreign_key_violation(&err) {
        Error::NotFound(on_missing_parent())
    } else {
        Error::Database(err)
    }
}
