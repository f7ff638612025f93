pub mod comment;
pub mod product;
pub mod user;
pub mod vote;

use thiserror::Error;

// Store-level failure taxonomy. Unique and foreign-key violations are
// split out because callers react to them (slug retry, vote conflict,
// vanished product); everything else propagates as a generic failure
// for the route boundary to turn into a 500.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record not found")]
    NotFound,
    #[error("duplicate record")]
    Duplicate,
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl StoreError {
    pub(crate) fn from_write(err: sqlx::Error) -> Self {
        if let Some(db_err) = err.as_database_error() {
            if db_err.is_unique_violation() {
                return StoreError::Duplicate;
            }
            if db_err.is_foreign_key_violation() {
                return StoreError::NotFound;
            }
        }
        StoreError::Database(err)
    }
}
