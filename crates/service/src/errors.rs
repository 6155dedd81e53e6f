use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("database error: {0}")]
    Db(String),
    #[error("password hashing failed: {0}")]
    Hash(String),
    #[error("model error: {0}")]
    Model(#[from] models::errors::ModelError),
}

impl ServiceError {
    pub fn not_found(entity: impl std::fmt::Display) -> Self { Self::NotFound(format!("{} not found", entity)) }
}

/// Store constraint violations are the authoritative integrity guard, so they
/// surface as `Conflict` rather than a generic database failure.
impl From<DbErr> for ServiceError {
    fn from(e: DbErr) -> Self {
        match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(msg)) => Self::Conflict(format!("duplicate value ({msg})")),
            Some(SqlErr::ForeignKeyConstraintViolation(msg)) => Self::Conflict(format!("referenced record constraint ({msg})")),
            // RESTRICT-style failures (SQLITE_CONSTRAINT_TRIGGER) are not classified by sqlx
            _ if is_foreign_key_failure(&e) => Self::Conflict("referenced record constraint (FOREIGN KEY constraint failed)".into()),
            _ => Self::Db(e.to_string()),
        }
    }
}

fn is_foreign_key_failure(e: &DbErr) -> bool {
    e.to_string().contains("FOREIGN KEY constraint failed")
}
