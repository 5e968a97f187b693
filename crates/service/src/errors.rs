use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("not found: {0}")]
    NotFound(String),
    /// Unique or foreign-key constraint rejected the write.
    #[error("constraint violation: {0}")]
    Constraint(String),
    /// The store could not be reached or the pool had no free connection.
    #[error("database unavailable: {0}")]
    Unavailable(String),
    #[error("database error: {0}")]
    Db(String),
    #[error("model error: {0}")]
    Model(#[from] models::errors::ModelError),
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self { Self::NotFound(format!("{} not found", entity)) }

    /// Failures caused by the store rather than by the request.
    pub fn is_store_failure(&self) -> bool {
        matches!(self, Self::Constraint(_) | Self::Unavailable(_) | Self::Db(_))
    }
}

impl From<DbErr> for ServiceError {
    fn from(e: DbErr) -> Self {
        match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(msg)) => return Self::Constraint(msg),
            Some(SqlErr::ForeignKeyConstraintViolation(msg)) => return Self::Constraint(msg),
            _ => {}
        }
        // SQLite reports a RESTRICT hit as a trigger constraint, which
        // `sql_err` does not classify.
        if e.to_string().contains("FOREIGN KEY constraint failed") {
            return Self::Constraint(e.to_string());
        }
        match e {
            DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => Self::Unavailable(e.to_string()),
            DbErr::RecordNotFound(msg) => Self::NotFound(msg),
            other => Self::Db(other.to_string()),
        }
    }
}
