use common_errors::AppError;
use redis_connection::{PoolError, RedisError};
use sql_connection::{PgError, PoolError as DbPoolError};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum ListError {
    #[error("List not found: {list_id}")]
    NotFound { list_id: Uuid },
    #[error("Invalid list id: {value}")]
    InvalidId { value: String },
    #[error("Invalid text pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
    #[error("Text must be a string, number or boolean")]
    UnsupportedText,
    #[error("Database error: {0}")]
    Database(#[from] PgError),
    #[error("Database Pool error: {0}")]
    DatabasePool(#[from] DbPoolError),
    #[error("Redis error: {0}")]
    Redis(#[from] RedisError),
    #[error("Redis Pool error: {0}")]
    RedisPool(#[from] PoolError),
}

impl ListError {
    /// Parses a client supplied id, keeping the raw value for the error.
    pub fn parse_id(value: &str) -> Result<Uuid, Self> {
        value.parse::<Uuid>().map_err(|_| {
            Self::InvalidId {
                value: value.to_string(),
            }
        })
    }
}

impl From<ListError> for AppError {
    fn from(err: ListError) -> Self {
        match err {
            ListError::NotFound { list_id } => {
                AppError::not_found(
                    "LIST_NOT_FOUND",
                    &format!("List with ID {list_id} not found"),
                )
            }
            ListError::InvalidId { value } => {
                AppError::bad_request_with_details(
                    "INVALID_ID",
                    "Invalid list ID format provided",
                    &value,
                )
            }
            ListError::InvalidPattern(regex_err) => {
                AppError::bad_request_with_details(
                    "INVALID_PATTERN",
                    "Invalid text search pattern",
                    &regex_err.to_string(),
                )
            }
            ListError::UnsupportedText => {
                AppError::bad_request(
                    "INVALID_TEXT",
                    "Text must be a string, number or boolean",
                )
            }
            ListError::Database(db_err) => {
                AppError::internal_server_error(&format!(
                    "Database error: {db_err}"
                ))
            }
            ListError::DatabasePool(pool_err) => {
                AppError::internal_server_error(&format!(
                    "Database connection error: {pool_err}"
                ))
            }
            ListError::Redis(redis_err) => {
                AppError::internal_server_error(&format!(
                    "Document store error: {redis_err}"
                ))
            }
            ListError::RedisPool(pool_err) => {
                AppError::internal_server_error(&format!(
                    "Document store connection error: {pool_err}"
                ))
            }
        }
    }
}
