use actix_web::http::StatusCode;
use actix_web::ResponseError;

use serde_urlencoded::ser::Error as QueryStringError;
use sqlx::Error as SqlxError;
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum Error {
    #[error("database error: {0}")]
    DatabaseError(#[from] SqlxError),

    #[error("query string error: {0}")]
    QueryStringError(#[from] QueryStringError),

    #[error("invalid configuration: {0}")]
    ConfigError(String),

    #[error("invalid {0}")]
    InvalidInput(String),

    #[error("{0} not found")]
    NotFound(String),
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Error::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
