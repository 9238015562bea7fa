use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use std::borrow::Cow;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Bad Request: {0}")]
    BadRequest(Cow<'static, str>),
    #[error("Unauthorized: {0}")]
    Unauthorized(Cow<'static, str>),
    #[error("Not Found: {0}")]
    NotFound(Cow<'static, str>),
    #[error("Internal Server Error")]
    InternalServer,
}

#[derive(serde::Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub error: Cow<'static, str>,
}

impl Error {
    pub fn bad_request(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn unauthorized(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::Unauthorized(msg.into())
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match *self {
            Error::BadRequest(_) => StatusCode::BAD_REQUEST,
            Error::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::InternalServer => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut res = HttpResponse::build(self.status_code());

        match self {
            Error::NotFound(msg) | Error::Unauthorized(msg) | Error::BadRequest(msg) => {
                res.json(ErrorBody { success: false, error: msg.clone() })
            }
            Error::InternalServer => {
                res.json(ErrorBody { success: false, error: "Internal Server Error".into() })
            }
        }
    }
}

/// Internal failure taxonomy. Converted into a request-facing [`Error`] at the
/// handler boundary; anything without a client-safe mapping becomes a logged 500.
#[derive(thiserror::Error, Debug)]
pub enum SystemError {
    // session token errors
    #[error("JWT Error")]
    JwtError(#[from] jsonwebtoken::errors::Error),
    // argon2 errors
    #[error("Hash Error")]
    HashError(#[from] argon2::password_hash::Error),
    // sqlx errors
    #[error("Database Error: {0}")]
    DatabaseError(Cow<'static, str>),
    #[error("Record store unavailable")]
    StoreUnavailable,
    // filesystem errors
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),
    // upload pipeline errors
    #[error("Unsupported media type: {0}")]
    UnsupportedMediaType(Cow<'static, str>),
    #[error("Invalid image data: {0}")]
    InvalidImageData(Cow<'static, str>),
    #[error("Bulk delete incomplete: {deleted} deleted, {failed} failed")]
    BulkDeleteIncomplete { deleted: usize, failed: usize },
    // Custom Errors
    #[error("Bad Request: {0}")]
    BadRequest(Cow<'static, str>),
    #[error("Unauthorized: {0}")]
    Unauthorized(Cow<'static, str>),
    #[error("Not Found: {0}")]
    NotFound(Cow<'static, str>),
}

impl From<SystemError> for Error {
    fn from(value: SystemError) -> Self {
        match value {
            SystemError::BadRequest(msg) => Error::BadRequest(msg),
            SystemError::Unauthorized(msg) => Error::Unauthorized(msg),
            SystemError::NotFound(msg) => Error::NotFound(msg),
            SystemError::UnsupportedMediaType(msg) => {
                Error::BadRequest(format!("Unsupported media type: {msg}").into())
            }
            SystemError::InvalidImageData(msg) => {
                Error::BadRequest(format!("Invalid image data: {msg}").into())
            }
            _ => {
                log::error!("Internal Server Error: {:?}", value);
                Error::InternalServer
            }
        }
    }
}

impl From<sqlx::Error> for SystemError {
    fn from(err: sqlx::Error) -> Self {
        log::error!("{:?}", err);
        match &err {
            sqlx::Error::Database(db_err) => {
                SystemError::DatabaseError(db_err.message().to_string().into())
            }
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                SystemError::StoreUnavailable
            }
            _ => SystemError::DatabaseError(err.to_string().into()),
        }
    }
}

impl SystemError {
    pub fn bad_request(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn not_found(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn unauthorized(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::Unauthorized(msg.into())
    }

    pub fn unsupported_media_type(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::UnsupportedMediaType(msg.into())
    }

    pub fn invalid_image_data(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::InvalidImageData(msg.into())
    }
}
