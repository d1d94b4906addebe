use actix_web::{
    body::BoxBody,
    error::BlockingError,
    http::{
        self,
        header::{self, HeaderValue},
    },
    HttpResponse, ResponseError,
};
use derive_more::Display;
use diesel::result::Error as DBError;
use jsonwebtoken::errors::ErrorKind;
use serde_json::json;
use std::convert::From;

#[derive(Debug)]
pub enum AuthError {
    /// No usable identity, or the identity lacks the required role
    AuthenticationFailed,
    /// Current password did not match on a password change
    PasswordChangeRejected,

    Claims(serde_json::Error),
    ///Token is invalid
    InvalidToken,
    NoAuthorizationHeader,
    InvalidAuthorizationHeader,
    TokenExpired,
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed => write!(f, "Authentication Failed"),
            Self::PasswordChangeRejected => write!(f, "Error on password change"),
            Self::InvalidAuthorizationHeader => {
                write!(f, "Authorization header is not in valid format")
            }
            Self::NoAuthorizationHeader => write!(f, "No Authorization Header"),
            Self::Claims(e) => write!(f, "Error while Deserializing JWT: {}", e),
            Self::InvalidToken => write!(f, "Invalid JWT Token"),
            Self::TokenExpired => write!(f, "Token Expired"),
        }
    }
}

#[derive(Debug, Display)]
pub enum TodoApiError {
    #[display(fmt = "Internal Server Error")]
    InternalServerError,

    #[display(fmt = "Validation Error: {}", _0)]
    Validation(String),

    #[display(fmt = "Database Connection Error")]
    DatabaseConnectionError,

    #[display(fmt = "{}", _0)]
    AuthError(AuthError),

    #[display(fmt = "{} not found.", _0)]
    NotFound(String),
}

impl TodoApiError {
    pub fn authentication_failed() -> Self {
        TodoApiError::AuthError(AuthError::AuthenticationFailed)
    }
}

impl ResponseError for TodoApiError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        match self {
            TodoApiError::InternalServerError => http::StatusCode::INTERNAL_SERVER_ERROR,
            TodoApiError::AuthError(_) => http::StatusCode::UNAUTHORIZED,
            TodoApiError::Validation(_) => http::StatusCode::UNPROCESSABLE_ENTITY,
            TodoApiError::NotFound(_) => http::StatusCode::NOT_FOUND,
            TodoApiError::DatabaseConnectionError => http::StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse<BoxBody> {
        let mut res = HttpResponse::new(self.status_code());

        res.headers_mut().append(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );

        res.set_body(BoxBody::new(json!({"error": self.to_string()}).to_string()))
    }
}

impl From<jsonwebtoken::errors::Error> for AuthError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.into_kind() {
            ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            _ => AuthError::InvalidToken,
        }
    }
}

impl From<r2d2::Error> for TodoApiError {
    fn from(err: r2d2::Error) -> Self {
        log::error!("Database pool error: {}", err);
        TodoApiError::DatabaseConnectionError
    }
}

impl From<BlockingError> for TodoApiError {
    fn from(_: BlockingError) -> Self {
        log::error!("Blocking task was cancelled or panicked");
        TodoApiError::InternalServerError
    }
}

impl From<DBError> for TodoApiError {
    fn from(error: DBError) -> Self {
        log::error!("Db error: {}", error);

        TodoApiError::InternalServerError
    }
}
