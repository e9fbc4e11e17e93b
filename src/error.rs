use axum::{
    extract::rejection::{FormRejection, JsonRejection, PathRejection, QueryRejection},
    http::{header, StatusCode},
    response::{IntoResponse, Json},
};
use serde_json::{json, Value as JsonValue};

pub type Result<T> = std::result::Result<T, Error>;

const HTTP_ERROR: &str = "HTTP_ERROR";
const BUSINESS_ERROR: &str = "BUSINESS_ERROR";
const SERVER_ERROR: &str = "SERVER_ERROR";

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unprocessable entity: {0}")]
    Unprocessable(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Invalid status transition: {0}")]
    InvalidTransition(String),

    #[error("Inactive user account")]
    InactiveUser,

    #[error("Rate limit exceeded: {limit} requests per {window_seconds}s")]
    RateLimited { limit: u32, window_seconds: u64 },

    #[error("Database error: {0}")]
    Database(sqlx::Error),

    #[error("Migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("Password hash error: {0}")]
    PasswordHash(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    pub fn not_found(entity: &str) -> Self {
        Error::NotFound(format!("{} not found", entity))
    }

    fn status_and_body(&self) -> (StatusCode, JsonValue, &'static str) {
        match self {
            Error::BadRequest(msg) => (StatusCode::BAD_REQUEST, json!(msg), HTTP_ERROR),
            Error::Json(err) => (StatusCode::BAD_REQUEST, json!(err.to_string()), HTTP_ERROR),
            Error::Validation(err) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                json!(err.to_string()),
                HTTP_ERROR,
            ),
            Error::Unprocessable(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                json!(msg),
                HTTP_ERROR,
            ),
            Error::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, json!(msg), HTTP_ERROR),
            Error::Token(_) => (
                StatusCode::UNAUTHORIZED,
                json!("Could not validate credentials"),
                HTTP_ERROR,
            ),
            Error::Forbidden(msg) => (StatusCode::FORBIDDEN, json!(msg), HTTP_ERROR),
            Error::NotFound(msg) => (StatusCode::NOT_FOUND, json!(msg), HTTP_ERROR),
            Error::RateLimited {
                limit,
                window_seconds,
            } => (
                StatusCode::TOO_MANY_REQUESTS,
                json!({
                    "error": "Rate limit exceeded",
                    "limit": limit,
                    "window_seconds": window_seconds,
                    "message": "Please try again later.",
                }),
                HTTP_ERROR,
            ),
            Error::Conflict(msg) => (StatusCode::CONFLICT, json!(msg), BUSINESS_ERROR),
            Error::InvalidTransition(msg) => (StatusCode::CONFLICT, json!(msg), BUSINESS_ERROR),
            Error::InactiveUser => (
                StatusCode::BAD_REQUEST,
                json!("Inactive user account"),
                BUSINESS_ERROR,
            ),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!("An internal server error occurred."),
                SERVER_ERROR,
            ),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        let (status, detail, error_code) = self.status_and_body();
        if status.is_server_error() {
            tracing::error!(error = ?self, "Unhandled error while serving request");
        }

        let body = Json(json!({ "detail": detail, "error_code": error_code }));
        if status == StatusCode::UNAUTHORIZED {
            return (status, [(header::WWW_AUTHENTICATE, "Bearer")], body).into_response();
        }
        (status, body).into_response()
    }
}

impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => Error::NotFound("Resource not found".to_string()),
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                Error::Conflict(format!(
                    "Duplicate value violates {}",
                    db.constraint().unwrap_or("a unique constraint")
                ))
            }
            other => Error::Database(other),
        }
    }
}

/// Extractor rejections keep axum's status class but use the crate's body.
fn rejected(status: StatusCode, text: String) -> Error {
    if status == StatusCode::UNPROCESSABLE_ENTITY {
        Error::Unprocessable(text)
    } else if status.is_server_error() {
        Error::Internal(text)
    } else {
        Error::BadRequest(text)
    }
}

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        rejected(rejection.status(), rejection.body_text())
    }
}

impl From<FormRejection> for Error {
    fn from(rejection: FormRejection) -> Self {
        rejected(rejection.status(), rejection.body_text())
    }
}

impl From<QueryRejection> for Error {
    fn from(rejection: QueryRejection) -> Self {
        rejected(rejection.status(), rejection.body_text())
    }
}

impl From<PathRejection> for Error {
    fn from(rejection: PathRejection) -> Self {
        rejected(rejection.status(), rejection.body_text())
    }
}

impl From<argon2::password_hash::Error> for Error {
    fn from(err: argon2::password_hash::Error) -> Self {
        Error::PasswordHash(err.to_string())
    }
}
