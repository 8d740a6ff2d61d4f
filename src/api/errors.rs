use crate::db::RepositoryError;
use crate::validators::FieldErrors;
use actix_web::error::{BlockingError, JsonPayloadError};
use actix_web::http::StatusCode;
use actix_web::{Error, HttpRequest, HttpResponse, ResponseError};
use serde::Serialize;
use serde_json::{json, Value};
use utoipa::ToSchema;

pub const INVALID_REQUEST: &str = "Invalid request data";
pub const NO_TOKEN: &str = "No token provided";
pub const UNAUTHORIZED: &str = "Unauthorized";
pub const TOKEN_EXPIRED: &str = "Token has expired";
pub const INVALID_CREDENTIALS: &str = "Invalid email or password";
pub const FORBIDDEN: &str = "Forbidden";
pub const INTERNAL: &str = "Something went wrong";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid request data")]
    Validation(FieldErrors),
    #[error("No token provided")]
    MissingToken,
    #[error("Unauthorized")]
    Unauthenticated,
    #[error("Token has expired")]
    TokenExpired,
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("Forbidden")]
    Forbidden,
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    /// Detail is logged, never sent.
    #[error("Something went wrong")]
    Internal(String),
}

/// Body of every error response.
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub status: String,
    pub message: String,
    #[schema(value_type = Object)]
    pub error: Value,
}

impl ApiError {
    fn details(&self) -> Value {
        match self {
            ApiError::Validation(fields) => json!(fields),
            ApiError::MissingToken => json!({ "token": NO_TOKEN }),
            other => json!({ "message": other.to_string() }),
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::MissingToken
            | ApiError::Unauthenticated
            | ApiError::TokenExpired
            | ApiError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            status: "error".to_string(),
            message: self.to_string(),
            error: self.details(),
        })
    }
}

impl From<FieldErrors> for ApiError {
    fn from(errors: FieldErrors) -> Self {
        ApiError::Validation(errors)
    }
}

impl From<RepositoryError> for ApiError {
    fn from(e: RepositoryError) -> Self {
        match e {
            RepositoryError::NotFound(msg) => ApiError::NotFound(msg),
            RepositoryError::Conflict(msg) => ApiError::Conflict(msg),
            RepositoryError::Forbidden(detail) => {
                debug!("API: forbidden: {}", detail);
                ApiError::Forbidden
            }
            RepositoryError::InvalidReference { field, message } => {
                ApiError::Validation(FieldErrors::single(field, message))
            }
            other => {
                error!("API: internal error: {}", other);
                ApiError::Internal(other.to_string())
            }
        }
    }
}

impl From<BlockingError> for ApiError {
    fn from(e: BlockingError) -> Self {
        error!("API: blocking pool error: {}", e);
        ApiError::Internal(e.to_string())
    }
}

pub(crate) fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> Error {
    debug!("Invalid JSON body on {}: {}", req.full_url(), err);
    let message = match &err {
        JsonPayloadError::ContentType => "Content type must be application/json".to_string(),
        JsonPayloadError::Deserialize(e) if !e.is_syntax() && !e.is_eof() => e.to_string(),
        _ => "Request body must be valid JSON".to_string(),
    };
    ApiError::Validation(FieldErrors::single("body", message)).into()
}
