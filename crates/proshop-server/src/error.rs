use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use std::fmt;

use crate::metrics::ERROR_RESPONSES;

#[derive(Debug)]
pub enum ServerError {
    /// Cross-origin request from an origin outside the allow-list
    OriginDenied(String),
    /// No route matched the path
    NotFound(String),
    /// Body could not be parsed
    BadRequest(String),
    /// Missing or wrong bearer token
    Unauthorized,
    /// Route prefix reserved for a collaborator that is not attached
    NotImplemented(String),
    /// Internal error
    Internal(String),
    /// A route handler panicked. `detail` is the panic message; it is only
    /// rendered when `expose` is set (development).
    Panicked { detail: String, expose: bool },
}

impl fmt::Display for ServerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServerError::OriginDenied(origin) => write!(f, "origin not allowed: {}", origin),
            ServerError::NotFound(path) => write!(f, "Not Found - {}", path),
            ServerError::BadRequest(msg) => write!(f, "bad request: {}", msg),
            ServerError::Unauthorized => write!(f, "unauthorized"),
            ServerError::NotImplemented(module) => {
                write!(f, "{} routes are not attached to this server", module)
            }
            ServerError::Internal(msg) => write!(f, "internal error: {}", msg),
            ServerError::Panicked { detail, .. } => write!(f, "handler panicked: {}", detail),
        }
    }
}

impl std::error::Error for ServerError {}

impl ServerError {
    /// Machine-readable error code used in JSON bodies and metrics.
    pub fn code(&self) -> &'static str {
        match self {
            ServerError::OriginDenied(_) => "origin_not_allowed",
            ServerError::NotFound(_) => "not_found",
            ServerError::BadRequest(_) => "bad_request",
            ServerError::Unauthorized => "unauthorized",
            ServerError::NotImplemented(_) => "not_implemented",
            ServerError::Internal(_) | ServerError::Panicked { .. } => "internal_error",
        }
    }

    /// JSON body without debug detail. Internal failures get a generic
    /// message; the detail only goes to the log.
    pub fn body(&self) -> serde_json::Value {
        let message = match self {
            ServerError::OriginDenied(origin) => {
                format!("Origin '{}' is not allowed to access this API", origin)
            }
            ServerError::Unauthorized => "Valid Bearer token required".to_string(),
            ServerError::Internal(_) | ServerError::Panicked { .. } => {
                "An internal error occurred".to_string()
            }
            other => other.to_string(),
        };
        serde_json::json!({
            "error": self.code(),
            "message": message
        })
    }
}

impl ResponseError for ServerError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServerError::OriginDenied(_) => StatusCode::FORBIDDEN,
            ServerError::NotFound(_) => StatusCode::NOT_FOUND,
            ServerError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::Unauthorized => StatusCode::UNAUTHORIZED,
            ServerError::NotImplemented(_) => StatusCode::NOT_IMPLEMENTED,
            ServerError::Internal(_) | ServerError::Panicked { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let ServerError::Internal(msg) = self {
            tracing::error!("Internal error: {}", msg);
        }
        ERROR_RESPONSES.with_label_values(&[self.code()]).inc();

        let mut body = self.body();
        if let ServerError::Panicked { detail, expose: true } = self {
            body["stack"] = serde_json::json!(detail);
        }
        HttpResponse::build(self.status_code()).json(body)
    }
}
