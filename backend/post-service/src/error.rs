//! Error types for Post Service
//!
//! `PostError` is the closed set of failures the persistence core can report.
//! `ServiceError` adds the name of the operation that failed and is what
//! handlers return; it converts into an HTTP response by error kind.
use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

/// Result type for service-level operations
pub type Result<T> = std::result::Result<T, ServiceError>;

/// Coarse failure category shared by every layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidArgument,
    NotFound,
    Storage,
    Canceled,
}

impl ErrorKind {
    /// Label used for metrics and structured logs
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InvalidArgument => "invalid_argument",
            ErrorKind::NotFound => "not_found",
            ErrorKind::Storage => "storage",
            ErrorKind::Canceled => "canceled",
        }
    }
}

/// Failures reported by the query builder and the store gateway
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PostError {
    /// Missing identifier, bad pagination, unknown sort column, invalid fields
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The target row does not exist
    #[error("not found: {0}")]
    NotFound(String),

    /// Driver, connection or row decoding failure. Carries only the
    /// operation label; the driver message is logged where it happens.
    #[error("storage failure during {0}")]
    Storage(&'static str),

    /// Caller cancellation or deadline expiry
    #[error("operation canceled: {0}")]
    Canceled(&'static str),
}

impl PostError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PostError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            PostError::NotFound(_) => ErrorKind::NotFound,
            PostError::Storage(_) => ErrorKind::Storage,
            PostError::Canceled(_) => ErrorKind::Canceled,
        }
    }

    pub fn invalid(msg: impl Into<String>) -> Self {
        PostError::InvalidArgument(msg.into())
    }
}

impl From<validator::ValidationErrors> for PostError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<String> = errors
            .field_errors()
            .into_iter()
            .map(|(field, errs)| {
                let reasons: Vec<String> = errs
                    .iter()
                    .map(|e| {
                        e.message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| e.code.to_string())
                    })
                    .collect();
                format!("{}: {}", field, reasons.join(", "))
            })
            .collect();
        fields.sort();
        PostError::InvalidArgument(fields.join("; "))
    }
}

/// JSON body of every error response
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub status: u16,
}

/// A core failure annotated with the operation that produced it
#[derive(Error, Debug)]
#[error("{op}: {source}")]
pub struct ServiceError {
    pub op: &'static str,
    pub source: PostError,
}

impl ServiceError {
    pub fn new(op: &'static str, source: PostError) -> Self {
        Self { op, source }
    }

    pub fn kind(&self) -> ErrorKind {
        self.source.kind()
    }
}

impl ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        match self.kind() {
            ErrorKind::InvalidArgument => StatusCode::BAD_REQUEST,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Storage | ErrorKind::Canceled => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(op = self.op, error = %self.source, "request failed");
        } else {
            tracing::debug!(op = self.op, error = %self.source, "request rejected");
        }

        HttpResponse::build(status).json(ErrorResponse {
            error: self.to_string(),
            status: status.as_u16(),
        })
    }
}
