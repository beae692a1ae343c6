// src/error.rs
//! Application error types with structured error handling.
//!
//! Two layers of failure live here. [`FetchError`] describes a single remote
//! call that went wrong; the crawler recovers from those locally, either by
//! recording an inline error marker for the node or by ending one listing
//! early. [`AppError`] describes failures the run cannot recover from:
//! bad configuration, an unwritable output file, a corrupt state file.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Notion API error codes as a typed vocabulary.
///
/// Instead of matching against magic strings like `"rate_limited"`,
/// the domain vocabulary is encoded in the type system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotionErrorCode {
    /// API rate limit exceeded
    RateLimited,
    /// The requested object does not exist or is not shared with the integration
    ObjectNotFound,
    /// API key is invalid or expired
    Unauthorized,
    /// API key lacks permission for this resource
    RestrictedResource,
    /// Request body contains invalid JSON
    InvalidJson,
    /// Request parameters failed Notion's validation
    ValidationFailed,
    /// Conflict with current state of the resource
    Conflict,
    /// Notion internal server error
    InternalError,
    /// Notion is temporarily unavailable
    ServiceUnavailable,
    /// HTTP status code fallback when the error body is unparseable
    HttpStatus(u16),
    /// An error code this client doesn't recognize yet
    Unknown(String),
}

impl NotionErrorCode {
    /// Parse a Notion API error code string into the typed vocabulary.
    pub fn from_api_response(code: &str) -> Self {
        match code {
            "rate_limited" => Self::RateLimited,
            "object_not_found" => Self::ObjectNotFound,
            "unauthorized" => Self::Unauthorized,
            "restricted_resource" => Self::RestrictedResource,
            "invalid_json" => Self::InvalidJson,
            "validation_error" => Self::ValidationFailed,
            "conflict_error" => Self::Conflict,
            "internal_server_error" => Self::InternalError,
            "service_unavailable" => Self::ServiceUnavailable,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// Create from an HTTP status code when the error body is unparseable.
    pub fn from_http_status(status: u16) -> Self {
        match status {
            404 => Self::ObjectNotFound,
            401 => Self::Unauthorized,
            403 => Self::RestrictedResource,
            429 => Self::RateLimited,
            500 => Self::InternalError,
            503 => Self::ServiceUnavailable,
            other => Self::HttpStatus(other),
        }
    }
}

impl fmt::Display for NotionErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RateLimited => write!(f, "rate_limited"),
            Self::ObjectNotFound => write!(f, "object_not_found"),
            Self::Unauthorized => write!(f, "unauthorized"),
            Self::RestrictedResource => write!(f, "restricted_resource"),
            Self::InvalidJson => write!(f, "invalid_json"),
            Self::ValidationFailed => write!(f, "validation_error"),
            Self::Conflict => write!(f, "conflict_error"),
            Self::InternalError => write!(f, "internal_server_error"),
            Self::ServiceUnavailable => write!(f, "service_unavailable"),
            Self::HttpStatus(code) => write!(f, "http_{}", code),
            Self::Unknown(code) => write!(f, "{}", code),
        }
    }
}

/// How far the damage of a failed remote call reaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// The node itself cannot be read (missing, invalid, forbidden).
    /// Recorded inline and the node counts as processed.
    PermanentNode,
    /// The service or the connection failed (rate limit, 5xx, transport).
    /// Inside a listing this truncates the listing for this run.
    TransientListing,
}

/// A single failed call against the Notion API.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FetchError {
    #[error("object not found: {message}")]
    NotFound { message: String },

    #[error("validation error: {message}")]
    Validation { message: String },

    #[error("unauthorized: {message}")]
    Unauthorized { message: String },

    #[error("restricted resource: {message}")]
    RestrictedResource { message: String },

    #[error("rate limited{}", retry_hint(.retry_after_seconds))]
    RateLimited { retry_after_seconds: Option<u64> },

    #[error("server error ({status} {code}): {message}")]
    Server {
        status: u16,
        code: NotionErrorCode,
        message: String,
    },

    #[error("API error ({status} {code}): {message}")]
    Api {
        status: u16,
        code: NotionErrorCode,
        message: String,
    },

    #[error("transport error: {message}")]
    Transport { message: String },

    #[error("malformed response: {reason}")]
    MalformedResponse { reason: String },
}

fn retry_hint(retry_after_seconds: &Option<u64>) -> String {
    match retry_after_seconds {
        Some(seconds) => format!(" (retry after {}s)", seconds),
        None => String::new(),
    }
}

impl FetchError {
    /// Builds the error for a non-success API response.
    pub fn from_api(status: u16, code: NotionErrorCode, message: impl Into<String>) -> Self {
        let message = message.into();
        match code {
            NotionErrorCode::ObjectNotFound => Self::NotFound { message },
            NotionErrorCode::ValidationFailed => Self::Validation { message },
            NotionErrorCode::Unauthorized => Self::Unauthorized { message },
            NotionErrorCode::RestrictedResource => Self::RestrictedResource { message },
            NotionErrorCode::RateLimited => Self::RateLimited {
                retry_after_seconds: None,
            },
            code if status >= 500 => Self::Server {
                status,
                code,
                message,
            },
            NotionErrorCode::InternalError | NotionErrorCode::ServiceUnavailable => Self::Server {
                status,
                code,
                message,
            },
            code => Self::Api {
                status,
                code,
                message,
            },
        }
    }

    /// Whether this failure hints that the id names a different kind of node.
    ///
    /// A database lookup that answers "not found" or "validation error" is
    /// what Notion returns when the id is really a page.
    pub fn suggests_other_kind(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::Validation { .. })
    }

    /// Whether the message identifies a linked database view.
    pub fn is_linked_database(&self) -> bool {
        match self {
            Self::Validation { message } | Self::Api { message, .. } => {
                message.to_lowercase().contains("linked database")
            }
            _ => false,
        }
    }

    pub fn class(&self) -> ErrorClass {
        match self {
            Self::NotFound { .. }
            | Self::Validation { .. }
            | Self::Unauthorized { .. }
            | Self::RestrictedResource { .. } => ErrorClass::PermanentNode,
            Self::Api { status, .. } if *status < 500 => ErrorClass::PermanentNode,
            Self::Api { .. }
            | Self::RateLimited { .. }
            | Self::Server { .. }
            | Self::Transport { .. }
            | Self::MalformedResponse { .. } => ErrorClass::TransientListing,
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::Transport {
            message: err.to_string(),
        }
    }
}

/// A property payload that did not match its declared type.
///
/// Never propagated: the crawler renders it inline next to the property name.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{type_name}: {reason}")]
pub struct PropertyParseError {
    pub type_name: String,
    pub reason: String,
}

/// Main application error type: everything that ends a run.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Missing configuration: {0}")]
    MissingConfiguration(String),

    #[error("Network failure: {0}")]
    NetworkFailure(#[from] reqwest::Error),

    #[error("Filesystem IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Could not write {path}: {source}")]
    OutputWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("State file {path} is not a JSON list of ids: {source}")]
    StateFileCorrupt {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Notion API request failed: {0}")]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    ValidationError(#[from] crate::types::ValidationError),
}
