//! Transport trait and error definitions for the Pwinty client
//!
//! The client never talks to the network directly. It builds an
//! [`ApiRequest`] and hands it to a [`Transport`]; the production transport
//! is [`HttpClient`](super::HttpClient), tests plug in their own.

use async_trait::async_trait;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

use crate::domain::FormParams;

// ============================================================================
// Error Types
// ============================================================================

/// Operation refused by the vendor with HTTP 403
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForbiddenAction {
    UpdateOrder,
    ChangeStatus,
    AddPhoto,
    RemovePhoto,
}

impl fmt::Display for ForbiddenAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ForbiddenAction::UpdateOrder => "Order submitted and can not be updated",
            ForbiddenAction::ChangeStatus => "Can not move to specified status from current",
            ForbiddenAction::AddPhoto => "Cannot add photos to this order",
            ForbiddenAction::RemovePhoto => "Cannot remove photos from this order",
        })
    }
}

/// Pwinty client error types
#[derive(Debug, Error)]
pub enum PwintyError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Authentication Failed")]
    AuthenticationFailed,

    #[error("The specified resource could not be found")]
    NotFound,

    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("{0}")]
    Forbidden(ForbiddenAction),

    #[error("{0}")]
    Validation(String),

    #[error("Unexpected response status {status}")]
    UnexpectedStatus { status: u16, body: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for client operations
pub type PwintyResult<T> = Result<T, PwintyError>;

// ============================================================================
// Request / Response
// ============================================================================

/// HTTP verbs used by the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// A file sent as the multipart `file` field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl FileUpload {
    /// Multipart field name the vendor reads uploads from
    pub const FIELD_NAME: &'static str = "file";

    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        FileUpload {
            file_name: file_name.into(),
            bytes,
        }
    }
}

/// A fully-resolved request handed to a [`Transport`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(&'static str, String)>,
    pub form: FormParams,
    pub file: Option<FileUpload>,
}

impl ApiRequest {
    /// Look up a header value by name (case-insensitive)
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Raw response returned by a [`Transport`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        ApiResponse {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decode the body as JSON
    ///
    /// A non-2xx status at this point has no mapping of its own and is
    /// reported as [`PwintyError::UnexpectedStatus`]. An empty success body
    /// decodes to `Value::Null`.
    pub fn into_json(self) -> PwintyResult<serde_json::Value> {
        if !self.is_success() {
            return Err(PwintyError::UnexpectedStatus {
                status: self.status,
                body: self.body,
            });
        }

        if self.body.trim().is_empty() {
            return Ok(serde_json::Value::Null);
        }

        serde_json::from_str(&self.body).map_err(|e| {
            PwintyError::Parse(format!(
                "JSON parse error: {} - Body: {}",
                e,
                truncate(&self.body, 500)
            ))
        })
    }
}

fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

// ============================================================================
// Transport Trait
// ============================================================================

/// Sends one request and returns the raw response
///
/// Implementations must not interpret status codes; that is the client's job.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> PwintyResult<ApiResponse>;
}
