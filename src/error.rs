//! Error types for fleetop

use serde_json::Value;
use thiserror::Error;

/// Result type alias for fleetop operations
pub type Result<T> = std::result::Result<T, Error>;

/// Status code used for failures that never produced an HTTP response.
pub const CLIENT_ERROR_CODE: u16 = 0;

/// Top-level error type for the application
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Request(#[from] RequestError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Operation failed: {0}")]
    Other(String),
}

/// Which side of the wire a request failed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestErrorKind {
    /// The request never produced a usable response (connect, timeout, encoding, decoding).
    Client,
    /// The remote answered with a failure status.
    Server,
}

/// Normalized HTTP failure surfaced by [`HttpClient`](crate::client::HttpClient).
///
/// Raw transport errors never escape the client; they are folded into this shape.
#[derive(Debug, Clone, Error)]
#[error("{message} (code {code})")]
pub struct RequestError {
    pub kind: RequestErrorKind,
    /// HTTP status, or [`CLIENT_ERROR_CODE`] for client-side failures
    pub code: u16,
    pub message: String,
    /// Original response body or transport detail, kept for diagnostics
    pub details: Option<Value>,
}

impl RequestError {
    /// Failure before any response was received.
    pub fn client(message: impl Into<String>) -> Self {
        Self {
            kind: RequestErrorKind::Client,
            code: CLIENT_ERROR_CODE,
            message: message.into(),
            details: None,
        }
    }

    /// Failure status returned by the server.
    pub fn server(code: u16, message: impl Into<String>, details: Option<Value>) -> Self {
        Self {
            kind: RequestErrorKind::Server,
            code,
            message: message.into(),
            details,
        }
    }

    /// Attach diagnostic details.
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    #[allow(dead_code)]
    pub fn is_server_error(&self) -> bool {
        self.kind == RequestErrorKind::Server
    }
}

impl From<reqwest::Error> for RequestError {
    fn from(err: reqwest::Error) -> Self {
        let message = if err.is_timeout() {
            "Request timed out".to_string()
        } else if err.is_connect() {
            "Failed to connect to API".to_string()
        } else {
            "Network error".to_string()
        };
        RequestError::client(message).with_details(Value::String(err.to_string()))
    }
}

/// Local validation failures raised by the store before any network call.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Car not found: {0}")]
    CarNotFound(String),

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("A user with email {0} is already registered")]
    AlreadyRegistered(String),

    #[error("Car {car_id} is already assigned to user {user_id}")]
    AlreadyAssigned { car_id: String, user_id: String },

    #[error("Car {car_id} is not assigned to user {user_id}")]
    NotAssigned { car_id: String, user_id: String },

    #[error("Invalid payload: {0}")]
    InvalidPayload(String),
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    NotFound(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}
