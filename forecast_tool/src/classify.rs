//! Error classification
//!
//! Maps any failure raised along the request path into one [`ErrorResponse`]
//! shape, and tells retryable and authentication failures apart. Only
//! failures reported by the forecasting service with their own code can be
//! retryable or auth failures; local faults never are.

use crate::config::DeploymentMode;
use crate::error::{ErrorCode, ErrorResponse, ForecastError};
use serde_json::Value;
use std::fmt;
use thiserror::Error;
use tracing::{debug, warn};

/// Upstream codes for transient failures
const RETRYABLE_CODES: [&str; 6] = [
    "TIMEOUT",
    "OUT_OF_MEMORY",
    "RESOURCE_EXHAUSTED",
    "CONNECTION_LOST",
    "TRANSACTION_FAILED",
    "DATASTORE_ERROR",
];

/// Upstream codes for authentication and authorization failures
const AUTH_CODES: [&str; 5] = [
    "INVALID_API_KEY",
    "API_KEY_EXPIRED",
    "UNAUTHORIZED",
    "FORBIDDEN",
    "PERMISSION_DENIED",
];

const SUGGESTIONS: [(&str, &str); 16] = [
    ("INVALID_API_KEY", "Check that the API key in your configuration is correct"),
    ("API_KEY_EXPIRED", "Renew the API key and update your configuration"),
    ("UNAUTHORIZED", "Check that credentials are configured for the forecasting service"),
    ("FORBIDDEN", "Confirm that your account has access to the requested model"),
    ("PERMISSION_DENIED", "Confirm that your account has access to the requested model"),
    ("RATE_LIMIT_EXCEEDED", "Wait before retrying and back off between requests"),
    ("QUOTA_EXCEEDED", "Wait for the usage quota to reset or raise the quota"),
    ("TIMEOUT", "Retry the request, or shorten the series or horizon"),
    ("OUT_OF_MEMORY", "Reduce the size of x or the horizon and retry"),
    ("RESOURCE_EXHAUSTED", "The service is busy, retry after a short delay"),
    ("CONNECTION_LOST", "Retry the request"),
    ("TRANSACTION_FAILED", "Retry the request"),
    ("DATASTORE_ERROR", "Retry the request after a short delay"),
    ("MODEL_NOT_FOUND", "Use one of the supported models: chronos2, tirex"),
    ("NETWORK_ERROR", "Check network connectivity to the forecasting service"),
    ("TIMEOUT_ERROR", "Retry the request, or shorten the series or horizon"),
];

const FRIENDLY_MESSAGES: [(&str, &str); 5] = [
    ("INVALID_API_KEY", "The API key was rejected by the forecasting service"),
    ("API_KEY_EXPIRED", "The API key has expired"),
    ("RATE_LIMIT_EXCEEDED", "Too many requests were sent to the forecasting service"),
    ("TIMEOUT", "The forecasting service timed out"),
    ("OUT_OF_MEMORY", "The forecasting service ran out of memory for this request"),
];

const NETWORK_KEYWORDS: [&str; 8] = [
    "econnrefused",
    "econnreset",
    "enotfound",
    "ehostunreach",
    "network",
    "socket hang up",
    "fetch failed",
    "dns",
];

const TIMEOUT_KEYWORDS: [&str; 4] = ["etimedout", "timeout", "timed out", "deadline exceeded"];

fn lookup(table: &[(&'static str, &'static str)], code: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|(key, _)| *key == code)
        .map(|(_, value)| *value)
}

/// A failure reported by the forecasting service with its own code
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{error_code}: {message}")]
pub struct UpstreamError {
    pub error_code: String,
    pub message: String,
    pub details: Option<String>,
}

impl UpstreamError {
    pub fn new(error_code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error_code: error_code.into(),
            message: message.into(),
            details: None,
        }
    }
}

/// Subtype of a local runtime fault
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultKind {
    General,
    /// A programming error such as a value of the wrong type
    TypeMismatch,
}

/// A local fault with no upstream code
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct RuntimeFault {
    pub kind: FaultKind,
    pub message: String,
}

impl RuntimeFault {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            kind: FaultKind::General,
            message: message.into(),
        }
    }

    pub fn type_mismatch(message: impl Into<String>) -> Self {
        Self {
            kind: FaultKind::TypeMismatch,
            message: message.into(),
        }
    }
}

/// Anything that can go wrong along the forecasting path
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Failure {
    #[error(transparent)]
    Upstream(UpstreamError),
    #[error(transparent)]
    Runtime(RuntimeFault),
    #[error("{0}")]
    Message(String),
    #[error("unknown failure")]
    Unknown(Option<Value>),
}

impl Failure {
    /// Interpret an arbitrary JSON value as a failure.
    ///
    /// Objects with a string `error_code` are upstream failures, objects with
    /// only a string `message` are runtime faults (`"name": "TypeError"`
    /// marks a type mismatch), strings are plain messages, and everything
    /// else is unknown.
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Null => Failure::Unknown(None),
            Value::String(message) => Failure::Message(message.clone()),
            Value::Object(fields) => {
                let message = fields.get("message").and_then(Value::as_str);
                if let Some(code) = fields.get("error_code").and_then(Value::as_str) {
                    return Failure::Upstream(UpstreamError {
                        error_code: code.to_string(),
                        message: message.unwrap_or("Forecasting service error").to_string(),
                        details: fields.get("details").map(|d| match d {
                            Value::String(s) => s.clone(),
                            other => other.to_string(),
                        }),
                    });
                }
                match message {
                    Some(message) => {
                        let kind = match fields.get("name").and_then(Value::as_str) {
                            Some("TypeError") => FaultKind::TypeMismatch,
                            _ => FaultKind::General,
                        };
                        Failure::Runtime(RuntimeFault {
                            kind,
                            message: message.to_string(),
                        })
                    }
                    None => Failure::Unknown(Some(value.clone())),
                }
            }
            other => Failure::Unknown(Some(other.clone())),
        }
    }
}

impl From<UpstreamError> for Failure {
    fn from(err: UpstreamError) -> Self {
        Failure::Upstream(err)
    }
}

impl From<RuntimeFault> for Failure {
    fn from(err: RuntimeFault) -> Self {
        Failure::Runtime(err)
    }
}

impl From<ForecastError> for Failure {
    fn from(err: ForecastError) -> Self {
        Failure::Runtime(RuntimeFault::new(err.to_string()))
    }
}

impl From<&str> for Failure {
    fn from(message: &str) -> Self {
        Failure::Message(message.to_string())
    }
}

impl From<String> for Failure {
    fn from(message: String) -> Self {
        Failure::Message(message)
    }
}

impl From<&Value> for Failure {
    fn from(value: &Value) -> Self {
        Failure::from_value(value)
    }
}

/// Where a failure happened, folded into `details`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorContext {
    pub field: Option<String>,
    pub operation: Option<String>,
}

impl ErrorContext {
    pub fn operation(operation: impl Into<String>) -> Self {
        Self {
            field: None,
            operation: Some(operation.into()),
        }
    }

    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if let Some(field) = &self.field {
            parts.push(format!("field: {}", field));
        }
        if let Some(operation) = &self.operation {
            parts.push(format!("operation: {}", operation));
        }
        f.write_str(&parts.join(", "))
    }
}

/// Turns failures into error responses and logs them
#[derive(Debug, Clone, Copy, Default)]
pub struct ErrorClassifier {
    mode: DeploymentMode,
}

impl ErrorClassifier {
    pub fn new(mode: DeploymentMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> DeploymentMode {
        self.mode
    }

    /// Classify a failure. Total over every input; never panics.
    pub fn classify(&self, err: &Failure, context: Option<&ErrorContext>) -> ErrorResponse {
        let mut response = match err {
            Failure::Upstream(upstream) => classify_upstream(upstream),
            Failure::Runtime(fault) => classify_runtime(fault),
            Failure::Message(message) => ErrorResponse::new(ErrorCode::UnknownError, message.clone()),
            Failure::Unknown(value) => ErrorResponse::new(
                ErrorCode::UnknownError,
                "An unknown error occurred",
            )
            .with_details(
                value
                    .as_ref()
                    .map_or_else(|| "null".to_string(), Value::to_string),
            ),
        };

        if let Some(context) = context {
            let context_details = context.to_string();
            if !context_details.is_empty() {
                response.details = Some(match response.details.take() {
                    Some(existing) => format!("{} ({})", existing, context_details),
                    None => context_details,
                });
            }
        }

        self.log(&response);
        response
    }

    fn log(&self, response: &ErrorResponse) {
        match self.mode {
            DeploymentMode::Development => warn!(
                error_code = %response.error_code,
                field = ?response.field,
                details = ?response.details,
                "{}",
                response.message
            ),
            DeploymentMode::Production => debug!(
                error_code = %response.error_code,
                field = ?response.field,
                "forecast request failed"
            ),
        }
    }
}

fn classify_upstream(upstream: &UpstreamError) -> ErrorResponse {
    let code = upstream.error_code.as_str();
    let message = lookup(&FRIENDLY_MESSAGES, code)
        .map(str::to_string)
        .unwrap_or_else(|| upstream.message.clone());

    let mut response = ErrorResponse::new(ErrorCode::parse(code), message);
    response.details = upstream.details.clone();
    response.suggestion = lookup(&SUGGESTIONS, code).map(str::to_string);
    response
}

fn classify_runtime(fault: &RuntimeFault) -> ErrorResponse {
    let lowered = fault.message.to_lowercase();
    let mentions = |keywords: &[&str]| keywords.iter().any(|k| lowered.contains(k));

    let (code, message) = if mentions(&NETWORK_KEYWORDS[..]) {
        (
            ErrorCode::NetworkError,
            "Could not reach the forecasting service".to_string(),
        )
    } else if mentions(&TIMEOUT_KEYWORDS[..]) {
        (
            ErrorCode::TimeoutError,
            "The forecasting request timed out".to_string(),
        )
    } else if fault.kind == FaultKind::TypeMismatch {
        (
            ErrorCode::InternalServerError,
            "Internal server error".to_string(),
        )
    } else {
        (ErrorCode::InternalError, fault.message.clone())
    };

    let mut response = ErrorResponse::new(code.clone(), message);
    if response.message != fault.message {
        response.details = Some(fault.message.clone());
    }
    response.suggestion = lookup(&SUGGESTIONS, code.as_str()).map(str::to_string);
    response
}

/// Whether the failure is a transient upstream failure worth retrying
pub fn is_retryable_error(err: &Failure) -> bool {
    match err {
        Failure::Upstream(upstream) => RETRYABLE_CODES.contains(&upstream.error_code.as_str()),
        _ => false,
    }
}

/// Whether the failure is an upstream authentication or authorization failure
pub fn is_auth_error(err: &Failure) -> bool {
    match err {
        Failure::Upstream(upstream) => AUTH_CODES.contains(&upstream.error_code.as_str()),
        _ => false,
    }
}
