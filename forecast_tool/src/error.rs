//! Error types for the forecast_tool crate

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use tensor_shape::ShapeError;
use thiserror::Error;

/// Internal error types for the forecast_tool crate
#[derive(Debug, Error)]
pub enum ForecastError {
    /// Error related to payload data
    #[error("Data error: {0}")]
    DataError(String),

    /// Error from invalid configuration values
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Error from JSON encoding or decoding
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Error from IO operations
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, ForecastError>;

impl From<ShapeError> for ForecastError {
    fn from(err: ShapeError) -> Self {
        ForecastError::DataError(err.to_string())
    }
}

/// Machine-readable error codes reported to callers.
///
/// The engine's own codes form a closed set; codes coming from the
/// forecasting service are carried through untouched in `Upstream`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    InvalidRequest,
    MissingRequiredField,
    InvalidParameter,
    InvalidValueRange,
    NetworkError,
    TimeoutError,
    InternalServerError,
    InternalError,
    UnknownError,
    Upstream(String),
}

impl ErrorCode {
    /// Wire representation of the code
    pub fn as_str(&self) -> &str {
        match self {
            ErrorCode::InvalidRequest => "INVALID_REQUEST",
            ErrorCode::MissingRequiredField => "MISSING_REQUIRED_FIELD",
            ErrorCode::InvalidParameter => "INVALID_PARAMETER",
            ErrorCode::InvalidValueRange => "INVALID_VALUE_RANGE",
            ErrorCode::NetworkError => "NETWORK_ERROR",
            ErrorCode::TimeoutError => "TIMEOUT_ERROR",
            ErrorCode::InternalServerError => "INTERNAL_SERVER_ERROR",
            ErrorCode::InternalError => "INTERNAL_ERROR",
            ErrorCode::UnknownError => "UNKNOWN_ERROR",
            ErrorCode::Upstream(code) => code,
        }
    }

    /// Parse a wire code; anything outside the engine's set is `Upstream`
    pub fn parse(code: &str) -> Self {
        match code {
            "INVALID_REQUEST" => ErrorCode::InvalidRequest,
            "MISSING_REQUIRED_FIELD" => ErrorCode::MissingRequiredField,
            "INVALID_PARAMETER" => ErrorCode::InvalidParameter,
            "INVALID_VALUE_RANGE" => ErrorCode::InvalidValueRange,
            "NETWORK_ERROR" => ErrorCode::NetworkError,
            "TIMEOUT_ERROR" => ErrorCode::TimeoutError,
            "INTERNAL_SERVER_ERROR" => ErrorCode::InternalServerError,
            "INTERNAL_ERROR" => ErrorCode::InternalError,
            "UNKNOWN_ERROR" => ErrorCode::UnknownError,
            other => ErrorCode::Upstream(other.to_string()),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ErrorCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ErrorCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let code = String::deserialize(deserializer)?;
        Ok(ErrorCode::parse(&code))
    }
}

/// Kinds of field-level request violations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationErrorKind {
    /// The request root is not an object
    InvalidRequest,
    /// A required field is absent
    MissingRequiredField,
    /// A field has the wrong type or structure
    InvalidParameter,
    /// A field is well-typed but out of range
    InvalidValueRange,
}

impl From<ValidationErrorKind> for ErrorCode {
    fn from(kind: ValidationErrorKind) -> Self {
        match kind {
            ValidationErrorKind::InvalidRequest => ErrorCode::InvalidRequest,
            ValidationErrorKind::MissingRequiredField => ErrorCode::MissingRequiredField,
            ValidationErrorKind::InvalidParameter => ErrorCode::InvalidParameter,
            ValidationErrorKind::InvalidValueRange => ErrorCode::InvalidValueRange,
        }
    }
}

/// The first structural violation found in a request
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message} (field: {field})")]
pub struct ValidationError {
    pub kind: ValidationErrorKind,
    /// Offending top-level request field (`x`, `quantiles`, ...); the index
    /// path of the offending element, such as `quantiles[2]`, is in `message`
    pub field: String,
    pub message: String,
    pub details: Option<String>,
}

impl ValidationError {
    pub fn new(kind: ValidationErrorKind, field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            field: field.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn missing(field: &str) -> Self {
        Self::new(
            ValidationErrorKind::MissingRequiredField,
            field,
            format!("Missing required field: {}", field),
        )
    }

    pub fn invalid_parameter(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ValidationErrorKind::InvalidParameter, field, message)
    }

    pub fn out_of_range(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ValidationErrorKind::InvalidValueRange, field, message)
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn error_code(&self) -> ErrorCode {
        self.kind.into()
    }
}

/// Uniform error record returned to callers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error_code: ErrorCode,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl ErrorResponse {
    pub fn new(error_code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            error_code,
            message: message.into(),
            field: None,
            details: None,
            suggestion: None,
        }
    }

    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

impl From<ValidationError> for ErrorResponse {
    fn from(err: ValidationError) -> Self {
        Self {
            error_code: err.error_code(),
            message: err.message,
            field: Some(err.field),
            details: err.details,
            suggestion: None,
        }
    }
}
