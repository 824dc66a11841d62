//! # Forecast Tool
//!
//! Request validation and tensor normalization for a time series forecasting tool.
//!
//! ## Features
//!
//! - Field-by-field validation of untyped JSON requests with field-addressable errors
//! - Normalization of rank 1, 2 and 3 series into a `[batch, sequence, features]` tensor
//! - Classification of upstream and local failures into one error shape
//! - An orchestrator that chains the steps around a caller-supplied forecasting backend
//!
//! ## Rank-2 input
//!
//! A matrix `[r, c]` is read as `c` co-observed variables over `r` steps only
//! when the model supports multivariate input and `is_multivariate` is set:
//!
//! ```rust
//! use forecast_tool::models::ModelKind;
//! use forecast_tool::normalize::normalize;
//! use tensor_shape::SeriesInput;
//!
//! let x = SeriesInput::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
//!
//! let multivariate = normalize(&x, ModelKind::Chronos2, true).unwrap();
//! assert_eq!(multivariate.shape().dims(), &[1, 2, 2]);
//!
//! let flattened = normalize(&x, ModelKind::Chronos2, false).unwrap();
//! assert_eq!(flattened.shape().dims(), &[1, 4, 1]);
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use forecast_tool::{EngineConfig, Failure, ForecastInput, ForecastOrchestrator};
//! use serde_json::json;
//! use tensor_shape::CanonicalTensor;
//!
//! // A stand-in backend that repeats the last observation
//! let backend = |input: &ForecastInput| -> Result<CanonicalTensor, Failure> {
//!     let last = input.x.flatten().last().copied().unwrap_or_default();
//!     CanonicalTensor::from_univariate(&vec![last; input.horizon])
//!         .map_err(|e| Failure::from(e.to_string()))
//! };
//!
//! let orchestrator = ForecastOrchestrator::new(&backend, EngineConfig::default());
//! let envelope = orchestrator.run(&json!({"x": [1.0, 2.0, 3.0], "horizon": 2}));
//!
//! let success = envelope.success().unwrap();
//! assert_eq!(success.normalized_shape.dims(), &[1, 3, 1]);
//! assert_eq!(success.prediction_shape.dims(), &[1, 2, 1]);
//! ```

pub mod classify;
pub mod config;
pub mod envelope;
pub mod error;
pub mod models;
pub mod normalize;
pub mod orchestrator;
pub mod request;
pub mod tools;
pub mod validation;

// Re-export commonly used types
pub use crate::classify::{
    is_auth_error, is_retryable_error, ErrorClassifier, ErrorContext, Failure, FaultKind,
    RuntimeFault, UpstreamError,
};
pub use crate::config::{DeploymentMode, EngineConfig};
pub use crate::envelope::{ForecastEnvelope, ForecastSuccess};
pub use crate::error::{ErrorCode, ErrorResponse, ForecastError, ValidationError, ValidationErrorKind};
pub use crate::models::{ModelKind, OutputType};
pub use crate::normalize::normalize;
pub use crate::orchestrator::{ForecastBackend, ForecastOrchestrator, PreparedForecast};
pub use crate::request::{ForecastInput, ForecastRequest};
pub use crate::validation::validate;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
