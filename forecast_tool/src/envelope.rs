//! Success/failure envelope handed back to the transport layer

use crate::error::ErrorResponse;
use crate::models::{ModelKind, OutputType};
use serde::{Deserialize, Serialize};
use tensor_shape::{CanonicalTensor, ShapeProfile};

/// Payload of a successful forecast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSuccess {
    pub model: ModelKind,
    pub horizon: usize,
    pub output_type: OutputType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantiles: Option<Vec<f64>>,
    /// Predictions as returned by the forecasting service
    pub prediction: CanonicalTensor,
    /// Shape of `x` as submitted
    pub input_shape: ShapeProfile,
    /// Shape of the canonical tensor sent downstream
    pub normalized_shape: ShapeProfile,
    pub prediction_shape: ShapeProfile,
}

/// Result of one forecasting call, always returned instead of a panic or error
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ForecastEnvelope {
    Success(ForecastSuccess),
    Error(ErrorResponse),
}

impl ForecastEnvelope {
    pub fn is_success(&self) -> bool {
        matches!(self, ForecastEnvelope::Success(_))
    }

    pub fn success(&self) -> Option<&ForecastSuccess> {
        match self {
            ForecastEnvelope::Success(success) => Some(success),
            ForecastEnvelope::Error(_) => None,
        }
    }

    pub fn error(&self) -> Option<&ErrorResponse> {
        match self {
            ForecastEnvelope::Success(_) => None,
            ForecastEnvelope::Error(error) => Some(error),
        }
    }
}

impl From<ErrorResponse> for ForecastEnvelope {
    fn from(error: ErrorResponse) -> Self {
        ForecastEnvelope::Error(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use serde_json::json;

    #[test]
    fn test_error_envelope_is_tagged() {
        let envelope = ForecastEnvelope::from(
            ErrorResponse::new(ErrorCode::MissingRequiredField, "Missing required field: x")
                .with_field("x"),
        );

        assert_eq!(
            serde_json::to_value(&envelope).unwrap(),
            json!({
                "status": "error",
                "error_code": "MISSING_REQUIRED_FIELD",
                "message": "Missing required field: x",
                "field": "x"
            })
        );
    }
}
