//! Composition of validation, normalization, the forecasting call and error classification

use crate::classify::{ErrorClassifier, ErrorContext, Failure, RuntimeFault};
use crate::config::EngineConfig;
use crate::envelope::{ForecastEnvelope, ForecastSuccess};
use crate::error::ErrorResponse;
use crate::normalize::to_forecast_input;
use crate::request::ForecastInput;
use crate::validation::validate;
use serde::Serialize;
use serde_json::Value;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use tensor_shape::{CanonicalTensor, ShapeProfile};
use tracing::{debug, error, warn};

/// The forecasting operation itself, provided by the caller
pub trait ForecastBackend: Send + Sync {
    /// Forecast `input.horizon` steps from the canonical tensor
    fn forecast(&self, input: &ForecastInput) -> Result<CanonicalTensor, Failure>;
}

impl<F> ForecastBackend for F
where
    F: Fn(&ForecastInput) -> Result<CanonicalTensor, Failure> + Send + Sync,
{
    fn forecast(&self, input: &ForecastInput) -> Result<CanonicalTensor, Failure> {
        self(input)
    }
}

/// A validated and normalized request, ready for the forecasting call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PreparedForecast {
    pub input: ForecastInput,
    pub input_shape: ShapeProfile,
    pub normalized_shape: ShapeProfile,
}

/// Runs one request through the whole pipeline
pub struct ForecastOrchestrator<'a> {
    backend: &'a dyn ForecastBackend,
    config: EngineConfig,
    classifier: ErrorClassifier,
}

impl<'a> ForecastOrchestrator<'a> {
    pub fn new(backend: &'a dyn ForecastBackend, config: EngineConfig) -> Self {
        let classifier = ErrorClassifier::new(config.deployment_mode);
        Self {
            backend,
            config,
            classifier,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn classifier(&self) -> &ErrorClassifier {
        &self.classifier
    }

    /// Validate and normalize a raw request without calling the backend
    pub fn prepare(&self, raw: &Value) -> Result<PreparedForecast, ErrorResponse> {
        let request = validate(raw, &self.config).map_err(|err| {
            debug!(error_code = %err.error_code(), field = %err.field, "Request rejected");
            ErrorResponse::from(err)
        })?;

        let input = to_forecast_input(&request).map_err(|err| {
            let context = ErrorContext::operation("normalize").with_field("x");
            self.classifier.classify(&Failure::from(err), Some(&context))
        })?;

        Ok(PreparedForecast {
            input_shape: request.x().shape(),
            normalized_shape: input.x.shape(),
            input,
        })
    }

    /// Run the full pipeline. Every outcome, including a panicking backend,
    /// comes back as an envelope.
    pub fn run(&self, raw: &Value) -> ForecastEnvelope {
        let prepared = match self.prepare(raw) {
            Ok(prepared) => prepared,
            Err(response) => return ForecastEnvelope::Error(response),
        };

        debug!(
            model = %prepared.input.model,
            horizon = prepared.input.horizon,
            shape = %prepared.normalized_shape,
            "Calling forecasting backend"
        );

        match self.call_backend(&prepared.input) {
            Ok(prediction) => ForecastEnvelope::Success(ForecastSuccess {
                model: prepared.input.model,
                horizon: prepared.input.horizon,
                output_type: prepared.input.output_type,
                quantiles: prepared.input.quantiles,
                prediction_shape: prediction.shape(),
                prediction,
                input_shape: prepared.input_shape,
                normalized_shape: prepared.normalized_shape,
            }),
            Err(failure) => {
                warn!(error = %failure, "Forecasting backend failed");
                let context = ErrorContext::operation("forecast");
                ForecastEnvelope::Error(self.classifier.classify(&failure, Some(&context)))
            }
        }
    }

    fn call_backend(&self, input: &ForecastInput) -> Result<CanonicalTensor, Failure> {
        let backend = self.backend;
        match panic::catch_unwind(AssertUnwindSafe(|| backend.forecast(input))) {
            Ok(result) => result,
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                error!(panic = %message, "Forecasting backend panicked");
                Err(Failure::Runtime(RuntimeFault::new(format!(
                    "forecasting backend panicked: {}",
                    message
                ))))
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
