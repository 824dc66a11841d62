//! Typed forecasting request and the downstream forecasting input

use crate::models::{ModelKind, OutputType};
use serde::Serialize;
use tensor_shape::{CanonicalTensor, SeriesInput};

/// A request that has passed validation.
///
/// Only [`crate::validation::validate`] builds these, so every field already
/// satisfies the request contract and defaults have been applied.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastRequest {
    model: ModelKind,
    x: SeriesInput,
    horizon: usize,
    output_type: OutputType,
    quantiles: Option<Vec<f64>>,
    is_multivariate: bool,
}

impl ForecastRequest {
    pub(crate) fn new(
        model: ModelKind,
        x: SeriesInput,
        horizon: usize,
        output_type: OutputType,
        quantiles: Option<Vec<f64>>,
        is_multivariate: bool,
    ) -> Self {
        Self {
            model,
            x,
            horizon,
            output_type,
            quantiles,
            is_multivariate,
        }
    }

    pub fn model(&self) -> ModelKind {
        self.model
    }

    /// The validated series payload, in its original rank
    pub fn x(&self) -> &SeriesInput {
        &self.x
    }

    pub fn horizon(&self) -> usize {
        self.horizon
    }

    pub fn output_type(&self) -> OutputType {
        self.output_type
    }

    pub fn quantiles(&self) -> Option<&[f64]> {
        self.quantiles.as_deref()
    }

    /// Only meaningful for rank-2 `x` under a multivariate-capable model
    pub fn is_multivariate(&self) -> bool {
        self.is_multivariate
    }
}

/// Exactly what the forecasting operation consumes
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastInput {
    pub model: ModelKind,
    pub x: CanonicalTensor,
    pub horizon: usize,
    pub output_type: OutputType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantiles: Option<Vec<f64>>,
}
