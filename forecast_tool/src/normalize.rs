//! Reshaping validated series into the canonical `[batch, sequence, features]` tensor
//!
//! Rank decides first:
//!
//! - rank 3 passes through unchanged
//! - rank 1 of length `n` becomes `[1, n, 1]`
//! - rank 2 `[r, c]` becomes `[1, r, c]` only when the model supports
//!   multivariate input and the caller set `is_multivariate`; otherwise it is
//!   flattened row-major into `[1, r * c, 1]`
//!
//! The same rank-2 literal can mean batched univariate observations or one
//! sequence of co-observed variables. The data alone cannot tell them apart.

use crate::error::{ForecastError, Result};
use crate::models::ModelKind;
use crate::request::{ForecastInput, ForecastRequest};
use tensor_shape::{CanonicalTensor, SeriesInput};

/// Produce the canonical tensor for a validated series.
///
/// Fails only when the top-level array is empty.
pub fn normalize(x: &SeriesInput, model: ModelKind, is_multivariate: bool) -> Result<CanonicalTensor> {
    if x.is_empty() {
        return Err(ForecastError::DataError(
            "Cannot normalize an empty series".to_string(),
        ));
    }

    let tensor = match x {
        SeriesInput::Rank3(matrices) => CanonicalTensor::new(matrices.clone())?,
        SeriesInput::Rank1(values) => CanonicalTensor::from_univariate(values)?,
        SeriesInput::Rank2(rows) if model.supports_multivariate() && is_multivariate => {
            CanonicalTensor::from_multivariate(rows)?
        }
        SeriesInput::Rank2(rows) => {
            let flattened: Vec<f64> = rows.iter().flatten().copied().collect();
            CanonicalTensor::from_univariate(&flattened)?
        }
    };

    Ok(tensor)
}

/// Build the forecasting input for a validated request
pub fn to_forecast_input(request: &ForecastRequest) -> Result<ForecastInput> {
    let x = normalize(request.x(), request.model(), request.is_multivariate())?;

    Ok(ForecastInput {
        model: request.model(),
        x,
        horizon: request.horizon(),
        output_type: request.output_type(),
        quantiles: request.quantiles().map(<[f64]>::to_vec),
    })
}
