//! Request validation
//!
//! Checks run in a fixed order and stop at the first violation, so the
//! error reported for a request with several problems is deterministic:
//!
//! 1. the request root is an object
//! 2. `model`, when present, names a recognized model
//! 3. `horizon` is present, an integer, and within `1..=max_horizon`
//! 4. `x` is present and is a rectangular numeric array of rank 1, 2 or 3
//! 5. `output_type`, when present, names a recognized output type
//! 6. `quantiles`, when present, is a non-empty list of levels in `[0, 1]`
//! 7. `is_multivariate`, when present, is a boolean
//!
//! A JSON `null` in an optional field counts as absent.

use crate::config::EngineConfig;
use crate::error::{ValidationError, ValidationErrorKind};
use crate::models::{ModelKind, OutputType};
use crate::request::ForecastRequest;
use serde_json::{Map, Value};
use tensor_shape::{inspect, SeriesInput, ShapeProfile};

/// Validate a raw request and build the typed request from it.
///
/// Never mutates `raw`. Returns the first violation found.
pub fn validate(raw: &Value, config: &EngineConfig) -> Result<ForecastRequest, ValidationError> {
    let fields = raw.as_object().ok_or_else(|| {
        ValidationError::new(
            ValidationErrorKind::InvalidRequest,
            "root",
            "Request must be a JSON object",
        )
    })?;

    let model = validate_model(fields)?.unwrap_or(config.default_model);
    let horizon = validate_horizon(fields, config.max_horizon)?;

    let x = match field(fields, "x") {
        Some(value) => validate_series(value)?,
        None => return Err(ValidationError::missing("x")),
    };

    let output_type = validate_output_type(fields)?.unwrap_or_default();
    let quantiles = validate_quantiles(fields)?;
    let is_multivariate = validate_multivariate_flag(fields)?;

    Ok(ForecastRequest::new(
        model,
        x,
        horizon,
        output_type,
        quantiles,
        is_multivariate,
    ))
}

/// Validate a series payload of rank 1, 2 or 3.
///
/// A string is parsed as JSON first, so callers may send the array encoded.
/// Ragged rows, empty rows and non-numeric leaves are rejected.
pub fn validate_series(value: &Value) -> Result<SeriesInput, ValidationError> {
    if let Value::String(encoded) = value {
        let decoded: Value = serde_json::from_str(encoded).map_err(|e| {
            ValidationError::invalid_parameter("x", "x could not be parsed as a JSON array")
                .with_details(e.to_string())
        })?;
        return parse_series(&decoded);
    }
    parse_series(value)
}

fn field<'a>(fields: &'a Map<String, Value>, name: &str) -> Option<&'a Value> {
    fields.get(name).filter(|value| !value.is_null())
}

fn finite_number(value: &Value) -> Option<f64> {
    value.as_f64().filter(|v| v.is_finite())
}

fn validate_model(fields: &Map<String, Value>) -> Result<Option<ModelKind>, ValidationError> {
    let Some(value) = field(fields, "model") else {
        return Ok(None);
    };

    value
        .as_str()
        .and_then(ModelKind::from_name)
        .map(Some)
        .ok_or_else(|| {
            let names: Vec<&str> = ModelKind::ALL.iter().map(ModelKind::as_str).collect();
            ValidationError::invalid_parameter(
                "model",
                format!("model must be one of: {}", names.join(", ")),
            )
        })
}

fn validate_horizon(fields: &Map<String, Value>, max_horizon: usize) -> Result<usize, ValidationError> {
    let value = field(fields, "horizon").ok_or_else(|| ValidationError::missing("horizon"))?;

    let horizon = finite_number(value).ok_or_else(|| {
        ValidationError::invalid_parameter("horizon", "horizon must be a finite number")
    })?;

    if horizon <= 0.0 {
        return Err(ValidationError::out_of_range(
            "horizon",
            "horizon must be greater than 0",
        ));
    }
    if horizon > max_horizon as f64 {
        return Err(ValidationError::out_of_range(
            "horizon",
            format!("horizon must not exceed {}", max_horizon),
        ));
    }
    if horizon.fract() != 0.0 {
        return Err(ValidationError::invalid_parameter(
            "horizon",
            "horizon must be an integer",
        ));
    }

    Ok(horizon as usize)
}

fn validate_output_type(fields: &Map<String, Value>) -> Result<Option<OutputType>, ValidationError> {
    let Some(value) = field(fields, "output_type") else {
        return Ok(None);
    };

    value
        .as_str()
        .and_then(OutputType::from_name)
        .map(Some)
        .ok_or_else(|| {
            let names: Vec<&str> = OutputType::ALL.iter().map(OutputType::as_str).collect();
            ValidationError::invalid_parameter(
                "output_type",
                format!("output_type must be one of: {}", names.join(", ")),
            )
        })
}

fn validate_quantiles(fields: &Map<String, Value>) -> Result<Option<Vec<f64>>, ValidationError> {
    let Some(value) = field(fields, "quantiles") else {
        return Ok(None);
    };

    let items = value.as_array().ok_or_else(|| {
        ValidationError::invalid_parameter("quantiles", "quantiles must be an array of numbers")
    })?;
    if items.is_empty() {
        return Err(ValidationError::out_of_range(
            "quantiles",
            "quantiles must not be empty",
        ));
    }

    let mut levels = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        let level = finite_number(item).ok_or_else(|| {
            ValidationError::invalid_parameter(
                "quantiles",
                format!("quantiles[{}] must be a finite number", i),
            )
        })?;
        if !(0.0..=1.0).contains(&level) {
            return Err(ValidationError::out_of_range(
                "quantiles",
                format!("quantiles[{}] must be between 0 and 1, got {}", i, level),
            ));
        }
        levels.push(level);
    }

    Ok(Some(levels))
}

fn validate_multivariate_flag(fields: &Map<String, Value>) -> Result<bool, ValidationError> {
    match field(fields, "is_multivariate") {
        None => Ok(false),
        Some(Value::Bool(flag)) => Ok(*flag),
        Some(_) => Err(ValidationError::invalid_parameter(
            "is_multivariate",
            "is_multivariate must be a boolean",
        )),
    }
}

fn invalid_x(message: String) -> ValidationError {
    ValidationError::invalid_parameter("x", message)
}

/// Rank comes from the inspected profile; every rejection carries that
/// profile as `details`.
fn parse_series(value: &Value) -> Result<SeriesInput, ValidationError> {
    let profile = inspect(value);
    parse_profiled(value, &profile).map_err(|err| err.with_details(format!("shape {}", profile)))
}

fn parse_profiled(value: &Value, profile: &ShapeProfile) -> Result<SeriesInput, ValidationError> {
    let items = value
        .as_array()
        .ok_or_else(|| invalid_x("x must be an array of rank 1, 2 or 3".to_string()))?;

    if profile.has_empty_axis() {
        let path = format!("x{}", "[0]".repeat(profile.rank() - 1));
        return Err(invalid_x(format!("{} must not be empty", path)));
    }

    match profile.rank() {
        1 => parse_values(items, "x").map(SeriesInput::Rank1),
        2 => parse_rows(items, "x").map(SeriesInput::Rank2),
        3 => parse_matrices(items).map(SeriesInput::Rank3),
        rank => Err(invalid_x(format!("x has rank {}, expected 1, 2 or 3", rank))),
    }
}

fn parse_values(items: &[Value], path: &str) -> Result<Vec<f64>, ValidationError> {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            finite_number(item)
                .ok_or_else(|| invalid_x(format!("{}[{}] must be a finite number", path, i)))
        })
        .collect()
}

/// Rows of one shared, non-zero width
fn parse_rows(items: &[Value], path: &str) -> Result<Vec<Vec<f64>>, ValidationError> {
    let width = expect_array(&items[0], &format!("{}[0]", path))?.len();
    if width == 0 {
        return Err(invalid_x(format!("{}[0] must not be empty", path)));
    }

    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let row_path = format!("{}[{}]", path, i);
            let row = expect_array(item, &row_path)?;
            if row.len() != width {
                return Err(invalid_x(format!(
                    "{} has length {}, expected {}",
                    row_path,
                    row.len(),
                    width
                )));
            }
            parse_values(row, &row_path)
        })
        .collect()
}

fn parse_matrices(items: &[Value]) -> Result<Vec<Vec<Vec<f64>>>, ValidationError> {
    let mut matrices = Vec::with_capacity(items.len());
    let mut expected: Option<(usize, usize)> = None;

    for (i, item) in items.iter().enumerate() {
        let matrix_path = format!("x[{}]", i);
        let rows = expect_array(item, &matrix_path)?;
        if rows.is_empty() {
            return Err(invalid_x(format!("{} must not be empty", matrix_path)));
        }
        let matrix = parse_rows(rows, &matrix_path)?;
        let shape = (matrix.len(), matrix[0].len());
        match expected {
            None => expected = Some(shape),
            Some((sequence, features)) if shape != (sequence, features) => {
                return Err(invalid_x(format!(
                    "{} has shape [{}, {}], expected [{}, {}]",
                    matrix_path, shape.0, shape.1, sequence, features
                )));
            }
            Some(_) => {}
        }
        matrices.push(matrix);
    }

    Ok(matrices)
}

fn expect_array<'a>(value: &'a Value, path: &str) -> Result<&'a Vec<Value>, ValidationError> {
    value
        .as_array()
        .ok_or_else(|| invalid_x(format!("{} must be an array", path)))
}
