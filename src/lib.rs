//! # Forecast Tool Workspace
//!
//! Facade over the workspace crates: `tensor_shape` for shape inspection and
//! tensor containers, and `forecast_tool` for request validation,
//! normalization and error classification.
//!
//! ## Example
//!
//! ```
//! use forecast_tool_workspace::forecast_tool::{validate, EngineConfig};
//! use serde_json::json;
//!
//! let request = validate(&json!({"x": [1, 2, 3], "horizon": 4}), &EngineConfig::default()).unwrap();
//! assert_eq!(request.x().shape().dims(), &[3]);
//! ```

pub use forecast_tool;
pub use tensor_shape;

#[cfg(test)]
mod tests {
    use super::forecast_tool::{normalize, ModelKind};
    use super::tensor_shape::{inspect, SeriesInput};
    use serde_json::json;

    #[test]
    fn test_crates_compose() {
        let raw = json!([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
        assert_eq!(inspect(&raw).dims(), &[2, 3]);

        let x = SeriesInput::from_rows(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]).unwrap();
        let tensor = normalize(&x, ModelKind::Chronos2, true).unwrap();
        assert_eq!(tensor.shape(), inspect(&json!([raw])));
    }
}
