//! Tool definition advertised to tool-calling clients

use crate::config::EngineConfig;
use crate::models::{ModelKind, OutputType};
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Name under which the forecasting tool is registered
pub const FORECAST_TOOL_NAME: &str = "forecast";

/// Tool definition: a name, a description and a JSON Schema for the arguments
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: serde_json::Value,
}

impl ToolDefinition {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        input_schema: serde_json::Value,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            input_schema,
        }
    }
}

/// Definition of the `forecast` tool for the given configuration
pub fn forecast_tool_definition(config: &EngineConfig) -> ToolDefinition {
    let models: Vec<&str> = ModelKind::ALL.iter().map(ModelKind::as_str).collect();
    let outputs: Vec<&str> = OutputType::ALL.iter().map(OutputType::as_str).collect();

    ToolDefinition::new(
        FORECAST_TOOL_NAME,
        "Forecast future values of a time series. x may be a flat series, a matrix \
         or a [batch, sequence, features] tensor; matrices are read as \
         [sequence, features] only when is_multivariate is true and the model supports it.",
        json!({
            "type": "object",
            "properties": {
                "model": {
                    "type": "string",
                    "enum": models,
                    "default": config.default_model.as_str(),
                    "description": "Forecasting model"
                },
                "x": {
                    "type": ["array", "string"],
                    "description": "Observed values: rank 1, 2 or 3 numeric array, \
                                    or that array encoded as a JSON string"
                },
                "horizon": {
                    "type": "integer",
                    "minimum": 1,
                    "maximum": config.max_horizon,
                    "description": "Number of future steps to forecast"
                },
                "output_type": {
                    "type": "string",
                    "enum": outputs,
                    "default": OutputType::Point.as_str()
                },
                "quantiles": {
                    "type": "array",
                    "items": { "type": "number", "minimum": 0, "maximum": 1 },
                    "minItems": 1,
                    "description": "Quantile levels for output_type = quantiles"
                },
                "is_multivariate": {
                    "type": "boolean",
                    "default": false,
                    "description": "Read a rank-2 x as [sequence, features]"
                }
            },
            "required": ["x", "horizon"]
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_reflects_config() {
        let config = EngineConfig::default().with_max_horizon(64).unwrap();
        let tool = forecast_tool_definition(&config);

        assert_eq!(tool.name, "forecast");
        assert_eq!(tool.input_schema["properties"]["horizon"]["maximum"], 64);
        assert_eq!(tool.input_schema["required"], json!(["x", "horizon"]));
        assert_eq!(
            tool.input_schema["properties"]["x"]["type"],
            json!(["array", "string"])
        );

        let encoded = serde_json::to_value(&tool).unwrap();
        assert!(encoded.get("inputSchema").is_some());
    }
}
