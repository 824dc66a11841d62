use forecast_tool::models::ModelKind;
use forecast_tool::tools::forecast_tool_definition;
use forecast_tool::{DeploymentMode, EngineConfig, ForecastError};
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_config_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"{{"max_horizon": 10000, "default_model": "tirex", "deployment_mode": "development"}}"#
    )
    .unwrap();

    let config = EngineConfig::from_path(file.path()).unwrap();

    assert_eq!(config.max_horizon, 10000);
    assert_eq!(config.default_model, ModelKind::Tirex);
    assert_eq!(config.deployment_mode, DeploymentMode::Development);
}

#[test]
fn test_config_missing_file() {
    let result = EngineConfig::from_path("/nonexistent/engine.json");
    assert!(matches!(result, Err(ForecastError::IoError(_))));
}

#[test]
fn test_config_bad_json() {
    let result = EngineConfig::from_json_str(r#"{"max_horizon": "lots"}"#);
    assert!(matches!(result, Err(ForecastError::JsonError(_))));
}

#[test]
fn test_config_zero_horizon() {
    let result = EngineConfig::from_json_str(r#"{"max_horizon": 0}"#);
    assert!(matches!(result, Err(ForecastError::ConfigError(_))));
}

#[test]
fn test_tool_definition_uses_config() {
    let config = EngineConfig::from_json_str(r#"{"max_horizon": 256, "default_model": "tirex"}"#).unwrap();
    let tool = forecast_tool_definition(&config);

    let properties = &tool.input_schema["properties"];
    assert_eq!(properties["horizon"]["maximum"], 256);
    assert_eq!(properties["model"]["default"], "tirex");
    assert_eq!(properties["output_type"]["enum"], serde_json::json!(["point", "quantiles"]));
}
