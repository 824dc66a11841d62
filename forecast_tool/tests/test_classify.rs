use forecast_tool::classify::{
    is_auth_error, is_retryable_error, ErrorClassifier, ErrorContext, Failure, RuntimeFault,
    UpstreamError,
};
use forecast_tool::{DeploymentMode, ErrorCode, ForecastError};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::json;

fn classify(err: &Failure) -> forecast_tool::ErrorResponse {
    ErrorClassifier::new(DeploymentMode::Development).classify(err, None)
}

fn upstream(code: &str) -> Failure {
    Failure::Upstream(UpstreamError::new(code, format!("upstream said {}", code)))
}

#[rstest]
#[case("ECONNREFUSED")]
#[case("connect ECONNRESET 10.0.0.1:443")]
#[case("getaddrinfo ENOTFOUND api.example.com")]
#[case("Network is unreachable")]
fn test_connectivity_faults(#[case] message: &str) {
    let response = classify(&Failure::Runtime(RuntimeFault::new(message)));
    assert_eq!(response.error_code, ErrorCode::NetworkError);
    assert_eq!(response.details.as_deref(), Some(message));
    assert!(response.suggestion.is_some());
}

#[rstest]
#[case("ETIMEDOUT")]
#[case("request timed out after 30s")]
#[case("Timeout while waiting for response")]
fn test_timeout_faults(#[case] message: &str) {
    let response = classify(&Failure::Runtime(RuntimeFault::new(message)));
    assert_eq!(response.error_code, ErrorCode::TimeoutError);
}

#[test]
fn test_type_mismatch_fault() {
    let response = classify(&Failure::Runtime(RuntimeFault::type_mismatch(
        "cannot read property 'shape' of undefined",
    )));
    assert_eq!(response.error_code, ErrorCode::InternalServerError);
}

#[test]
fn test_other_runtime_fault() {
    let response = classify(&Failure::Runtime(RuntimeFault::new("index out of bounds")));
    assert_eq!(response.error_code, ErrorCode::InternalError);
    assert_eq!(response.message, "index out of bounds");
}

#[test]
fn test_plain_string() {
    let response = classify(&Failure::from("plain string"));
    assert_eq!(response.error_code, ErrorCode::UnknownError);
    assert_eq!(response.message, "plain string");
}

#[test]
fn test_null_value() {
    let response = classify(&Failure::from_value(&json!(null)));
    assert_eq!(response.error_code, ErrorCode::UnknownError);
    assert_eq!(response.details.as_deref(), Some("null"));
}

#[test]
fn test_unknown_value_is_stringified() {
    let response = classify(&Failure::from_value(&json!([1, 2])));
    assert_eq!(response.error_code, ErrorCode::UnknownError);
    assert_eq!(response.details.as_deref(), Some("[1,2]"));
}

#[test]
fn test_upstream_code_passes_through() {
    let response = classify(&upstream("MODEL_NOT_FOUND"));

    assert_eq!(response.error_code, ErrorCode::Upstream("MODEL_NOT_FOUND".to_string()));
    assert_eq!(response.message, "upstream said MODEL_NOT_FOUND");
    assert_eq!(
        response.suggestion.as_deref(),
        Some("Use one of the supported models: chronos2, tirex")
    );
    assert_eq!(serde_json::to_value(&response).unwrap()["error_code"], "MODEL_NOT_FOUND");
}

#[test]
fn test_upstream_friendly_message() {
    let response = classify(&upstream("INVALID_API_KEY"));
    assert_eq!(response.message, "The API key was rejected by the forecasting service");
    assert!(response.suggestion.unwrap().contains("API key"));
}

#[test]
fn test_upstream_without_table_entries() {
    let response = classify(&upstream("SOMETHING_NEW"));
    assert_eq!(response.message, "upstream said SOMETHING_NEW");
    assert_eq!(response.suggestion, None);
}

#[test]
fn test_upstream_from_json_value() {
    let failure = Failure::from_value(&json!({
        "error_code": "RATE_LIMIT_EXCEEDED",
        "message": "slow down",
        "details": {"retry_after": 3}
    }));
    let response = classify(&failure);

    assert_eq!(response.error_code.as_str(), "RATE_LIMIT_EXCEEDED");
    assert_eq!(response.details.as_deref(), Some(r#"{"retry_after":3}"#));
    assert!(response.suggestion.is_some());
}

#[test]
fn test_runtime_from_json_value() {
    let failure = Failure::from_value(&json!({"name": "TypeError", "message": "x is not iterable"}));
    assert_eq!(classify(&failure).error_code, ErrorCode::InternalServerError);

    let failure = Failure::from_value(&json!({"message": "fetch failed"}));
    assert_eq!(classify(&failure).error_code, ErrorCode::NetworkError);
}

#[test]
fn test_context_is_folded_into_details() {
    let classifier = ErrorClassifier::new(DeploymentMode::Production);
    let context = ErrorContext::operation("forecast");

    let response = classifier.classify(&Failure::Runtime(RuntimeFault::new("ECONNREFUSED")), Some(&context));

    assert_eq!(
        response.details.as_deref(),
        Some("ECONNREFUSED (operation: forecast)")
    );
}

#[test]
fn test_forecast_error_becomes_runtime_fault() {
    let failure = Failure::from(ForecastError::DataError("Cannot normalize an empty series".to_string()));
    let response = classify(&failure);
    assert_eq!(response.error_code, ErrorCode::InternalError);
    assert!(!is_retryable_error(&failure));
}

#[rstest]
#[case("TIMEOUT")]
#[case("OUT_OF_MEMORY")]
#[case("RESOURCE_EXHAUSTED")]
#[case("CONNECTION_LOST")]
#[case("TRANSACTION_FAILED")]
#[case("DATASTORE_ERROR")]
fn test_retryable_codes(#[case] code: &str) {
    assert!(is_retryable_error(&upstream(code)));
    assert!(!is_auth_error(&upstream(code)));
}

#[rstest]
#[case("INVALID_API_KEY")]
#[case("API_KEY_EXPIRED")]
#[case("UNAUTHORIZED")]
#[case("FORBIDDEN")]
#[case("PERMISSION_DENIED")]
fn test_auth_codes(#[case] code: &str) {
    assert!(is_auth_error(&upstream(code)));
    assert!(!is_retryable_error(&upstream(code)));
}

#[test]
fn test_local_faults_never_retryable_or_auth() {
    let failures = [
        Failure::Runtime(RuntimeFault::new("TIMEOUT")),
        Failure::from("INVALID_API_KEY"),
        Failure::Unknown(None),
        upstream("RATE_LIMIT_EXCEEDED"),
    ];
    for failure in &failures {
        assert!(!is_retryable_error(failure), "{:?}", failure);
        assert!(!is_auth_error(failure), "{:?}", failure);
    }
}
