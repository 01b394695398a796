//! Unit tests for error module.

use super::*;
use serde_json::json;

#[test]
fn test_api_error_display() {
    let error = Error::Api {
        status: 429,
        body: json!({"status": {"error_code": 429}}),
    };

    let display = format!("{}", error);
    assert!(display.contains("429"));
    assert!(display.contains("error_code"));
}

#[test]
fn test_api_error_status() {
    let error = Error::Api {
        status: 404,
        body: json!({"error": "coin not found"}),
    };

    assert_eq!(error.status(), Some(404));
}

#[test]
fn test_api_error_details_is_body() {
    let body = json!({"error": "coin not found"});
    let error = Error::Api {
        status: 404,
        body: body.clone(),
    };

    assert_eq!(error.details(), body);
}

#[test]
fn test_invalid_url_has_no_status() {
    let parse_err = url::Url::parse("not a url").unwrap_err();
    let error = Error::from(parse_err);

    assert_eq!(error.status(), None);
    assert!(error.details().as_str().unwrap().contains("Invalid URL"));
}

#[test]
fn test_invalid_asset_id_reports_not_found() {
    let error = Error::InvalidAssetId("..".to_string());

    assert_eq!(error.status(), Some(404));
    assert_eq!(error.details(), json!("Invalid asset id: \"..\""));
}

#[test]
fn test_json_error_details_is_message() {
    let json_err = serde_json::from_str::<Value>("{").unwrap_err();
    let error = Error::from(json_err);

    assert_eq!(error.status(), None);
    assert!(error.details().as_str().unwrap().starts_with("JSON error"));
}

#[test]
fn test_error_debug() {
    let error = Error::Api {
        status: 500,
        body: Value::String("Internal server error".to_string()),
    };

    let debug = format!("{:?}", error);
    assert!(debug.contains("Api"));
    assert!(debug.contains("500"));
}
