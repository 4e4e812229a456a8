#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Integration tests for the model linter

use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;
use tscodegen::linter::{error_count, fail_if_errors, lint_model_file, LintSeverity};

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn test_weather_fixture_is_clean() {
    let issues = lint_model_file(&fixture_path("weather.json")).unwrap();
    assert!(issues.is_empty(), "unexpected issues: {issues:?}");
    assert!(fail_if_errors(&issues).is_ok());
}

#[test]
fn test_yaml_model_with_problems() {
    let mut file = NamedTempFile::with_suffix(".yaml").unwrap();
    file.write_all(
        br#"
smithy: "2.0"
shapes:
  example.shop#Shop:
    type: service
    operations:
      - target: example.shop#Browse
      - target: example.shop#Buy
    traits:
      smithy.api#auth: ["smithy.api#httpBasicAuth"]
      smithy.rules#clientContextParams:
        Tenant:
          type: string
  example.shop#Browse:
    type: operation
    traits:
      smithy.api#optionalAuth: {}
  example.shop#Buy:
    type: operation
"#,
    )
    .unwrap();
    file.flush().unwrap();

    let issues = lint_model_file(file.path()).unwrap();
    assert_eq!(error_count(&issues), 1);

    let unknown = issues
        .iter()
        .find(|i| i.kind == "unknown_auth_scheme")
        .unwrap();
    assert_eq!(unknown.severity, LintSeverity::Error);
    assert_eq!(unknown.location, "example.shop#Shop");

    assert!(issues
        .iter()
        .any(|i| i.kind == "optional_auth_without_auth" && i.location == "example.shop#Browse"));
    assert!(issues
        .iter()
        .any(|i| i.kind == "unknown_client_context_param" && i.severity == LintSeverity::Warning));

    assert!(fail_if_errors(&issues).is_err());
}

#[test]
fn test_missing_model_file_is_an_error() {
    assert!(lint_model_file(&fixture_path("missing.json")).is_err());
}
