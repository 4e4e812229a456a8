#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Unit tests for the model linter

use crate::linter::{error_count, fail_if_errors, lint_model, lint_model_file, LintSeverity};
use crate::model::Model;
use serde_json::{json, Value};
use std::io::Write;
use tempfile::NamedTempFile;

fn lint(shapes: Value) -> Vec<crate::linter::LintIssue> {
    let model = Model::from_ast(json!({"smithy": "2.0", "shapes": shapes})).unwrap();
    lint_model(&model)
}

fn kinds(issues: &[crate::linter::LintIssue]) -> Vec<&str> {
    issues.iter().map(|i| i.kind.as_str()).collect()
}

#[test]
fn test_clean_model_has_no_issues() {
    let issues = lint(json!({
        "ex#Svc": {
            "type": "service",
            "operations": [{"target": "ex#Op"}],
            "traits": {"smithy.api#httpApiKeyAuth": {"name": "x-api-key", "in": "header"}}
        },
        "ex#Op": {"type": "operation"}
    }));
    assert!(issues.is_empty(), "unexpected issues: {issues:?}");
}

#[test]
fn test_unknown_auth_scheme_on_service_and_operation() {
    let issues = lint(json!({
        "ex#Svc": {
            "type": "service",
            "operations": [{"target": "ex#Op"}],
            "traits": {
                "smithy.api#httpApiKeyAuth": {"name": "x-api-key", "in": "header"},
                "smithy.api#auth": ["smithy.api#httpBearerAuth"]
            }
        },
        "ex#Op": {
            "type": "operation",
            "traits": {"smithy.api#auth": ["smithy.api#httpBasicAuth"]}
        }
    }));
    let unknown: Vec<_> = issues
        .iter()
        .filter(|i| i.kind == "unknown_auth_scheme")
        .collect();
    assert_eq!(unknown.len(), 2);
    assert!(unknown.iter().all(|i| i.severity == LintSeverity::Error));
    assert_eq!(unknown[0].location, "ex#Svc");
    assert!(unknown[0].suggestion.is_some());
    assert_eq!(unknown[1].location, "ex#Op");
    assert_eq!(error_count(&issues), 2);
    assert!(fail_if_errors(&issues).is_err());
}

#[test]
fn test_optional_auth_without_auth_warns() {
    let issues = lint(json!({
        "ex#Svc": {"type": "service", "operations": [{"target": "ex#Op"}]},
        "ex#Op": {"type": "operation", "traits": {"smithy.api#optionalAuth": {}}}
    }));
    assert_eq!(kinds(&issues), vec!["optional_auth_without_auth"]);
    assert_eq!(issues[0].severity, LintSeverity::Warning);
    assert!(fail_if_errors(&issues).is_ok());
}

#[test]
fn test_all_operations_optional_is_reported_as_info() {
    let issues = lint(json!({
        "ex#Svc": {
            "type": "service",
            "operations": [{"target": "ex#A"}, {"target": "ex#B"}],
            "traits": {"smithy.api#httpApiKeyAuth": {"name": "x-api-key", "in": "header"}}
        },
        "ex#A": {"type": "operation", "traits": {"smithy.api#optionalAuth": {}}},
        "ex#B": {"type": "operation", "traits": {"smithy.api#optionalAuth": {}}}
    }));
    assert_eq!(kinds(&issues), vec!["all_operations_optional_auth"]);
    assert_eq!(issues[0].severity, LintSeverity::Info);
    assert!(issues[0].message.contains("smithy.api#httpApiKeyAuth"));
}

#[test]
fn test_bad_endpoint_parameters_are_errors() {
    let issues = lint(json!({
        "ex#Svc": {
            "type": "service",
            "traits": {
                "smithy.rules#endpointRuleSet": {
                    "version": "1.0",
                    "parameters": {
                        "Region": {"type": "String", "builtIn": "AWS::Region"},
                        "Count": {"type": "Integer"},
                        "Flag": {"type": "Boolean", "default": "yes"}
                    }
                }
            }
        }
    }));
    let bad: Vec<&str> = issues
        .iter()
        .filter(|i| i.kind == "endpoint_parameter")
        .map(|i| i.location.as_str())
        .collect();
    assert_eq!(
        bad,
        vec!["ex#Svc endpoint parameter Count", "ex#Svc endpoint parameter Flag"]
    );
}

#[test]
fn test_unknown_client_context_param_warns() {
    let issues = lint(json!({
        "ex#Svc": {
            "type": "service",
            "traits": {
                "smithy.rules#endpointRuleSet": {
                    "parameters": {"Region": {"type": "String"}}
                },
                "smithy.rules#clientContextParams": {
                    "Region": {"type": "string"},
                    "Stage": {"type": "string", "documentation": "Deployment stage"}
                }
            }
        }
    }));
    assert_eq!(kinds(&issues), vec!["unknown_client_context_param"]);
    assert!(issues[0].location.ends_with("Stage"));
}

#[test]
fn test_lint_model_file_reads_json() {
    let mut temp = NamedTempFile::with_suffix(".json").expect("create temp file");
    let model = json!({
        "smithy": "2.0",
        "shapes": {
            "ex#Svc": {"type": "service", "operations": [{"target": "ex#Op"}]},
            "ex#Op": {"type": "operation", "traits": {"smithy.api#optionalAuth": {}}}
        }
    });
    temp.write_all(model.to_string().as_bytes()).expect("write model");
    temp.flush().expect("flush");
    let issues = lint_model_file(temp.path()).expect("lint model");
    assert_eq!(kinds(&issues), vec!["optional_auth_without_auth"]);
}

#[test]
fn test_lint_service_only_reports_its_own_shapes() {
    let model = Model::from_ast(json!({
        "smithy": "2.0",
        "shapes": {
            "ex#Good": {
                "type": "service",
                "operations": [{"target": "ex#Op"}],
                "traits": {"smithy.api#httpApiKeyAuth": {"name": "k", "in": "header"}}
            },
            "ex#Bad": {
                "type": "service",
                "traits": {"smithy.api#auth": ["smithy.api#httpBasicAuth"]}
            },
            "ex#Op": {"type": "operation"}
        }
    }))
    .unwrap();

    let good = model.service("ex#Good").unwrap();
    assert!(crate::linter::lint_service(&model, good).is_empty());

    let bad = model.service("ex#Bad").unwrap();
    assert_eq!(error_count(&crate::linter::lint_service(&model, bad)), 1);
    assert_eq!(error_count(&lint_model(&model)), 1);
}
