//! # Model Linter Module
//!
//! Checks a loaded model for declarations the generator would either
//! reject or silently ignore.
//!
//! ## Checks Performed
//!
//! | Kind | Severity |
//! |------|----------|
//! | `unknown_auth_scheme` | Error |
//! | `endpoint_parameter` | Error |
//! | `optional_auth_without_auth` | Warning |
//! | `unknown_client_context_param` | Warning |
//! | `all_operations_optional_auth` | Info |
//!
//! Generation lints only the target service and refuses to run while it
//! has an error-level issue. `endpoint_parameter` issues are left to the
//! pass itself, which reports the underlying compile error.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tscodegen::linter::{lint_model_file, print_lint_issues};
//!
//! let issues = lint_model_file("weather.json".as_ref())?;
//! print_lint_issues(&issues);
//! ```

use std::fmt;
use std::path::Path;

use crate::auth::all_operations_optional_auth;
use crate::endpoint::ParameterDescriptor;
use crate::model::{load_model, Model, ServiceShape};

#[cfg(test)]
mod tests;

/// Severity level for lint issues
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LintSeverity {
    /// Error - Will cause code generation to fail
    Error,
    /// Warning - Generation continues but the output may surprise
    Warning,
    /// Info - Explains a generation decision
    Info,
}

impl fmt::Display for LintSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LintSeverity::Error => write!(f, "error"),
            LintSeverity::Warning => write!(f, "warning"),
            LintSeverity::Info => write!(f, "info"),
        }
    }
}

/// A lint issue found in a model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintIssue {
    /// Where the issue occurred (a shape id, optionally with a trait or parameter)
    pub location: String,
    /// Severity of the issue
    pub severity: LintSeverity,
    /// Type of lint issue (e.g., "unknown_auth_scheme")
    pub kind: String,
    /// Human-readable description of the problem
    pub message: String,
    /// Optional suggestion for how to fix it
    pub suggestion: Option<String>,
}

impl LintIssue {
    /// Create a new lint issue
    pub fn new(
        location: impl Into<String>,
        severity: LintSeverity,
        kind: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        LintIssue {
            location: location.into(),
            severity,
            kind: kind.into(),
            message: message.into(),
            suggestion: None,
        }
    }

    /// Add a suggestion for fixing the issue
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

/// Load a model file and lint it
pub fn lint_model_file(model_path: &Path) -> anyhow::Result<Vec<LintIssue>> {
    let model = load_model(model_path)?;
    Ok(lint_model(&model))
}

/// Kind reported for a rule-set parameter that fails to compile.
pub const ENDPOINT_PARAMETER: &str = "endpoint_parameter";

/// Lint every service of a loaded model. Issues come out grouped by
/// service, in service id order.
pub fn lint_model(model: &Model) -> Vec<LintIssue> {
    model
        .services()
        .flat_map(|service| lint_service(model, service))
        .collect()
}

/// Lint one service and everything it contains.
pub fn lint_service(model: &Model, service: &ServiceShape) -> Vec<LintIssue> {
    let mut issues = Vec::new();
    lint_auth(model, service, &mut issues);
    lint_endpoint_rule_set(service, &mut issues);
    issues
}

fn lint_auth(model: &Model, service: &ServiceShape, issues: &mut Vec<LintIssue>) {
    let applied = model.auth_schemes(service);

    if let Some(order) = service.traits.auth() {
        for scheme in order.iter().filter(|s| !applied.contains(s)) {
            issues.push(
                LintIssue::new(
                    service.id.as_str(),
                    LintSeverity::Error,
                    "unknown_auth_scheme",
                    format!("@auth lists {scheme}, which is not applied to the service"),
                )
                .with_suggestion(format!("Apply {scheme} to {} or remove it from @auth", service.id)),
            );
        }
    }

    let operations = model.contained_operations(service);
    for op in &operations {
        if let Some(order) = op.traits.auth() {
            for scheme in order.iter().filter(|s| !applied.contains(s)) {
                issues.push(LintIssue::new(
                    op.id.as_str(),
                    LintSeverity::Error,
                    "unknown_auth_scheme",
                    format!(
                        "@auth lists {scheme}, which is not applied to service {}",
                        service.id
                    ),
                ));
            }
        }

        if op.traits.optional_auth()
            && model.effective_operation_auth_schemes(service, op).is_empty()
        {
            issues.push(
                LintIssue::new(
                    op.id.as_str(),
                    LintSeverity::Warning,
                    "optional_auth_without_auth",
                    "@optionalAuth has no effect on an operation without auth schemes",
                )
                .with_suggestion("Remove @optionalAuth or give the operation an auth scheme"),
            );
        }
    }

    let effective = model.effective_auth_schemes(service);
    if !operations.is_empty() && !effective.is_empty() && all_operations_optional_auth(model, service)
    {
        let schemes: Vec<&str> = effective.iter().map(|s| s.as_str()).collect();
        issues.push(LintIssue::new(
            service.id.as_str(),
            LintSeverity::Info,
            "all_operations_optional_auth",
            format!(
                "every operation carries @optionalAuth, so no client config is generated for {}",
                schemes.join(", ")
            ),
        ));
    }
}

fn lint_endpoint_rule_set(service: &ServiceShape, issues: &mut Vec<LintIssue>) {
    let Some(rule_set) = service.traits.endpoint_rule_set() else {
        if let Some(params) = service.traits.client_context_params() {
            for name in params.keys() {
                issues.push(unknown_client_context_param(service, name));
            }
        }
        return;
    };

    for (name, node) in &rule_set.parameters {
        if let Err(err) = ParameterDescriptor::compile(name, node) {
            issues.push(LintIssue::new(
                format!("{} endpoint parameter {name}", service.id),
                LintSeverity::Error,
                ENDPOINT_PARAMETER,
                err.to_string(),
            ));
        }
    }

    if let Some(params) = service.traits.client_context_params() {
        for name in params
            .keys()
            .filter(|name| !rule_set.parameters.contains_key(name.as_str()))
        {
            issues.push(unknown_client_context_param(service, name));
        }
    }
}

fn unknown_client_context_param(service: &ServiceShape, name: &str) -> LintIssue {
    LintIssue::new(
        format!("{} client context param {name}", service.id),
        LintSeverity::Warning,
        "unknown_client_context_param",
        format!("client context param `{name}` is not declared by the endpoint rule set"),
    )
    .with_suggestion(format!("Declare `{name}` in the rule set parameters"))
}

pub fn error_count(issues: &[LintIssue]) -> usize {
    issues
        .iter()
        .filter(|i| i.severity == LintSeverity::Error)
        .count()
}

/// Print lint issues in a formatted way
pub fn print_lint_issues(issues: &[LintIssue]) {
    if issues.is_empty() {
        println!("✅ No lint issues found!");
        return;
    }

    let count = |severity| issues.iter().filter(|i| i.severity == severity).count();
    println!("\n📋 Lint Results:");
    println!(
        "   {} error(s), {} warning(s), {} info(s)\n",
        count(LintSeverity::Error),
        count(LintSeverity::Warning),
        count(LintSeverity::Info)
    );

    for (severity, heading) in [
        (LintSeverity::Error, "❌ Errors (must fix):"),
        (LintSeverity::Warning, "⚠️  Warnings (should fix):"),
        (LintSeverity::Info, "ℹ️  Info:"),
    ] {
        let group: Vec<_> = issues.iter().filter(|i| i.severity == severity).collect();
        if group.is_empty() {
            continue;
        }
        println!("{heading}");
        for issue in group {
            println!("   [{}] {}", issue.kind, issue.location);
            println!("      {}", issue.message);
            if let Some(suggestion) = &issue.suggestion {
                println!("      💡 Suggestion: {}", suggestion);
            }
        }
        println!();
    }
}

/// Print the issues and fail if any of them is an error
pub fn fail_if_errors(issues: &[LintIssue]) -> anyhow::Result<()> {
    let errors = error_count(issues);
    if errors > 0 {
        print_lint_issues(issues);
        anyhow::bail!("model has {errors} lint error(s)");
    }
    Ok(())
}
