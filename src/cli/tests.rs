#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Unit tests for CLI commands

use crate::cli::{inspect, run_cli, Cli, Commands};
use clap::Parser;
use serde_json::{json, Value};
use tempfile::tempdir;

fn write_model(dir: &std::path::Path) -> std::path::PathBuf {
    let path = dir.join("weather.json");
    let model = json!({
        "smithy": "2.0",
        "shapes": {
            "example.weather#Weather": {
                "type": "service",
                "operations": [{"target": "example.weather#GetCity"}],
                "traits": {"smithy.api#httpApiKeyAuth": {"name": "x-api-key", "in": "header"}}
            },
            "example.weather#GetCity": {"type": "operation"}
        }
    });
    std::fs::write(&path, model.to_string()).unwrap();
    path
}

#[test]
fn test_generate_command_parses_all_flags() {
    let cli = Cli::try_parse_from([
        "tscodegen-gen",
        "generate",
        "--model",
        "weather.json",
        "--config",
        "tscodegen.toml",
        "--service",
        "example.weather#Weather",
        "--package",
        "@example/weather",
        "--output",
        "out",
        "--server",
        "--dry-run",
        "--verbose",
    ])
    .unwrap();

    assert!(cli.verbose);
    match cli.command {
        Commands::Generate {
            model,
            config,
            service,
            package,
            output,
            server,
            dry_run,
        } => {
            assert_eq!(model.to_string_lossy(), "weather.json");
            assert_eq!(config.unwrap().to_string_lossy(), "tscodegen.toml");
            assert_eq!(service.as_deref(), Some("example.weather#Weather"));
            assert_eq!(package.as_deref(), Some("@example/weather"));
            assert_eq!(output.to_string_lossy(), "out");
            assert!(server);
            assert!(dry_run);
        }
        _ => panic!("Expected Generate command"),
    }
}

#[test]
fn test_generate_defaults() {
    let cli = Cli::try_parse_from(["tscodegen-gen", "generate", "-m", "weather.json"]).unwrap();
    assert!(!cli.verbose);
    match cli.command {
        Commands::Generate {
            output,
            server,
            dry_run,
            ..
        } => {
            assert_eq!(output.to_string_lossy(), "generated");
            assert!(!server);
            assert!(!dry_run);
        }
        _ => panic!("Expected Generate command"),
    }
}

#[test]
fn test_lint_command_with_flags() {
    let cli = Cli::try_parse_from([
        "tscodegen-gen",
        "lint",
        "--model",
        "weather.json",
        "--fail-on-error",
        "--errors-only",
    ])
    .unwrap();

    match cli.command {
        Commands::Lint {
            model,
            fail_on_error,
            errors_only,
        } => {
            assert_eq!(model.to_string_lossy(), "weather.json");
            assert!(fail_on_error);
            assert!(errors_only);
        }
        _ => panic!("Expected Lint command"),
    }
}

#[test]
fn test_inspect_requires_service() {
    assert!(Cli::try_parse_from(["tscodegen-gen", "inspect", "--model", "weather.json"]).is_err());
}

#[test]
fn test_inspect_reports_composition() {
    let dir = tempdir().unwrap();
    let model = write_model(dir.path());
    let report: Value =
        serde_json::from_str(&inspect(&model, "example.weather#Weather").unwrap()).unwrap();

    assert_eq!(report["service"], "example.weather#Weather");
    assert_eq!(report["effectiveAuthSchemes"], json!(["smithy.api#httpApiKeyAuth"]));
    assert_eq!(report["composition"]["client"][0]["plugin"], "HttpApiKeyAuth");
    let middleware = &report["composition"]["operations"]["example.weather#GetCity"][0];
    assert_eq!(middleware["symbol"]["name"], "getHttpApiKeyAuthPlugin");
    assert_eq!(middleware["params"]["in"], "header");

    assert!(inspect(&model, "example.weather#Missing").is_err());
}

#[test]
fn test_generate_writes_package() {
    let dir = tempdir().unwrap();
    let model = write_model(dir.path());
    let out = dir.path().join("out");
    let cli = Cli::try_parse_from([
        "tscodegen-gen",
        "generate",
        "--model",
        model.to_str().unwrap(),
        "--service",
        "example.weather#Weather",
        "--output",
        out.to_str().unwrap(),
    ])
    .unwrap();
    run_cli(cli).unwrap();

    assert!(out.join("package.json").exists());
    assert!(out.join("src/WeatherClient.ts").exists());
    assert!(out.join("src/commands/GetCityCommand.ts").exists());
    assert!(out.join("src/middleware/HttpApiKeyAuth/index.ts").exists());
}

#[test]
fn test_generate_dry_run_writes_nothing() {
    let dir = tempdir().unwrap();
    let model = write_model(dir.path());
    std::fs::write(
        dir.path().join("tscodegen.toml"),
        "service = \"example.weather#Weather\"\n",
    )
    .unwrap();
    let out = dir.path().join("out");
    let cli = Cli::try_parse_from([
        "tscodegen-gen",
        "generate",
        "--model",
        model.to_str().unwrap(),
        "--output",
        out.to_str().unwrap(),
        "--dry-run",
    ])
    .unwrap();
    run_cli(cli).unwrap();
    assert!(!out.exists());
}

#[test]
fn test_generate_with_missing_config_fails() {
    let dir = tempdir().unwrap();
    let model = write_model(dir.path());
    let cli = Cli::try_parse_from([
        "tscodegen-gen",
        "generate",
        "--model",
        model.to_str().unwrap(),
        "--config",
        dir.path().join("nope.toml").to_str().unwrap(),
    ])
    .unwrap();
    assert!(run_cli(cli).is_err());
}
