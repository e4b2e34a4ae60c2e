//! Library integration tests.

use std::fs;
use std::sync::Arc;

use daktari::check::{Check, CheckStatus, Os};
use daktari::checks::npmrc::{NpmrcScope, NpmrcScopeConfigured};
use daktari::checks::{build_checks, BinaryInstalled};
use daktari::config::{load_config, validate};
use daktari::runner::{CheckOutcome, CheckRunner};
use daktari::shell::CommandRunner;
use daktari::DaktariError;
use tempfile::TempDir;

/// Answers every probe the same way.
struct StaticRunner(bool);

impl CommandRunner for StaticRunner {
    fn can_run(&self, _command: &str) -> bool {
        self.0
    }
}

#[test]
fn error_types_are_public() {
    let err = DaktariError::UnknownCheck {
        name: "npmrc.nope".into(),
    };
    assert!(err.to_string().contains("npmrc.nope"));
}

#[test]
fn result_type_alias_is_public() {
    fn test_fn() -> daktari::Result<()> {
        Ok(())
    }
    assert!(test_fn().is_ok());
}

#[test]
fn cli_types_are_public() {
    use clap::Parser;
    use daktari::cli::{Cli, Commands};

    let cli = Cli::parse_from(["daktari", "check", "--json"]);
    if let Some(Commands::Check(args)) = cli.command {
        assert!(args.json);
    } else {
        panic!("Expected Check command");
    }
}

#[test]
fn config_to_report_end_to_end() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join(".daktari.yml"),
        r#"
checks:
  - check: npmrc.githubTokenValid
    scope: acme
    test_package: ui
  - check: pnpm.installed
"#,
    )
    .unwrap();

    let config = load_config(temp.path(), None).unwrap();
    validate(&config).unwrap();

    let checks = build_checks(&config.checks, Arc::new(StaticRunner(true)));
    let report = CheckRunner::new(checks).unwrap().with_os(Os::Ubuntu).run();

    // npmrc.scopeConfigured isn't configured, so the token probe runs unblocked
    assert!(report.is_success());
    assert_eq!(report.checks.len(), 2);
}

#[test]
fn npmrc_check_against_explicit_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join(".npmrc");
    fs::write(&path, "@acme:registry=https://npm.pkg.github.com\n").unwrap();

    let scope = NpmrcScope::new("acme", "https://npm.pkg.github.com").with_auth_token();
    let check = NpmrcScopeConfigured::with_path(scope, None, path);

    let result = check.evaluate();
    assert_eq!(result.status, CheckStatus::Fail);
    assert!(result.summary.ends_with("missing auth token for npm.pkg.github.com"));
}

#[test]
fn failing_scope_blocks_token_probe() {
    let temp = TempDir::new().unwrap();
    let scope = NpmrcScope::new("acme", "https://npm.pkg.github.com");
    let checks: Vec<Box<dyn Check>> = vec![
        Box::new(daktari::checks::NpmrcGithubTokenValid::new(
            "acme",
            "ui",
            Arc::new(StaticRunner(true)),
        )),
        Box::new(NpmrcScopeConfigured::with_path(
            scope,
            None,
            temp.path().join("missing-npmrc"),
        )),
        Box::new(BinaryInstalled::pnpm(Arc::new(StaticRunner(false)))),
    ];

    let report = CheckRunner::new(checks).unwrap().with_os(Os::MacOs).run();

    assert_eq!(report.failed(), 2);
    assert_eq!(report.skipped(), 1);
    let pnpm = report.get("pnpm.installed").unwrap();
    assert_eq!(pnpm.suggestion.as_deref(), Some("brew install pnpm"));
    assert!(matches!(
        report.get("npmrc.githubTokenValid").unwrap().outcome,
        CheckOutcome::Skipped { .. }
    ));
}
