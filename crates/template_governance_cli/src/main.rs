//! CLI smoke probe for `template_governance`.
//!
//! # Responsibility
//! - Verify core crate linkage from a tiny executable.
//! - Expose version parsing, comparison, bumping and range checks for quick
//!   manual checks.
//!
//! Exit codes: 0 success, 1 domain error, 2 usage error.

use std::cmp::Ordering;
use std::process::ExitCode;
use template_governance::{
    bump_version, compare_versions, core_version, parse_version, satisfies_version, VersionBump,
};

const USAGE: &str = "usage:
  template_governance_cli
  template_governance_cli parse <version>
  template_governance_cli compare <a> <b>
  template_governance_cli bump <version> <major|minor|patch>
  template_governance_cli satisfies <version> <range>";

enum Failure {
    Usage(String),
    Domain(String),
}

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    match run(&args) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(Failure::Domain(message)) => {
            eprintln!("error: {message}");
            ExitCode::from(1)
        }
        Err(Failure::Usage(message)) => {
            eprintln!("{message}\n{USAGE}");
            ExitCode::from(2)
        }
    }
}

fn run(args: &[String]) -> Result<String, Failure> {
    let domain = |err: template_governance::VersionError| Failure::Domain(err.to_string());
    let args: Vec<&str> = args.iter().map(String::as_str).collect();

    match args.as_slice() {
        [] => Ok(format!("template_governance version={}", core_version())),
        ["parse", raw] => {
            let version = parse_version(raw).map_err(domain)?;
            Ok(format!(
                "major={} minor={} patch={} prerelease={} build={}",
                version.major,
                version.minor,
                version.patch,
                version.prerelease.as_deref().unwrap_or("-"),
                version.build.as_deref().unwrap_or("-")
            ))
        }
        ["compare", a, b] => {
            let a = parse_version(a).map_err(domain)?;
            let b = parse_version(b).map_err(domain)?;
            Ok(match compare_versions(&a, &b) {
                Ordering::Less => "less",
                Ordering::Equal => "equal",
                Ordering::Greater => "greater",
            }
            .to_string())
        }
        ["bump", raw, kind] => {
            let version = parse_version(raw).map_err(domain)?;
            let kind: VersionBump = kind.parse().map_err(Failure::Usage)?;
            Ok(bump_version(&version, kind).to_string())
        }
        ["satisfies", raw, range] => {
            let version = parse_version(raw).map_err(domain)?;
            let matched = satisfies_version(&version, range).map_err(domain)?;
            Ok(matched.to_string())
        }
        [command, ..] => Err(Failure::Usage(format!(
            "unknown command or wrong arguments: {command}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::{run, Failure};

    fn call(args: &[&str]) -> Result<String, Failure> {
        let owned: Vec<String> = args.iter().map(|arg| arg.to_string()).collect();
        run(&owned)
    }

    #[test]
    fn prints_version_without_arguments() {
        let output = call(&[]).ok().expect("no-arg call succeeds");
        assert!(output.starts_with("template_governance version="));
    }

    #[test]
    fn runs_each_command() {
        assert_eq!(call(&["compare", "1.2.0", "1.10.0"]).ok().as_deref(), Some("less"));
        assert_eq!(call(&["bump", "1.2.3", "major"]).ok().as_deref(), Some("2.0.0"));
        assert_eq!(call(&["satisfies", "1.2.3", "~1.2.0"]).ok().as_deref(), Some("true"));
        assert!(call(&["parse", "1.2.3-rc.1"])
            .ok()
            .expect("parse succeeds")
            .contains("prerelease=rc.1"));
    }

    #[test]
    fn distinguishes_usage_and_domain_errors() {
        assert!(matches!(call(&["parse", "x"]), Err(Failure::Domain(_))));
        assert!(matches!(call(&["bump", "1.0.0", "huge"]), Err(Failure::Usage(_))));
        assert!(matches!(call(&["launch"]), Err(Failure::Usage(_))));
    }
}
