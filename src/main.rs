use anyhow::Result;
use clap::Parser;
use clap_verbosity_flag::Verbosity;
use console::style;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_log::AsTrace;

mod copr;
mod core;
mod error;
mod settings;

use crate::settings::Settings;

// sysexits.h
const EX_SOFTWARE: u8 = 70;
const EX_TEMPFAIL: u8 = 75;

#[derive(Debug, Parser)]
#[command(name = "coprbuild", author, version, about, long_about = None)] // Read from `Cargo.toml`
struct Cli {
    /// COPR project, `[owner/]name`
    project: String,
    /// SRPM file to build
    #[arg(value_hint = clap::ValueHint::FilePath)]
    srpm: String,
    /// COPR config with credentials [default: ~/.config/copr]
    #[arg(short, long, env = "COPR_CONFIG", value_hint = clap::ValueHint::FilePath)]
    config: Option<PathBuf>,
    #[command(flatten)]
    verbose: Verbosity,
}

#[derive(Debug)]
enum Outcome {
    Built(String),
    Interrupted,
    Failed(anyhow::Error),
}

impl From<Result<String>> for Outcome {
    fn from(result: Result<String>) -> Self {
        match result {
            Ok(url) => Outcome::Built(url),
            Err(e) => Outcome::Failed(e),
        }
    }
}

impl Outcome {
    fn code(&self) -> u8 {
        match self {
            Outcome::Built(_) => 0,
            Outcome::Interrupted => EX_TEMPFAIL,
            Outcome::Failed(_) => EX_SOFTWARE,
        }
    }

    /// The single line printed to stdout, if any.
    fn line(&self) -> Option<String> {
        match self {
            Outcome::Built(url) => Some(style(url).bold().blue().to_string()),
            Outcome::Interrupted => None,
            Outcome::Failed(e) => Some(format!("Error: {e:#}")),
        }
    }
}

impl From<Outcome> for ExitCode {
    fn from(outcome: Outcome) -> Self {
        if let Some(line) = outcome.line() {
            println!("{line}");
        }

        ExitCode::from(outcome.code())
    }
}

async fn run(cli: &Cli) -> Result<String> {
    let config_path = cli.config.clone().unwrap_or_else(Settings::default_path);
    let settings = Settings::load(&config_path)?;

    let client = copr::Client::new(&settings)?;

    Ok(client.build(&cli.project, &cli.srpm).await?)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(cli.verbose.log_level_filter().as_trace())
        .init();

    let outcome = tokio::select! {
        result = run(&cli) => Outcome::from(result),
        Ok(()) = tokio::signal::ctrl_c() => Outcome::Interrupted,
    };

    outcome.into()
}

#[cfg(test)]
mod tests {
    use super::{Outcome, EX_SOFTWARE, EX_TEMPFAIL};
    use crate::error::{ConfigError, Error};

    #[test]
    fn interrupted_outcome() {
        let outcome = Outcome::Interrupted;

        assert_eq!(outcome.code(), EX_TEMPFAIL);
        assert_eq!(outcome.code(), 75);
        assert_eq!(outcome.line(), None);
    }

    #[test]
    fn failed_outcome() {
        let err = Error::Build {
            srpm: "foo-1.0-1.src.rpm".to_string(),
            status: 500,
        };
        let outcome = Outcome::from(Err(err.into()));

        assert_eq!(outcome.code(), EX_SOFTWARE);
        assert_eq!(
            outcome.line().as_deref(),
            Some("Error: Build SRPM foo-1.0-1.src.rpm failed with code 500.")
        );
    }

    #[test]
    fn failed_outcome_with_cause() {
        let err = Error::from(ConfigError::MissingOption("token"));
        let outcome = Outcome::Failed(anyhow::Error::new(err).context("cannot submit build"));

        assert_eq!(
            outcome.line().as_deref(),
            Some("Error: cannot submit build: COPR config has no 'token' option.")
        );
    }

    #[test]
    fn built_outcome() {
        let outcome = Outcome::from(Ok("https://example/build/99".to_string()));

        assert_eq!(outcome.code(), 0);
        assert!(outcome.line().unwrap().contains("https://example/build/99"));
    }
}
