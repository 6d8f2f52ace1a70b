//! # ria CLI entry point
//!
//! Parses command-line arguments, initialises tracing and dispatches to the
//! subcommand handlers of `ria_cli`.

use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use ria_cli::evaluate::{run_evaluate, EvaluateArgs};
use ria_cli::questionnaire::{run_describe, run_list, DescribeArgs};

/// RIA verifier: guided EU AI Act classification questionnaires.
#[derive(Parser, Debug)]
#[command(name = "ria", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    /// Ignored when RUST_LOG is set.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Log line format.
    #[arg(long, value_enum, default_value_t = LogFormat::Text, global = true)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the registered questionnaires.
    List,

    /// Print the questions, catalogs and rules of a questionnaire.
    Describe(DescribeArgs),

    /// Replay an event script and print the resulting classification.
    Evaluate(EvaluateArgs),
}

fn init_tracing(verbose: u8, format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    });

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.log_format);

    let result = match &cli.command {
        Commands::List => run_list(),
        Commands::Describe(args) => run_describe(args),
        Commands::Evaluate(args) => run_evaluate(args),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            eprintln!("error: {e:#}");
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use ria_cli::output::OutputFormat;
    use ria_questionnaires::QuestionnaireKind;

    use super::*;

    #[test]
    fn cli_parse_list() {
        let cli = Cli::try_parse_from(["ria", "list"]).unwrap();
        assert!(matches!(cli.command, Commands::List));
        assert_eq!(cli.log_format, LogFormat::Text);
    }

    #[test]
    fn cli_parse_describe_with_format() {
        let cli = Cli::try_parse_from(["ria", "describe", "risk_system", "--format", "yaml"]).unwrap();
        if let Commands::Describe(args) = cli.command {
            assert_eq!(args.kind, QuestionnaireKind::RiskSystem);
            assert_eq!(args.format, OutputFormat::Yaml);
        } else {
            panic!("expected describe");
        }
    }

    #[test]
    fn cli_parse_evaluate() {
        let cli = Cli::try_parse_from([
            "ria",
            "--log-format",
            "json",
            "evaluate",
            "role_model",
            "--script",
            "answers.yaml",
            "--require-complete",
        ])
        .unwrap();
        assert_eq!(cli.log_format, LogFormat::Json);
        if let Commands::Evaluate(args) = cli.command {
            assert_eq!(args.kind, QuestionnaireKind::RoleModel);
            assert_eq!(args.script, PathBuf::from("answers.yaml"));
            assert!(args.require_complete);
            assert_eq!(args.format, OutputFormat::Text);
        } else {
            panic!("expected evaluate");
        }
    }

    #[test]
    fn cli_rejects_unknown_questionnaire() {
        assert!(Cli::try_parse_from(["ria", "describe", "risk"]).is_err());
    }
}
