//! `product-context` command line: `extract` builds the artifacts, `info`
//! summarizes a sources document.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod extract;
mod info;

/// Extract sitemaps, user flows, data models and folder topology from repository signals
#[derive(Parser)]
#[command(name = "product-context", author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log pipeline progress at DEBUG level on stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the four product context artifacts from a sources document
    Extract(extract::ExtractArgs),

    /// Summarize the signals in a sources document without extracting
    Info(info::InfoArgs),
}

impl Commands {
    fn run(self) -> Result<()> {
        match self {
            Commands::Extract(args) => extract::run(args),
            Commands::Info(args) => info::run(args),
        }
    }
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    cli.command.run()
}

/// Directives from `RUST_LOG` win over the level picked by `--verbose`.
fn log_filter(verbose: bool) -> EnvFilter {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    EnvFilter::from_default_env().add_directive(level.into())
}

/// Logs go to stderr so a bundle printed on stdout stays valid JSON.
fn init_tracing(verbose: bool) {
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(log_filter(verbose))
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::path::Path;

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn verbose_flag_is_accepted_after_the_subcommand() {
        let cli = Cli::try_parse_from([
            "product-context",
            "extract",
            "--input",
            "sources.json",
            "-p",
            "acme",
            "-v",
        ])
        .expect("valid arguments");
        assert!(cli.verbose);
        let Commands::Extract(args) = cli.command else {
            panic!("expected extract");
        };
        assert_eq!(args.input, Path::new("sources.json"));
        assert_eq!(args.product_id.as_deref(), Some("acme"));
        assert!(args.output_dir.is_none());
    }

    #[test]
    fn info_requires_an_input_file() {
        let err = Cli::try_parse_from(["product-context", "info"]).err().expect("missing --input");
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }
}
