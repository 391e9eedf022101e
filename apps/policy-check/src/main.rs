//! `policy-check`: evaluate one sharing-policy decision, or run the contact
//! handshake end to end against an in-memory store.

mod config;
mod demo;
mod eval;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;

#[derive(Parser, Debug)]
#[command(name = "policy-check", version, about)]
struct Cli {
    /// YAML configuration file (`policy` and `todo_sharing` sections).
    #[arg(long, short, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Evaluate one access. Prints ALLOW (exit 0) or DENY (exit 2).
    Eval(eval::EvalArgs),
    /// Run the two-user contact handshake and sharing scenario.
    Demo,
}

/// Install the stderr subscriber; `RUST_LOG` overrides the `info` default.
fn init_logging() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("installing the log subscriber: {e}"))
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_logging()?;

    let cfg = AppConfig::load(cli.config.as_deref())?;
    tracing::debug!(?cfg, "configuration loaded");

    match cli.command {
        Command::Eval(args) => eval::run(&cfg, args).await,
        Command::Demo => {
            demo::run(&cfg).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn logging_is_installed_once() {
        assert!(init_logging().is_ok());
        let again = init_logging().unwrap_err();
        assert!(again.to_string().starts_with("installing the log subscriber"));
    }
}
