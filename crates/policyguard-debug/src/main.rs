use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;

mod check;
mod schema;

#[derive(Parser)]
#[command(name = "policyguard-debug")]
#[command(about = "Diagnostics for policyguard - see why a policy document is rejected")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a policy document and explain the verdict
    Check {
        /// Policy JSON file to check
        policy: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },

    /// Print the structural schema policy documents must satisfy
    Schema,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Text,
    Json,
}

/// Run a command; `false` means the checked policy was rejected.
fn run(cli: Cli) -> Result<bool> {
    match cli.command {
        Commands::Check { policy, format } => check::check(&policy, format),
        Commands::Schema => {
            schema::schema()?;
            Ok(true)
        }
    }
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Logs go to stderr so JSON output on stdout stays parseable
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    if run(cli)? {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
