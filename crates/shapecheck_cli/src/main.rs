mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use output::OutputFormat;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "shapecheck")]
#[command(version, about = "Declarative schema validation for structured documents", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate one or more data documents against a schema
    Validate {
        /// Path to the schema file (YAML, TOML or JSON)
        schema: PathBuf,

        /// Paths to the data documents (YAML, TOML or JSON)
        #[arg(required = true)]
        data: Vec<PathBuf>,

        /// Accept root-level keys the schema does not declare
        #[arg(long)]
        open: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Check that a schema is well-formed without validating data
    Check {
        /// Path to the schema file (YAML, TOML or JSON)
        schema: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Infer a schema from a sample data document
    Init {
        /// Path to the sample document (YAML, TOML or JSON)
        data: PathBuf,

        /// Output file path (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Schema name (defaults to the sample file name)
        #[arg(short, long)]
        name: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins over --verbose when set
    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_level(true)
                .compact(),
        )
        .with(filter)
        .init();

    match cli.command {
        Commands::Validate {
            schema,
            data,
            open,
            format,
        } => commands::validate::execute(&schema, &data, open, format).await,

        Commands::Check { schema, format } => commands::check::execute(&schema, format).await,

        Commands::Init { data, output, name } => {
            commands::init::execute(&data, output.as_deref(), name).await
        }
    }
}
