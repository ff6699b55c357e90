mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use formcheck_core::AbsentValuePolicy;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "formcheck")]
#[command(version, about = "Validation engine for array-shaped form data", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a form data snapshot against a schema
    Validate {
        /// Path to the schema file (YAML, TOML or JSON)
        schema: String,

        /// Path to the form data file (JSON, YAML or TOML)
        data: String,

        /// Record every failed rule per field instead of only the first
        #[arg(short, long)]
        all_criteria: bool,

        /// How absent values take part in uniqueness: collide, exempt
        #[arg(long)]
        absent_values: Option<AbsentValuePolicy>,

        /// Output format: text, json
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Check a schema without validating any data
    Check {
        /// Path to the schema file (YAML, TOML or JSON)
        schema: String,

        /// Output format: text, json
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Write a starter schema with one list and one required, unique field
    Init {
        /// Output file path (defaults to stdout)
        #[arg(short, long)]
        output: Option<String>,

        /// Name of the list
        #[arg(short, long, default_value = "items")]
        list: String,

        /// Name of the required, unique field
        #[arg(long, default_value = "name")]
        field: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let log_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_level(true)
                .compact(),
        )
        .with(tracing_subscriber::filter::LevelFilter::from_level(
            log_level,
        ))
        .init();

    // Execute command
    match cli.command {
        Commands::Validate {
            schema,
            data,
            all_criteria,
            absent_values,
            format,
        } => commands::validate::execute(&schema, &data, all_criteria, absent_values, &format),

        Commands::Check { schema, format } => commands::check::execute(&schema, &format),

        Commands::Init {
            output,
            list,
            field,
        } => commands::init::execute(output.as_deref(), &list, &field),
    }
}
