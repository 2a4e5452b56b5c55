//! Campus CLI
//!
//! Command-line interface for campus event registration forms.
//!
//! # Usage
//!
//! ```bash
//! campus form show 7
//! campus form add 7 --label "Jumlah tamu" --type number --required --parent 1 --value Ya
//! campus register seminar-nasional -a 1=Ya -a 2=3
//! campus preview --schema-file form.json -a 1=Tidak --format json
//! campus status 7
//! ```

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use campus_forms::{FieldId, FieldType};

mod api;
mod commands;
mod config;
mod output;

#[derive(Parser)]
#[command(name = "campus")]
#[command(version)]
#[command(about = "Campus event registration forms", long_about = None)]
struct Cli {
    /// API endpoint URL
    #[arg(long, env = "CAMPUS_API_URL")]
    api_url: Option<String>,

    /// Bearer token for authentication
    #[arg(long, env = "CAMPUS_TOKEN")]
    token: Option<String>,

    /// Output format
    #[arg(long, short)]
    format: Option<output::OutputFormat>,

    /// Profile name from config file
    #[arg(long, short)]
    profile: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage an event's registration form
    Form {
        #[command(subcommand)]
        action: FormCommands,
    },
    /// Fill in and submit an event's registration form
    Register {
        /// Event slug
        slug: String,
        /// Answer as FIELD_ID=VALUE, applied in the order given
        #[arg(short, long = "answer", value_parser = commands::parse_answer)]
        answers: Vec<(FieldId, String)>,
        /// Validate and show the payload without submitting
        #[arg(long)]
        dry_run: bool,
    },
    /// Evaluate answers against a form schema file, offline
    Preview {
        /// JSON file holding the form fields as the API returns them
        #[arg(long)]
        schema_file: PathBuf,
        /// Answer as FIELD_ID=VALUE, applied in the order given
        #[arg(short, long = "answer", value_parser = commands::parse_answer)]
        answers: Vec<(FieldId, String)>,
    },
    /// Check whether you are registered for an event
    Status { event_id: u64 },
    /// Configure CLI
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum FormCommands {
    /// Show the fields of an event's form
    Show { event_id: u64 },
    /// Add a question to an event's form
    Add {
        event_id: u64,
        #[arg(long)]
        label: String,
        #[arg(long = "type", default_value = "text")]
        field_type: FieldType,
        /// Comma-separated choices for a select field
        #[arg(long)]
        options: Option<String>,
        #[arg(long)]
        required: bool,
        /// Show only when this select field...
        #[arg(long, requires = "value")]
        parent: Option<u64>,
        /// ...has this answer
        #[arg(long, requires = "parent")]
        value: Option<String>,
    },
    /// Remove a question
    Remove { field_id: u64 },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Set configuration value
    Set { key: String, value: String },
    /// Get configuration value
    Get { key: String },
    /// List all configuration
    List,
    /// Initialize configuration
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = match config::Config::load(cli.profile.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!(error = %e, "ignoring unreadable config file");
            config::Config::default()
        }
    };
    let api_url = cli
        .api_url
        .or_else(|| config.api_url.clone())
        .unwrap_or_else(|| config::DEFAULT_API_URL.to_string());
    let token = cli.token.or_else(|| config.token.clone());
    let format = cli
        .format
        .or_else(|| output::OutputFormat::from_config(config.default_format.as_deref()))
        .unwrap_or(output::OutputFormat::Table);

    let client = Arc::new(api::ApiClient::new(&api_url, token.as_deref()));

    let result = match cli.command {
        Commands::Form { action } => commands::form::handle(action, client, format).await,
        Commands::Register { slug, answers, dry_run } => {
            commands::register::handle(&slug, &answers, dry_run, client, format).await
        }
        Commands::Preview { schema_file, answers } => {
            commands::preview::handle(&schema_file, &answers, format)
        }
        Commands::Status { event_id } => commands::status::handle(event_id, client).await,
        Commands::Config { action } => commands::config::handle(action, cli.profile.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}
