use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use rapport_application::{ChatAssistantService, NoteAggregationService};
use rapport_core::credential::{BearerToken, CredentialProvider, StaticCredentialProvider};
use rapport_core::timestamp::parse_wire_date;
use rapport_infrastructure::paths::ServiceType;
use rapport_infrastructure::{ConfigService, RapportPaths, RestBackend, SecretServiceImpl};
use std::path::PathBuf;
use std::sync::Arc;

mod commands;
mod logging;

#[derive(Parser)]
#[command(name = "rapport")]
#[command(about = "Rapport CLI - client notes and AI assistant", long_about = None)]
struct Cli {
    /// Backend base URL (overrides config.toml and RAPPORT_API_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// API token (overrides secret.json and RAPPORT_API_TOKEN)
    #[arg(long, global = true)]
    token: Option<String>,

    /// Directory holding config.toml and secret.json
    #[arg(long, global = true)]
    config_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the merged notes for a client on one day
    Notes {
        /// Client identifier
        subject_id: String,
        /// Day to load (YYYY-MM-DD), defaults to today
        #[arg(long, value_parser = parse_date)]
        date: Option<NaiveDate>,
        /// Print the collection as JSON
        #[arg(long)]
        json: bool,
        /// Put each sentence of a note on its own paragraph
        #[arg(long)]
        reflow: bool,
    },
    /// Ask the AI assistant a question
    Chat {
        message: String,
        /// Scope the question to a client
        #[arg(long)]
        client_id: Option<String>,
    },
    /// Reflow text into one sentence per paragraph
    Reflow { text: String },
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    parse_wire_date(raw).ok_or_else(|| format!("'{}' is not a YYYY-MM-DD date", raw))
}

fn credentials(token: Option<&str>, paths: &RapportPaths) -> Result<Arc<dyn CredentialProvider>> {
    let provider: Arc<dyn CredentialProvider> = match token {
        Some(token) => Arc::new(StaticCredentialProvider::new(BearerToken::new(token)?)),
        None => Arc::new(SecretServiceImpl::new(paths.clone())),
    };
    Ok(provider)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = RapportPaths::new(cli.config_dir.as_deref());
    let mut config = ConfigService::new(paths.clone())
        .get_config()
        .context("Failed to load configuration")?;
    if let Some(base_url) = &cli.base_url {
        config.backend.base_url = base_url.clone();
    }

    let logs_dir = paths.get_path(ServiceType::Logs).ok();
    let _log_guard = logging::init(&config.logging, logs_dir.as_deref());
    tracing::debug!("[Startup] Backend: {}", config.backend.base_url);

    match cli.command {
        Commands::Notes {
            subject_id,
            date,
            json,
            reflow,
        } => {
            let backend = Arc::new(RestBackend::from_settings(&config.backend)?);
            let service =
                NoteAggregationService::new(backend, credentials(cli.token.as_deref(), &paths)?);
            let date = date.unwrap_or_else(|| Local::now().date_naive());
            commands::notes::run(
                &service,
                &subject_id,
                date,
                commands::notes::NotesOptions { json, reflow },
            )
            .await?;
        }
        Commands::Chat { message, client_id } => {
            let backend = Arc::new(RestBackend::from_settings(&config.backend)?);
            let service =
                ChatAssistantService::new(backend, credentials(cli.token.as_deref(), &paths)?);
            commands::chat::run(&service, &message, client_id.as_deref()).await?;
        }
        Commands::Reflow { text } => commands::reflow::run(&text),
    }

    Ok(())
}
