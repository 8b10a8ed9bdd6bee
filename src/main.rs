// src/main.rs
mod utils;
mod register;
mod extractors;
mod storage;

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use extractors::RegisterExtractor;
use register::client::{ClientConfig, RegisterClient, DEFAULT_REGISTER_URL};
use register::dates::parse_request_date;
use register::models::{RawDocument, RegisterResponse};
use storage::StorageManager;
use utils::AppError;

/// Command Line Interface for the FMCSA Register extractor
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Register date: YYYY-MM-DD, DD-MMM-YY or DD/MM/YY (defaults to today)
    #[arg(short, long)]
    date: Option<String>,

    /// Extract from a saved register HTML file instead of fetching
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Register endpoint
    #[arg(long, env = "REGISTER_URL", default_value = DEFAULT_REGISTER_URL)]
    url: String,

    /// Request timeout in seconds
    #[arg(long, env = "REGISTER_TIMEOUT_SECS", default_value = "30")]
    timeout_secs: u64,

    /// Retries after a failed transport attempt
    #[arg(long, env = "REGISTER_RETRIES", default_value = "2")]
    retries: u32,

    /// Directory to persist extracted entries in (merged per date)
    #[arg(short, long)]
    output_dir: Option<String>,

    /// Debug mode - save raw and annotated register HTML under <output-dir>/debug
    #[arg(long)]
    debug: bool,

    /// Pretty-print the JSON response
    #[arg(long)]
    pretty: bool,
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // 1. Setup Logging (reads RUST_LOG env var)
    utils::logging::setup_logging();

    // 2. Parse CLI Arguments
    let args = Args::parse();
    tracing::info!("Starting processing for args: {:?}", args);

    let outcome = run(&args).await;

    // 3. Always answer with a JSON body, success or not
    let response = match &outcome {
        Ok(result) => RegisterResponse::success(result),
        Err(e) => {
            tracing::error!("Register extraction failed: {}", e);
            RegisterResponse::failure(e)
        }
    };
    print_response(&response, args.pretty)?;

    outcome.map(|_| ())
}

async fn run(args: &Args) -> Result<register::models::ExtractionResult, AppError> {
    let source_date = args
        .date
        .clone()
        .unwrap_or_else(|| chrono::Local::now().date_naive().format("%Y-%m-%d").to_string());
    let date = parse_request_date(&source_date)?;

    // Fetch (or load) the register page
    let document = match &args.input {
        Some(path) => {
            tracing::info!("Reading register HTML from {}", path.display());
            RawDocument::new(std::fs::read_to_string(path)?)
        }
        None => {
            let client = RegisterClient::new(ClientConfig {
                url: args.url.clone(),
                timeout: Duration::from_secs(args.timeout_secs),
                retries: args.retries,
                ..ClientConfig::default()
            })?;
            client.fetch_register(date).await?
        }
    };
    tracing::info!("Register document is {} bytes", document.html.len());

    if args.debug {
        match &args.output_dir {
            Some(dir) => {
                let debug_dir = Path::new(dir).join("debug");
                if let Err(e) = utils::html_debug::save_register_debug(&document.html, &debug_dir) {
                    tracing::warn!("Failed to create debug HTML: {}", e);
                }
            }
            None => tracing::warn!("--debug needs --output-dir; skipping debug dump"),
        }
    }

    let result = RegisterExtractor::new().extract(&document, &source_date)?;

    if let Some(dir) = &args.output_dir {
        let storage = StorageManager::new(dir)?;
        let path = storage.save_result(date, &result)?;
        tracing::info!("Saved register snapshot to: {}", path.display());
    }

    Ok(result)
}

fn print_response(response: &RegisterResponse, pretty: bool) -> Result<(), AppError> {
    let body = if pretty {
        serde_json::to_string_pretty(response)
    } else {
        serde_json::to_string(response)
    }
    .map_err(|e| AppError::Config(format!("could not serialize response: {}", e)))?;

    println!("{}", body);
    Ok(())
}
