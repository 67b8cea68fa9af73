//! CRM mock API command line.
//!
//! # Architecture Overview
//!
//! ```text
//!     caller (method, url, body?)
//!        │
//!        ▼
//!  ┌────────────┐   ┌───────────┐   ┌───────────┐   ┌────────────┐
//!  │ normalizer │──▶│  matcher  │──▶│ registry  │──▶│ dispatcher │
//!  └────────────┘   └───────────┘   └───────────┘   └─────┬──────┘
//!                                                         │ handler
//!                                                         ▼
//!                                                   ┌───────────┐
//!                                                   │   store   │
//!                                                   └─────┬─────┘
//!                                                         │ envelope + status
//!                                                         ▼
//!                                                   ┌───────────┐
//!     caller ◀──────────────────────────────────────│  latency  │
//!                                                   └───────────┘
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::Deserialize;
use serde_json::Value;

use crm_mock_api::config::{load_config, MockApiConfig};
use crm_mock_api::observability::logging::init_logging;
use crm_mock_api::routing::registry::route_table;
use crm_mock_api::{ApiRequest, ApiResponse, MockApi};

#[derive(Parser)]
#[command(name = "crm-mock-api")]
#[command(about = "In-process mock of the CRM dashboard REST API", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List registered routes
    Routes,
    /// Dispatch a single request against a freshly seeded store
    Request {
        /// HTTP method (GET, POST, PUT, DELETE)
        method: String,
        /// Request URL, with either accepted prefix
        url: String,
        /// Raw request body
        #[arg(short, long)]
        body: Option<String>,
    },
    /// Replay a JSON array of requests against one store, in order
    Replay {
        file: PathBuf,
    },
}

/// One request in a replay file.
#[derive(Debug, Deserialize)]
struct ReplayEntry {
    method: String,
    url: String,
    /// JSON body, serialized before dispatch.
    #[serde(default)]
    body: Option<Value>,
    /// Raw body bytes, sent as-is (useful for malformed payloads).
    #[serde(default)]
    raw_body: Option<String>,
}

impl ReplayEntry {
    fn into_request(self) -> ApiRequest {
        let request = ApiRequest::new(&self.method, self.url);
        match (self.raw_body, self.body) {
            (Some(raw), _) => request.with_body(raw),
            (None, Some(body)) => request.with_json(&body),
            (None, None) => request,
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => MockApiConfig::default(),
    };
    init_logging(&config.observability)?;

    tracing::debug!(
        delay_ms = config.latency.delay_ms,
        prefixes = ?config.routing.accepted_prefixes,
        seed = config.store.seed,
        "Configuration loaded"
    );

    let api = MockApi::from_config(&config);

    match cli.command {
        Commands::Routes => {
            for route in route_table() {
                println!("{route}");
            }
        }
        Commands::Request { method, url, body } => {
            let mut request = ApiRequest::new(&method, url);
            if let Some(body) = body {
                request = request.with_body(body);
            }
            let response = api.send(request).await;
            print_response(&response)?;
        }
        Commands::Replay { file } => {
            let content = std::fs::read_to_string(&file)?;
            let entries: Vec<ReplayEntry> = serde_json::from_str(&content)?;
            tracing::info!(count = entries.len(), file = %file.display(), "Replaying requests");

            for entry in entries {
                let request = entry.into_request();
                println!("> {} {}", request.method(), request.url());
                let response = api.send(request).await;
                print_response(&response)?;
            }
        }
    }

    Ok(())
}

fn print_response(response: &ApiResponse) -> Result<(), serde_json::Error> {
    println!("{}", response.status());
    println!("{}", serde_json::to_string_pretty(response.envelope())?);
    Ok(())
}
