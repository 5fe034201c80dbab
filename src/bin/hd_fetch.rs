//! Fetch every page of an API path and print the combined payload as JSON.
//!
//! Configuration comes from the environment:
//!
//! ```sh
//! export HELPDESK_REMOTE_URI='https://acme.helpdesk.test/api/v2'
//! export HELPDESK_USERNAME='agent@acme.test'
//! export HELPDESK_TOKEN='...'
//! cargo run --bin hd-fetch -- tickets --include users
//! ```
//!
//! The path is given as slash-separated segments (`tickets`, `users/me`).
//! `--key` picks the envelope key holding the payload; it defaults to the
//! last segment.

use std::process::ExitCode;
use std::sync::Arc;

use busbar_hd_client::{CallOptions, ClientConfig, HelpdeskClient, PathSpec, ResourceProfile};
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser, PartialEq)]
#[command(name = "hd-fetch", version = env!("CARGO_PKG_VERSION"), about, long_about = None)]
struct Args {
    /// Slash-separated resource path, e.g. `tickets` or `users/me`
    path: String,

    /// Side-loads to request, comma separated
    #[arg(long, value_delimiter = ',')]
    include: Option<Vec<String>>,

    /// Envelope key holding the payload (defaults to the last path segment)
    #[arg(long)]
    key: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    match run(args).await {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<String, busbar_hd_client::Error> {
    let client = HelpdeskClient::new(ClientConfig::from_env()?)?;

    let segments: Vec<&str> = args
        .path
        .trim_matches('/')
        .trim_end_matches(".json")
        .split('/')
        .filter(|segment| !segment.is_empty())
        .collect();
    let key = args
        .key
        .or_else(|| segments.last().map(|segment| segment.to_string()))
        .unwrap_or_default();

    let mut options = CallOptions::with_profile(Arc::new(ResourceProfile::new([key])));
    if let Some(include) = args.include {
        options = options.include(include.into_iter().filter(|name| !name.is_empty()));
    }

    let pages = client.get_all(PathSpec::segments(segments), &options).await?;
    tracing::info!(pages = pages.len(), records = pages.body.len(), "Fetched");

    Ok(serde_json::to_string_pretty(&pages.body)?)
}
