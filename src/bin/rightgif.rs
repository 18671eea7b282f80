//! Looks up a GIF for some text on rightgif.com and prints its URL.

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use serde::Deserialize;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

const SEARCH_URL: &str = "https://rightgif.com/search/web";
const USER_AGENT: &str = "Mozilla/5.0";

#[derive(Parser, Debug)]
#[command(name = "rightgif", author, version, about = "Print the URL of a GIF matching some text")]
struct Cli {
    /// Words to search for, joined with spaces
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    query: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    url: String,
}

/// The search text, or `None` when no words were given.
fn query_text(words: &[String]) -> Option<String> {
    let text = words.join(" ");
    (!text.trim().is_empty()).then_some(text)
}

fn parse_url(body: &str) -> Result<String> {
    let response: SearchResponse = serde_json::from_str(body)
        .with_context(|| format!("Error decoding JSON response: \"{body}\""))?;
    Ok(response.url)
}

fn search(query: &str) -> Result<String> {
    let client = reqwest::blocking::Client::builder()
        .user_agent(USER_AGENT)
        .build()
        .context("Failed to build HTTP client")?;

    debug!("POST {SEARCH_URL} text={query:?}");
    let body = client
        .post(SEARCH_URL)
        .form(&[("text", query)])
        .send()
        .and_then(|response| response.error_for_status())
        .and_then(|response| response.text())
        .context("Request error")?;

    parse_url(&body)
}

fn run(cli: Cli) -> Result<String> {
    let query = query_text(&cli.query).ok_or_else(|| anyhow!("No query text provided."))?;
    search(&query)
}

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(Cli::parse()) {
        Ok(url) => {
            println!("{url}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
