use std::path::PathBuf;

use clap::{Parser, Subcommand};
use reqwest::header::CONTENT_DISPOSITION;
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "travel-cli")]
#[command(about = "Command-line client for the travel planner API proxy", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Look up flights, airports, airlines or routes
    Flights {
        /// Flight number (BA456) or airport code (LHR)
        query: Option<String>,
        #[arg(short, long, default_value = "flights")]
        endpoint: String,
        #[arg(short, long)]
        limit: Option<u32>,
    },
    /// List reminders, optionally of one type
    Reminders {
        #[arg(short = 't', long = "type")]
        kind: Option<String>,
    },
    /// Complete, snooze or dismiss a reminder
    Remind {
        id: String,
        action: String,
    },
    /// Show map markers
    Map {
        #[arg(short, long)]
        location: Option<String>,
        #[arg(short = 't', long = "type")]
        kind: Option<String>,
    },
    /// Download a source or build archive
    Download {
        #[arg(default_value = "source")]
        kind: String,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    match cli.command {
        Commands::Flights { query, endpoint, limit } => {
            let mut params = vec![("endpoint", endpoint)];
            if let Some(q) = query {
                params.push(("query", q));
            }
            if let Some(l) = limit {
                params.push(("limit", l.to_string()));
            }
            let res = client
                .get(format!("{}/flight-tracker", base))
                .query(&params)
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::Reminders { kind } => {
            let res = client
                .get(format!("{}/reminders", base))
                .query(&present(&[("type", kind)]))
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::Remind { id, action } => {
            let res = client
                .post(format!("{}/reminders", base))
                .json(&json!({ "reminderId": id, "action": action }))
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::Map { location, kind } => {
            let res = client
                .get(format!("{}/map", base))
                .query(&present(&[("location", location), ("type", kind)]))
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::Download { kind, output } => {
            let res = client
                .get(format!("{}/download", base))
                .query(&[("type", &kind)])
                .send()
                .await?;
            if !res.status().is_success() {
                return print_response(res).await;
            }

            let filename = res
                .headers()
                .get(CONTENT_DISPOSITION)
                .and_then(|v| v.to_str().ok())
                .and_then(filename_from_disposition)
                .unwrap_or_else(|| format!("{}.tar.gz", kind));
            let path = output.unwrap_or_else(|| PathBuf::from(filename));

            let bytes = res.bytes().await?;
            tokio::fs::write(&path, &bytes).await?;
            println!("Wrote {} bytes to {}", bytes.len(), path.display());
        }
    }

    Ok(())
}

/// Drop unset query parameters.
fn present(pairs: &[(&'static str, Option<String>)]) -> Vec<(&'static str, String)> {
    pairs
        .iter()
        .filter_map(|(k, v)| v.clone().map(|v| (*k, v)))
        .collect()
}

fn filename_from_disposition(value: &str) -> Option<String> {
    let start = value.find("filename=\"")? + "filename=\"".len();
    let end = value[start..].find('"')? + start;
    Some(value[start..end].to_string())
}

/// Turn a non-2xx status into an error so the process exits non-zero.
fn ensure_success(status: reqwest::StatusCode) -> Result<(), Box<dyn std::error::Error>> {
    if status.is_success() {
        Ok(())
    } else {
        Err(format!("server returned status {}", status).into())
    }
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return ensure_success(status);
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
