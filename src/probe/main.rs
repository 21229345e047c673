//! Standalone status probe.
//!
//! Fetches the status summary once and prints the normalized result;
//! useful for checking connectivity and the endpoint shape without
//! starting the bot.

use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;

// Import from the main crate
use reddit_status_bot::status::{DEFAULT_USER_AGENT, STATUS_URL, StatusPageClient, StatusSource};

/// One-shot status fetch.
#[derive(Parser, Debug)]
#[command(name = "status_probe")]
#[command(about = "Fetch the Reddit status summary once and print the normalized state")]
#[command(version)]
struct Args {
    /// Status summary endpoint to query.
    #[arg(long, default_value = STATUS_URL)]
    url: String,

    /// Request timeout in seconds.
    #[arg(short, long, default_value_t = 15)]
    timeout: u64,

    /// User-Agent header to send.
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    user_agent: String,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    println!("Probing: {}", args.url);

    let client = match StatusPageClient::new(
        &args.url,
        Duration::from_secs(args.timeout),
        &args.user_agent,
    ) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("✗ Failed to build HTTP client: {e}");
            return ExitCode::FAILURE;
        }
    };

    match client.fetch_status().await {
        Ok(snapshot) => {
            println!(
                "✓ {} (observed {})",
                snapshot.state,
                snapshot.observed_at.format("%Y-%m-%d %H:%M:%S UTC")
            );
            if let Some(description) = &snapshot.raw_message {
                println!("  Upstream says: {description}");
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("✗ Fetch failed: {e}");
            ExitCode::FAILURE
        }
    }
}
