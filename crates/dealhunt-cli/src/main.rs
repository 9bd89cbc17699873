use std::time::Duration;

use clap::Parser;

use dealhunt_scraper::{AggregateResponse, Aggregator, VendorClient};

/// One-shot deal aggregation from the terminal.
#[derive(Debug, Parser)]
#[command(name = "dealhunt-cli")]
#[command(about = "Fetch clearance deals from all configured FPV vendors")]
struct Cli {
    /// Search all vendors for a term instead of browsing clearance listings.
    #[arg(short, long, default_value = "")]
    query: String,

    /// Print the raw aggregate response as JSON.
    #[arg(long)]
    json: bool,

    /// Show at most this many deals in table output.
    #[arg(long, default_value_t = 50)]
    limit: usize,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = dealhunt_core::load_app_config()?;

    let vendors = dealhunt_core::builtin_vendors();
    dealhunt_core::validate_vendors(&vendors)?;

    let client = VendorClient::new(config.request_timeout_secs, &config.user_agent)?;
    // A one-shot run never reuses the cache, so a zero TTL keeps it inert.
    let aggregator = Aggregator::new(client, vendors, Duration::ZERO);

    let response = aggregator.fetch_all(&cli.query, true).await;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        print_table(&response, cli.limit);
    }

    Ok(())
}

fn print_table(response: &AggregateResponse, limit: usize) {
    for failure in &response.failed {
        eprintln!("warning: {} unreachable: {}", failure.vendor, failure.error);
    }

    println!("{} deals found", response.deals.len());
    for deal in response.deals.iter().take(limit) {
        println!(
            "{:>10}  {:<14}  {}",
            deal.price_str,
            truncate(&deal.vendor, 14),
            truncate(&deal.title, 70)
        );
    }
    if response.deals.len() > limit {
        println!("... and {} more (use --limit)", response.deals.len() - limit);
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{kept}\u{2026}")
    }
}
