//! # Stockroom Demo
//!
//! Loads a simulated inventory and prints its statistics.
//!
//! ## Usage
//! ```bash
//! # Load 5,000 products (default)
//! cargo run -p stockroom-store --bin stockroom
//!
//! # Custom amount, machine-readable output
//! cargo run -p stockroom-store --bin stockroom -- --count 200 --json
//!
//! # Explicit config file, verbose logs
//! RUST_LOG=stockroom=debug cargo run -p stockroom-store --bin stockroom -- --config ./stockroom.toml
//! ```
//!
//! Transient load failures are retried up to `load.max_attempts` times.

use serde_json::json;
use std::env;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use stockroom_core::StockStatus;
use stockroom_store::{
    FilterUpdate, InventoryStore, SortKey, SortOrder, StatusFilter, StockroomConfig,
};

/// Number of low-stock products listed in the text report.
const REPORT_ROWS: usize = 10;

struct Args {
    count: Option<usize>,
    config: Option<PathBuf>,
    json: bool,
}

fn parse_args() -> Option<Args> {
    let args: Vec<String> = env::args().collect();
    let mut parsed = Args {
        count: None,
        config: None,
        json: false,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    parsed.count = args[i + 1].parse().ok();
                    i += 1;
                }
            }
            "--config" => {
                if i + 1 < args.len() {
                    parsed.config = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--json" => parsed.json = true,
            "--help" | "-h" => {
                println!("Stockroom inventory demo");
                println!();
                println!("Usage: stockroom [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>    Number of products to load (default: config)");
                println!("      --config <P>   Config file path (default: platform config dir)");
                println!("      --json         Print statistics as JSON");
                println!("  -h, --help         Show this help message");
                return None;
            }
            other => warn!(argument = %other, "Ignoring unknown argument"),
        }
        i += 1;
    }

    Some(parsed)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("stockroom=info,stockroom_store=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let Some(args) = parse_args() else {
        return Ok(());
    };

    let config = StockroomConfig::load(args.config)?;
    let count = args.count.unwrap_or(config.load.default_count);
    let mut store = InventoryStore::from_config(&config);

    let mut attempt = 1;
    loop {
        match store.load(count).await {
            Ok(loaded) => {
                info!(loaded, attempt, "Inventory ready");
                break;
            }
            Err(err) if err.is_retryable() && attempt < config.load.max_attempts => {
                warn!(attempt, error = %err, "Load failed, retrying");
                attempt += 1;
            }
            Err(err) => return Err(err.into()),
        }
    }

    let stats = store.statistics();

    store.set_filter(FilterUpdate::Status(StatusFilter::Only(StockStatus::LowStock)));
    store.set_sort(SortKey::Quantity, SortOrder::Asc);
    let low_stock = store.filtered_products();

    if args.json {
        let report = json!({
            "statistics": &*stats,
            "low_stock": low_stock.iter().take(REPORT_ROWS).collect::<Vec<_>>(),
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Stockroom inventory");
    println!("===================");
    println!("Products:      {}", stats.total);
    println!("In stock:      {}", stats.in_stock);
    println!("Low stock:     {}", stats.low_stock);
    println!("Out of stock:  {}", stats.out_of_stock);
    println!("Stock value:   {}", stats.total_value);
    println!(
        "Categories:    {}",
        stats.categories.iter().cloned().collect::<Vec<_>>().join(", ")
    );

    if low_stock.is_empty() {
        return Ok(());
    }

    println!();
    println!("Lowest stock ({} of {}):", low_stock.len().min(REPORT_ROWS), low_stock.len());
    for product in low_stock.iter().take(REPORT_ROWS) {
        println!(
            "  {:<12} {:<32} {:>4} / {:<4} {}",
            product.sku,
            product.name,
            product.quantity,
            product.min_stock,
            product.price()
        );
    }

    Ok(())
}

