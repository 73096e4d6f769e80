//! Storefront CLI - browse the product catalog and manage a persistent cart.
//!
//! # Usage
//!
//! ```bash
//! # Browse the catalog
//! storefront products list --page 2
//! storefront products list --category 1 --subcategory caps
//! storefront products search "shirt"
//!
//! # Manage the cart (kept between runs)
//! storefront cart add 42
//! storefront cart update 42 3
//! storefront cart show
//!
//! # Machine-readable output
//! storefront --json cart show
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::Parser;

use storefront_cli::cli::Cli;
use storefront_cli::{init_tracing, run};

#[tokio::main]
async fn main() {
    init_tracing();

    let cli = Cli::parse();
    let json = cli.json;

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");

        match serde_json::to_string_pretty(&e) {
            Ok(body) if json => eprintln!("{body}"),
            _ => eprintln!("error: {e}"),
        }
        std::process::exit(1);
    }
}
