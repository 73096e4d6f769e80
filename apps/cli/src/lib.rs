//! # Storefront CLI
//!
//! Library side of the `storefront` binary.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         storefront (binary)                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │  main.rs                                                        │   │
//! │  │  • init_tracing (stderr)   • Cli::parse   • run(cli)            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                              │                                          │
//! │                              ▼                                          │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │  run(cli)                                                       │   │
//! │  │  1. AppConfig::load (flags > env > storefront.toml > defaults)  │   │
//! │  │  2. CatalogClient::new                                          │   │
//! │  │  3. CartHandle (FileStorage, or MemoryStorage if --ephemeral)   │   │
//! │  │  4. initialize the cart once                                    │   │
//! │  │  5. dispatch to commands::*, print via render                   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod cli;
pub mod commands;
pub mod error;
pub mod render;
pub mod state;

#[cfg(test)]
mod test_support;

use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use storefront_catalog::CatalogClient;
use storefront_store::FileStorage;

use crate::cli::{CartAction, CategoriesAction, Cli, Command, ProductsAction};
use crate::commands::ProductListQuery;
use crate::error::ApiError;
use crate::render::render;
use crate::state::{AppConfig, CartHandle, ConfigOverrides};

/// Initializes the tracing subscriber.
///
/// ## Log Levels
/// - Default: `info,storefront=debug`
/// - Override with `RUST_LOG`, e.g. `RUST_LOG=warn storefront cart show`
///
/// Logs go to stderr; stdout carries command output only.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,storefront=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Builds the session state and runs one command.
pub async fn run(cli: Cli) -> Result<(), ApiError> {
    let overrides = ConfigOverrides {
        config_path: cli.config.clone(),
        api_url: cli.api_url.clone(),
        data_dir: cli.data_dir.clone(),
    };
    let config = AppConfig::load(&overrides)?;
    debug!(api_url = %config.api_url, page_size = config.page_size, "Configuration loaded");

    let catalog = CatalogClient::new(&config.catalog_config())?;
    let cart = open_cart(&config, cli.ephemeral)?;

    let output = execute(cli.command, &config, &catalog, &cart, cli.json).await?;
    println!("{}", output.trim_end());

    Ok(())
}

/// Creates the cart handle and rehydrates the stored cart.
fn open_cart(config: &AppConfig, ephemeral: bool) -> Result<CartHandle, ApiError> {
    let cart = if ephemeral {
        info!("Using an in-memory cart for this session");
        CartHandle::in_memory()
    } else {
        let dir = config
            .storage_dir()
            .ok_or_else(|| ApiError::internal("Could not determine a data directory; pass --data-dir"))?;
        info!(dir = %dir.display(), "Using cart storage");
        CartHandle::with_storage(FileStorage::new(dir))
    };

    cart.initialize()?;
    Ok(cart)
}

/// Dispatches a parsed command and renders its result.
pub async fn execute(
    command: Command,
    config: &AppConfig,
    catalog: &CatalogClient,
    cart: &CartHandle,
    json: bool,
) -> Result<String, ApiError> {
    match command {
        Command::Products { action } => match action {
            ProductsAction::List {
                page,
                limit,
                category,
                subcategory,
            } => {
                let query = ProductListQuery {
                    page,
                    limit: limit.unwrap_or(config.page_size),
                    category,
                    subcategory,
                };
                render(&commands::list_products(catalog, &query).await?, json)
            }
            ProductsAction::Show { id } => render(&commands::show_product(catalog, id).await?, json),
            ProductsAction::Search { query, page, limit } => {
                let limit = limit.unwrap_or(config.page_size);
                render(
                    &commands::search_products(catalog, &query, page, limit).await?,
                    json,
                )
            }
        },
        Command::Categories { action } => match action {
            CategoriesAction::List => render(&commands::list_categories(catalog).await?, json),
        },
        Command::Cart { action } => {
            let response = match action {
                CartAction::Show => commands::get_cart(cart)?,
                CartAction::Add { product_id } => {
                    commands::add_to_cart(catalog, cart, product_id).await?
                }
                CartAction::Remove { product_id } => commands::remove_from_cart(cart, product_id)?,
                CartAction::Update {
                    product_id,
                    quantity,
                } => commands::update_cart_item(cart, product_id, quantity)?,
                CartAction::Clear => commands::clear_cart(cart)?,
            };
            render(&response, json)
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
