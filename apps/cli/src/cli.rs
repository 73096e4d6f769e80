//! Command-line definition.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use storefront_core::{CategoryId, ProductId};

#[derive(Debug, Parser)]
#[command(name = "storefront")]
#[command(author, version, about = "Browse the product catalog and manage your cart")]
pub struct Cli {
    /// Config file (default: storefront.toml in the platform config dir)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Directory the cart is stored in
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Catalog API root, e.g. https://api.escuelajs.co/api/v1
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,

    /// Keep the cart in memory for this run only
    #[arg(long, global = true)]
    pub ephemeral: bool,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Browse and search products
    Products {
        #[command(subcommand)]
        action: ProductsAction,
    },
    /// Browse categories
    Categories {
        #[command(subcommand)]
        action: CategoriesAction,
    },
    /// Manage the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
}

#[derive(Debug, Subcommand)]
pub enum ProductsAction {
    /// List one page of products
    List {
        /// Page number (1-based)
        #[arg(short, long, default_value_t = 1)]
        page: u32,

        /// Products per page (default from config)
        #[arg(short, long)]
        limit: Option<u32>,

        /// Only products in this category
        #[arg(short, long, value_name = "ID", allow_negative_numbers = true)]
        category: Option<CategoryId>,

        /// Narrow the page to a subcategory (caps, tshirts, shorts,
        /// headphones, controllers)
        #[arg(short, long, value_name = "NAME")]
        subcategory: Option<String>,
    },
    /// Show one product
    Show {
        #[arg(allow_negative_numbers = true)]
        id: ProductId,
    },
    /// Search products by title
    Search {
        query: String,

        /// Page number (1-based)
        #[arg(short, long, default_value_t = 1)]
        page: u32,

        /// Results per page (default from config)
        #[arg(short, long)]
        limit: Option<u32>,
    },
}

#[derive(Debug, Subcommand)]
pub enum CategoriesAction {
    /// List all categories
    List,
}

#[derive(Debug, Subcommand)]
pub enum CartAction {
    /// Show the cart
    Show,
    /// Add one of a product to the cart
    Add {
        #[arg(allow_negative_numbers = true)]
        product_id: ProductId,
    },
    /// Remove a product from the cart
    Remove {
        #[arg(allow_negative_numbers = true)]
        product_id: ProductId,
    },
    /// Set a product's quantity (0 or less removes it)
    Update {
        #[arg(allow_negative_numbers = true)]
        product_id: ProductId,
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Remove everything from the cart
    Clear,
}
