//! # State Module
//!
//! Application state for the storefront CLI.
//!
//! Separate state types are built once in [`crate::run`] and passed to each
//! command explicitly, so a command's signature says what it touches.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                      run(cli)                                   │   │
//! │  │  let config  = AppConfig::load(..)                              │   │
//! │  │  let catalog = CatalogClient::new(..)                           │   │
//! │  │  let cart    = CartHandle::with_storage(..)                     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                              │                                          │
//! │          ┌──────────────────┼──────────────────┐                       │
//! │          ▼                  ▼                  ▼                        │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────────┐              │
//! │  │  AppConfig   │  │  CartHandle  │  │  CatalogClient   │              │
//! │  │              │  │              │  │                  │              │
//! │  │  api_url     │  │  Arc<Mutex<  │  │  reqwest client  │              │
//! │  │  data_dir    │  │   CartStore  │  │  + moka caches   │              │
//! │  │  page_size   │  │  >>          │  │                  │              │
//! │  └──────────────┘  └──────────────┘  └──────────────────┘              │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • AppConfig: Read-only after loading                                  │
//! │  • CartHandle: Protected by Arc<Mutex<T>> for exclusive access         │
//! │  • CatalogClient: Cheap to clone, caches are internally synchronized   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod cart;
mod config;

pub use cart::{CartHandle, DynStorage};
pub use config::{AppConfig, ConfigError, ConfigOverrides, CONFIG_FILE_NAME};
