//! Catalog of Pokémon TCG Pocket sets and cards scraped from pocket.limitlesstcg.com,
//! with shiny variants flagged from the site's shiny search listing.

pub mod catalog;
pub mod classes;
pub mod config;
pub mod providers;
pub mod utils;

pub use catalog::Catalog;
pub use classes::{CardRecord, PocketCard, PocketSet};
pub use config::CatalogConfig;
pub use providers::{BaseProvider, CatalogError, CatalogResult, PageFetcher};
