//! Markup parsers for pocket.limitlesstcg.com pages.
//!
//! Each parser is a pure function over the page body so the catalog can be
//! exercised against fixture HTML without a network.

use scraper::Selector;

use crate::providers::{CatalogError, CatalogResult};

pub mod listing;
pub mod set_page;

pub use listing::{parse_sets_listing, parse_shiny_listing};
pub use set_page::{parse_release_date, parse_set_page};

pub const SETS_TABLE_SELECTOR: &str = "table.data-table.sets-table.striped";
pub const CARD_GRID_SELECTOR: &str = "div.card-search-grid";
pub const SET_NAME_SELECTOR: &str = "div.infobox-heading";
pub const SET_INFO_LINE_SELECTOR: &str = "div.infobox-line";

pub(crate) fn selector(css: &str) -> CatalogResult<Selector> {
    Selector::parse(css)
        .map_err(|e| CatalogError::ParseError(format!("Invalid selector {}: {:?}", css, e)))
}
