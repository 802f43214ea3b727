use scraper::Html;

use super::{selector, CARD_GRID_SELECTOR, SETS_TABLE_SELECTOR};
use crate::providers::{CatalogError, CatalogResult};
use crate::utils::PocketUtils;

/// Absolute set URLs from the sets table, in row order.
/// Rows without a link (headers, separators) are skipped.
pub fn parse_sets_listing(origin: &str, html: &str) -> CatalogResult<Vec<String>> {
    let document = Html::parse_document(html);
    let table_selector = selector(SETS_TABLE_SELECTOR)?;
    let row_selector = selector("tr")?;
    let link_selector = selector("a[href]")?;

    let table = document.select(&table_selector).next().ok_or_else(|| {
        CatalogError::StructureError(format!("sets table `{}` not found", SETS_TABLE_SELECTOR))
    })?;

    Ok(table
        .select(&row_selector)
        .filter_map(|row| row.select(&link_selector).next())
        .filter_map(|link| link.value().attr("href"))
        .map(|href| PocketUtils::resolve_href(origin, href))
        .collect())
}

/// Absolute card URLs from the shiny search results grid
pub fn parse_shiny_listing(origin: &str, html: &str) -> CatalogResult<Vec<String>> {
    let document = Html::parse_document(html);
    let grid_selector = selector(CARD_GRID_SELECTOR)?;
    let link_selector = selector("a[href]")?;

    let grid = document.select(&grid_selector).next().ok_or_else(|| {
        CatalogError::StructureError(format!("card grid `{}` not found", CARD_GRID_SELECTOR))
    })?;

    Ok(grid
        .select(&link_selector)
        .filter_map(|link| link.value().attr("href"))
        .map(|href| PocketUtils::resolve_href(origin, href))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORIGIN: &str = "https://pocket.limitlesstcg.com";

    #[test]
    fn test_sets_listing_skips_rows_without_links() {
        let html = r#"
            <table class="data-table sets-table striped">
              <tr><th>Set</th><th>Release</th></tr>
              <tr><td><a href="/cards/A2">Space-Time Smackdown</a></td></tr>
              <tr><td colspan="2">Promos</td></tr>
              <tr><td><a href="/cards/A1">Genetic Apex</a></td><td><a href="/other">x</a></td></tr>
            </table>"#;

        let urls = parse_sets_listing(ORIGIN, html).unwrap();
        assert_eq!(
            urls,
            vec![
                "https://pocket.limitlesstcg.com/cards/A2",
                "https://pocket.limitlesstcg.com/cards/A1",
            ]
        );
    }

    #[test]
    fn test_sets_listing_requires_exact_table() {
        let html = r#"<table class="data-table"><tr><td><a href="/cards/A1">A1</a></td></tr></table>"#;
        let result = parse_sets_listing(ORIGIN, html);
        assert!(matches!(result, Err(CatalogError::StructureError(_))));
    }

    #[test]
    fn test_empty_sets_table_is_not_an_error() {
        let html = r#"<table class="data-table sets-table striped"><tr><th>Set</th></tr></table>"#;
        assert!(parse_sets_listing(ORIGIN, html).unwrap().is_empty());
    }

    #[test]
    fn test_shiny_listing_only_reads_grid_links() {
        let html = r#"
            <nav><a href="/cards/A1/1">outside</a></nav>
            <div class="card-search-grid">
              <a href="/cards/A1/250"><img alt="Pikachu"></a>
              <a href="/cards/A2/300"><img alt="Dialga"></a>
              <a name="anchor-without-href"></a>
            </div>"#;

        let urls = parse_shiny_listing(ORIGIN, html).unwrap();
        assert_eq!(
            urls,
            vec![
                "https://pocket.limitlesstcg.com/cards/A1/250",
                "https://pocket.limitlesstcg.com/cards/A2/300",
            ]
        );
    }

    #[test]
    fn test_shiny_listing_missing_grid() {
        let result = parse_shiny_listing(ORIGIN, "<div class=\"no-results\"></div>");
        assert!(matches!(result, Err(CatalogError::StructureError(_))));
    }
}
