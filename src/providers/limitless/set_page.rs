use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::Html;

use super::{selector, CARD_GRID_SELECTOR, SET_INFO_LINE_SELECTOR, SET_NAME_SELECTOR};
use crate::classes::{PocketCard, PocketSet};
use crate::providers::{CatalogError, CatalogResult};
use crate::utils::PocketUtils;

// Longer year forms come first so "Oct 30, 2024" is never read as "Oct 30, 20".
static DATE_PATTERNS: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    [
        (r"\b\d{4}-\d{2}-\d{2}\b", "%Y-%m-%d"),
        (r"\b[A-Z][a-z]{2} \d{1,2}, \d{4}\b", "%b %d, %Y"),
        (r"\b[A-Z][a-z]{2} \d{1,2}, \d{2}\b", "%b %d, %y"),
        (r"\b\d{1,2} [A-Z][a-z]{2} \d{4}\b", "%d %b %Y"),
        (r"\b\d{1,2} [A-Z][a-z]{2} \d{2}\b", "%d %b %y"),
    ]
    .into_iter()
    .map(|(pattern, format)| (Regex::new(pattern).expect("valid date pattern"), format))
    .collect()
});

/// Find the first recognisable date in a line of text
pub fn parse_release_date(text: &str) -> Option<NaiveDate> {
    DATE_PATTERNS.iter().find_map(|(re, format)| {
        re.find_iter(text)
            .find_map(|m| NaiveDate::parse_from_str(m.as_str(), format).ok())
    })
}

/// Build a [`PocketSet`] from its page: name, release date and the card grid
pub fn parse_set_page(origin: &str, url: &str, html: &str) -> CatalogResult<PocketSet> {
    let document = Html::parse_document(html);
    let name_selector = selector(SET_NAME_SELECTOR)?;
    let info_selector = selector(SET_INFO_LINE_SELECTOR)?;
    let grid_selector = selector(CARD_GRID_SELECTOR)?;
    let link_selector = selector("a[href]")?;
    let img_selector = selector("img")?;

    let name = document
        .select(&name_selector)
        .next()
        .map(|heading| PocketUtils::normalize_ws(&heading.text().collect::<String>()))
        .filter(|name| !name.is_empty())
        .ok_or_else(|| CatalogError::ParseError(format!("set name not found on {}", url)))?;

    let release_date = document
        .select(&info_selector)
        .find_map(|line| parse_release_date(&line.text().collect::<String>()))
        .ok_or_else(|| {
            CatalogError::ParseError(format!("release date not found for set {} ({})", name, url))
        })?;

    let grid = document.select(&grid_selector).next().ok_or_else(|| {
        CatalogError::StructureError(format!(
            "card grid `{}` not found on {}",
            CARD_GRID_SELECTOR, url
        ))
    })?;

    let mut set = PocketSet::new(url.to_string(), name, release_date);

    for link in grid.select(&link_selector) {
        let Some(href) = link.value().attr("href") else {
            continue;
        };
        let id = PocketUtils::last_segment(href).to_string();
        let img = link.select(&img_selector).next();

        let card_name = img
            .and_then(|img| img.value().attr("alt"))
            .map(PocketUtils::normalize_ws)
            .filter(|alt| !alt.is_empty())
            .unwrap_or_else(|| PocketUtils::normalize_ws(&link.text().collect::<String>()));
        let image_url = img
            .and_then(|img| img.value().attr("src"))
            .map(|src| PocketUtils::resolve_href(origin, src));

        set.add_card(
            PocketCard::new(id, card_name, PocketUtils::resolve_href(origin, href), String::new())
                .with_image(image_url),
        );
    }

    Ok(set)
}
