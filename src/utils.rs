use url::Url;

use crate::providers::{CatalogError, CatalogResult};

/// URL and text helpers shared by the page parsers and the catalog
pub struct PocketUtils;

impl PocketUtils {
    /// Scheme and host of a URL, e.g. `https://pocket.limitlesstcg.com`
    pub fn origin(url: &str) -> CatalogResult<String> {
        let parsed = Url::parse(url)
            .map_err(|e| CatalogError::ParseError(format!("Invalid URL {}: {}", url, e)))?;
        let host = parsed
            .host_str()
            .ok_or_else(|| CatalogError::ParseError(format!("URL {} has no host", url)))?;
        Ok(format!("{}://{}", parsed.scheme(), host))
    }

    /// Turn an href from the site's markup into an absolute URL
    pub fn resolve_href(origin: &str, href: &str) -> String {
        if Url::parse(href).is_ok() {
            return href.to_string();
        }
        format!("{}{}", origin, href)
    }

    /// Drop the last `/` segment: `https://h/cards/A1/5` -> `https://h/cards/A1`
    pub fn parent_url(url: &str) -> String {
        match url.rsplit_once('/') {
            Some((parent, _)) => parent.to_string(),
            None => String::new(),
        }
    }

    /// Final `/` segment of a path or URL, with any query or fragment removed
    pub fn last_segment(path: &str) -> &str {
        let path = path.split(['?', '#']).next().unwrap_or(path);
        path.rsplit('/').next().unwrap_or(path)
    }

    /// Collapse whitespace runs into single spaces and trim
    pub fn normalize_ws(text: &str) -> String {
        text.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin_strips_path_and_query() {
        let origin = PocketUtils::origin("https://pocket.limitlesstcg.com/cards?x=1").unwrap();
        assert_eq!(origin, "https://pocket.limitlesstcg.com");
    }

    #[test]
    fn test_origin_rejects_relative() {
        assert!(PocketUtils::origin("/cards").is_err());
    }

    #[test]
    fn test_resolve_href() {
        let origin = "https://pocket.limitlesstcg.com";
        assert_eq!(
            PocketUtils::resolve_href(origin, "/cards/A1"),
            "https://pocket.limitlesstcg.com/cards/A1"
        );
        assert_eq!(
            PocketUtils::resolve_href(origin, "https://elsewhere.example/cards/B1"),
            "https://elsewhere.example/cards/B1"
        );
    }

    #[test]
    fn test_parent_url() {
        assert_eq!(
            PocketUtils::parent_url("https://h.example/cards/setB/1"),
            "https://h.example/cards/setB"
        );
        assert_eq!(PocketUtils::parent_url("no-slash"), "");
    }

    #[test]
    fn test_last_segment() {
        assert_eq!(PocketUtils::last_segment("/cards/A1/27"), "27");
        assert_eq!(PocketUtils::last_segment("/cards/A1/27?v=2"), "27");
        assert_eq!(PocketUtils::last_segment("27"), "27");
    }

    #[test]
    fn test_normalize_ws() {
        assert_eq!(PocketUtils::normalize_ws("  Genetic \n  Apex  "), "Genetic Apex");
    }
}
