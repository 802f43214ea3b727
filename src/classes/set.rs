use chrono::NaiveDate;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::classes::card::{CardRecord, PocketCard};
use crate::providers::limitless;
use crate::providers::{CatalogResult, PageFetcher};
use crate::utils::PocketUtils;

/// Pokémon TCG Pocket Singular Set Object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PocketSet {
    pub url: String,
    pub name: String,
    pub release_date: NaiveDate,
    pub cards: Vec<PocketCard>,
}

impl PocketSet {
    pub fn new(url: String, name: String, release_date: NaiveDate) -> Self {
        Self {
            url,
            name,
            release_date,
            cards: Vec::new(),
        }
    }

    /// Fetch and parse the set page at `url`
    pub async fn load<F: PageFetcher + ?Sized>(fetcher: &F, url: &str) -> CatalogResult<Self> {
        let html = fetcher.fetch_page(url).await?;
        let origin = PocketUtils::origin(url)?;
        let set = limitless::parse_set_page(&origin, url, &html)?;
        debug!(
            "Loaded set {} ({}) with {} cards",
            set.name,
            set.release_date,
            set.cards.len()
        );
        Ok(set)
    }

    /// Add a card, stamping it with this set's name
    pub fn add_card(&mut self, mut card: PocketCard) {
        card.set_details = self.name.clone();
        self.cards.push(card);
    }

    pub fn find_card_by_url(&self, url: &str) -> Option<&PocketCard> {
        self.cards.iter().find(|card| card.url == url)
    }

    /// Flag the first card with this URL as shiny. Returns whether a card matched.
    pub fn mark_shiny(&mut self, card_url: &str) -> bool {
        match self.cards.iter_mut().find(|card| card.url == card_url) {
            Some(card) => {
                card.shiny = true;
                true
            }
            None => false,
        }
    }

    pub fn get_card_data(&self) -> Vec<CardRecord> {
        self.cards.iter().map(PocketCard::get_card_data).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_set() -> PocketSet {
        let mut set = PocketSet::new(
            "https://h.example/cards/A1".to_string(),
            "Genetic Apex".to_string(),
            NaiveDate::from_ymd_opt(2024, 10, 30).unwrap(),
        );
        for id in ["1", "2", "2"] {
            set.add_card(PocketCard::new(
                id.to_string(),
                format!("Card {}", id),
                format!("https://h.example/cards/A1/{}", id),
                String::new(),
            ));
        }
        set
    }

    #[test]
    fn test_add_card_stamps_set_name() {
        let set = sample_set();
        assert!(set.cards.iter().all(|c| c.set_details == "Genetic Apex"));
    }

    #[test]
    fn test_mark_shiny_first_match_only() {
        let mut set = sample_set();

        assert!(set.mark_shiny("https://h.example/cards/A1/2"));
        assert!(!set.cards[0].shiny);
        assert!(set.cards[1].shiny);
        assert!(!set.cards[2].shiny);
    }

    #[test]
    fn test_mark_shiny_miss_changes_nothing() {
        let mut set = sample_set();
        let before = set.clone();

        assert!(!set.mark_shiny("https://h.example/cards/A1/99"));
        assert_eq!(set, before);
    }

    #[test]
    fn test_get_card_data_keeps_order() {
        let set = sample_set();
        let ids: Vec<String> = set.get_card_data().into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec!["1", "2", "2"]);
    }
}
