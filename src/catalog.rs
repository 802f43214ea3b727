use chrono::NaiveDate;
use log::{debug, info};
use std::collections::HashMap;

use crate::classes::{CardRecord, PocketSet};
use crate::config::CatalogConfig;
use crate::providers::limitless;
use crate::providers::{BaseProvider, CatalogError, CatalogResult, PageFetcher};
use crate::utils::PocketUtils;

/// Every set on the site with its cards, shiny variants flagged
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    /// Sets-listing page this catalog was built from
    pub url: String,
    pub origin: String,
    pub shiny_query: String,
    pub sets: Vec<PocketSet>,
}

impl Catalog {
    /// Build a catalog from the live site using configuration from file/env.
    /// Blocks until every page has been fetched.
    pub fn new() -> CatalogResult<Self> {
        Self::with_config(CatalogConfig::load()?)
    }

    /// Blocking build with an explicit configuration
    pub fn with_config(config: CatalogConfig) -> CatalogResult<Self> {
        config.validate()?;
        let provider = BaseProvider::from_config(&config);
        let runtime = tokio::runtime::Runtime::new()?;
        runtime.block_on(Self::build(&provider, &config))
    }

    /// Fetch the sets listing, every set page, then the shiny listing, one at a time
    pub async fn build<F: PageFetcher + ?Sized>(
        fetcher: &F,
        config: &CatalogConfig,
    ) -> CatalogResult<Self> {
        info!("Building catalog from {}", config.base_url);

        let mut catalog = Self::from_sets(&config.base_url, Vec::new())?;
        catalog.shiny_query = config.shiny_query.clone();
        catalog.load_sets(fetcher).await?;
        let flagged = catalog.load_shiny(fetcher).await?;

        info!(
            "Catalog built: {} sets, {} cards, {} shiny",
            catalog.sets.len(),
            catalog.total_cards(),
            flagged
        );
        Ok(catalog)
    }

    /// Wrap already-loaded sets without touching the network
    pub fn from_sets(url: &str, sets: Vec<PocketSet>) -> CatalogResult<Self> {
        Ok(Self {
            url: url.to_string(),
            origin: PocketUtils::origin(url)?,
            shiny_query: crate::config::DEFAULT_SHINY_QUERY.to_string(),
            sets,
        })
    }

    async fn load_sets<F: PageFetcher + ?Sized>(&mut self, fetcher: &F) -> CatalogResult<()> {
        let html = fetcher.fetch_page(&self.url).await?;
        let set_urls = limitless::parse_sets_listing(&self.origin, &html)?;
        debug!("Found {} set links", set_urls.len());

        self.sets = Vec::with_capacity(set_urls.len());
        for set_url in set_urls {
            let set = PocketSet::load(fetcher, &set_url).await?;
            self.sets.push(set);
        }
        Ok(())
    }

    async fn load_shiny<F: PageFetcher + ?Sized>(&mut self, fetcher: &F) -> CatalogResult<usize> {
        let html = fetcher.fetch_page(&self.shiny_url()).await?;
        let card_urls = limitless::parse_shiny_listing(&self.origin, &html)?;
        debug!("Shiny listing has {} cards", card_urls.len());
        Ok(self.mark_shiny(card_urls))
    }

    /// Search URL listing every shiny card, e.g. `<origin>/cards/?q=is:shiny,sfa&show=all`
    pub fn shiny_url(&self) -> String {
        format!("{}/cards/?q={}&show=all", self.origin, self.shiny_query)
    }

    /// Flag cards whose URL appears in `card_urls`. A card is looked up in every set
    /// whose URL equals the card URL minus its last segment; within a set only the
    /// first matching card is flagged. Unknown URLs are ignored.
    /// Returns how many flags were set.
    pub fn mark_shiny<I, S>(&mut self, card_urls: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut flagged = 0;
        for card_url in card_urls {
            let card_url = card_url.as_ref();
            let set_url = PocketUtils::parent_url(card_url);
            let mut matched = false;

            for set in self.sets.iter_mut().filter(|set| set.url == set_url) {
                if set.mark_shiny(card_url) {
                    flagged += 1;
                    matched = true;
                }
            }

            if !matched {
                debug!("Shiny card {} matches no loaded card", card_url);
            }
        }
        flagged
    }

    /// All card records, set by set, in page order
    pub fn get_card_data(&self) -> Vec<CardRecord> {
        self.sets.iter().flat_map(PocketSet::get_card_data).collect()
    }

    /// Card records ordered by (set release date, numeric card id). Ties keep
    /// their [`Catalog::get_card_data`] order.
    pub fn get_card_data_sorted(&self) -> CatalogResult<Vec<CardRecord>> {
        // Duplicate names collapse to the last set inserted.
        let sets_by_name: HashMap<&str, &PocketSet> = self
            .sets
            .iter()
            .map(|set| (set.name.as_str(), set))
            .collect();

        let mut keyed: Vec<((NaiveDate, i64), CardRecord)> = self
            .get_card_data()
            .into_iter()
            .map(|record| -> CatalogResult<_> {
                let set = sets_by_name
                    .get(record.set_details.as_str())
                    .ok_or_else(|| {
                        CatalogError::SortKeyError(format!(
                            "unknown set {:?} for card {}",
                            record.set_details, record.url
                        ))
                    })?;
                let id = record.id.trim().parse::<i64>().map_err(|e| {
                    CatalogError::SortKeyError(format!(
                        "card id {:?} ({}) is not an integer: {}",
                        record.id, record.url, e
                    ))
                })?;
                Ok(((set.release_date, id), record))
            })
            .collect::<CatalogResult<_>>()?;

        keyed.sort_by_key(|(key, _)| *key);
        Ok(keyed.into_iter().map(|(_, record)| record).collect())
    }

    /// Serialize the card export, sorted or in page order
    pub fn to_json(&self, sorted: bool) -> CatalogResult<String> {
        let records = if sorted {
            self.get_card_data_sorted()?
        } else {
            self.get_card_data()
        };
        Ok(serde_json::to_string_pretty(&records)?)
    }

    pub fn find_set_by_name(&self, name: &str) -> Option<&PocketSet> {
        self.sets.iter().find(|set| set.name == name)
    }

    pub fn find_set_by_url(&self, url: &str) -> Option<&PocketSet> {
        self.sets.iter().find(|set| set.url == url)
    }

    pub fn total_cards(&self) -> usize {
        self.sets.iter().map(|set| set.cards.len()).sum()
    }

    pub fn shiny_cards(&self) -> usize {
        self.sets
            .iter()
            .flat_map(|set| set.cards.iter())
            .filter(|card| card.shiny)
            .count()
    }
}
