use serde::{Deserialize, Serialize};

/// Exported view of a single card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardRecord {
    pub id: String,
    pub name: String,
    /// Name of the owning set
    pub set_details: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub shiny: bool,
}

/// Pokémon TCG Pocket Singular Card Object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PocketCard {
    /// Collector number within the set, kept as text
    pub id: String,
    pub name: String,
    pub url: String,
    pub image_url: Option<String>,
    pub set_details: String,
    pub shiny: bool,
}

impl PocketCard {
    pub fn new(id: String, name: String, url: String, set_details: String) -> Self {
        Self {
            id,
            name,
            url,
            image_url: None,
            set_details,
            shiny: false,
        }
    }

    pub fn with_image(mut self, image_url: Option<String>) -> Self {
        self.image_url = image_url;
        self
    }

    /// Card number as an integer, if the id is numeric
    pub fn number(&self) -> Option<i64> {
        self.id.trim().parse().ok()
    }

    pub fn get_card_data(&self) -> CardRecord {
        CardRecord {
            id: self.id.clone(),
            name: self.name.clone(),
            set_details: self.set_details.clone(),
            url: self.url.clone(),
            image_url: self.image_url.clone(),
            shiny: self.shiny,
        }
    }
}
