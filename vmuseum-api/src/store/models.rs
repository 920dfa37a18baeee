//! Catalog data model

use serde::{Deserialize, Serialize};

/// Whole data file: `{ "items": [...], "collections": [...] }`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MuseumData {
    #[serde(default)]
    pub items: Vec<Item>,
    #[serde(default)]
    pub collections: Vec<Collection>,
}

impl MuseumData {
    pub fn next_item_id(&self) -> u64 {
        self.items.iter().map(|i| i.id).max().map_or(1, |max| max + 1)
    }

    pub fn next_collection_id(&self) -> u64 {
        self.collections
            .iter()
            .map(|c| c.id)
            .max()
            .map_or(1, |max| max + 1)
    }
}

/// Museum item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: u64,
    #[serde(flatten)]
    pub fields: ItemFields,
}

/// Validated item contents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemFields {
    pub title: String,
    pub description: String,
    pub category: String,
    /// Name of the collection this item belongs to
    pub collection: String,
    /// Image URL
    pub photo: String,
    pub year: i32,
    pub cultural_context: String,
    pub historical_period: String,
    pub material: String,
    pub dimensions: String,
}

/// Named, colour-coded group of items
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    pub id: u64,
    #[serde(flatten)]
    pub fields: CollectionFields,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionFields {
    pub name: String,
    pub description: String,
    /// `#RRGGBB`
    pub color: String,
}
