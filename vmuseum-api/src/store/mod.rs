//! JSON-file-backed catalog of items and collections
//!
//! The whole catalog lives in memory behind one lock and is rewritten to disk
//! after every change. A write is applied to a copy first and only becomes
//! visible once the file has been saved.

pub mod models;
pub mod validation;

pub use models::{Collection, CollectionFields, Item, ItemFields, MuseumData};
pub use validation::{CollectionInput, ItemInput};

use chrono::Datelike;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;
use tracing::{error, info, warn};
use vmuseum_common::{Error, Result};

pub struct CatalogStore {
    path: PathBuf,
    data: RwLock<MuseumData>,
}

fn current_year() -> i32 {
    chrono::Utc::now().year()
}

impl CatalogStore {
    /// Open the catalog at `path`
    ///
    /// Never fails: a missing or unreadable file starts an empty catalog.
    pub async fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let data = match load(&path).await {
            Ok(data) => {
                info!(
                    path = %path.display(),
                    items = data.items.len(),
                    collections = data.collections.len(),
                    "Catalog loaded"
                );
                data
            }
            Err(Error::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!(path = %path.display(), "Catalog file not found, starting empty");
                MuseumData::default()
            }
            Err(e) => {
                error!(path = %path.display(), error = %e, "Failed to load catalog, starting empty");
                MuseumData::default()
            }
        };

        Self {
            path,
            data: RwLock::new(data),
        }
    }

    // ----- items -----

    pub async fn list_items(&self) -> Vec<Item> {
        self.data.read().await.items.clone()
    }

    pub async fn get_item(&self, id: u64) -> Result<Item> {
        self.data
            .read()
            .await
            .items
            .iter()
            .find(|i| i.id == id)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("Item {} not found", id)))
    }

    /// Items whose collection name equals `name` exactly
    pub async fn items_in_collection(&self, name: &str) -> Vec<Item> {
        self.data
            .read()
            .await
            .items
            .iter()
            .filter(|i| i.fields.collection == name)
            .cloned()
            .collect()
    }

    pub async fn create_item(&self, input: &ItemInput) -> Result<Item> {
        let fields = validation::validate_item(input, current_year())?;

        let mut data = self.data.write().await;
        let mut next = data.clone();
        let item = Item {
            id: next.next_item_id(),
            fields,
        };
        next.items.push(item.clone());

        self.commit(&mut data, next).await?;
        info!(item_id = item.id, title = %item.fields.title, "Item created");
        Ok(item)
    }

    /// Replace an item's contents, keeping its id
    pub async fn update_item(&self, id: u64, input: &ItemInput) -> Result<Item> {
        let mut data = self.data.write().await;
        let index = data
            .items
            .iter()
            .position(|i| i.id == id)
            .ok_or_else(|| Error::NotFound(format!("Item {} not found", id)))?;

        let fields = validation::validate_item(input, current_year())?;
        let item = Item { id, fields };

        let mut next = data.clone();
        next.items[index] = item.clone();

        self.commit(&mut data, next).await?;
        info!(item_id = id, "Item updated");
        Ok(item)
    }

    pub async fn delete_item(&self, id: u64) -> Result<Item> {
        let mut data = self.data.write().await;
        let index = data
            .items
            .iter()
            .position(|i| i.id == id)
            .ok_or_else(|| Error::NotFound(format!("Item {} not found", id)))?;

        let mut next = data.clone();
        let removed = next.items.remove(index);

        self.commit(&mut data, next).await?;
        info!(item_id = id, "Item deleted");
        Ok(removed)
    }

    // ----- collections -----

    pub async fn list_collections(&self) -> Vec<Collection> {
        self.data.read().await.collections.clone()
    }

    pub async fn create_collection(&self, input: &CollectionInput) -> Result<Collection> {
        let fields = validation::validate_collection(input)?;

        let mut data = self.data.write().await;
        if data.collections.iter().any(|c| c.fields.name == fields.name) {
            return Err(Error::Conflict(format!(
                "Collection '{}' already exists",
                fields.name
            )));
        }

        let mut next = data.clone();
        let collection = Collection {
            id: next.next_collection_id(),
            fields,
        };
        next.collections.push(collection.clone());

        self.commit(&mut data, next).await?;
        info!(collection_id = collection.id, name = %collection.fields.name, "Collection created");
        Ok(collection)
    }

    pub async fn update_collection(&self, id: u64, input: &CollectionInput) -> Result<Collection> {
        let mut data = self.data.write().await;
        let index = data
            .collections
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| Error::NotFound(format!("Collection {} not found", id)))?;

        let fields = validation::validate_collection(input)?;
        if data
            .collections
            .iter()
            .any(|c| c.id != id && c.fields.name == fields.name)
        {
            return Err(Error::Conflict(format!(
                "Collection '{}' already exists",
                fields.name
            )));
        }

        let collection = Collection { id, fields };
        let mut next = data.clone();
        next.collections[index] = collection.clone();

        self.commit(&mut data, next).await?;
        info!(collection_id = id, "Collection updated");
        Ok(collection)
    }

    /// Delete a collection that no item refers to
    pub async fn delete_collection(&self, id: u64) -> Result<Collection> {
        let mut data = self.data.write().await;
        let index = data
            .collections
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| Error::NotFound(format!("Collection {} not found", id)))?;

        let name = &data.collections[index].fields.name;
        let in_use = data
            .items
            .iter()
            .filter(|i| &i.fields.collection == name)
            .count();
        if in_use > 0 {
            return Err(Error::Conflict(format!(
                "Cannot delete collection: {} item(s) still belong to it.",
                in_use
            )));
        }

        let mut next = data.clone();
        let removed = next.collections.remove(index);

        self.commit(&mut data, next).await?;
        info!(collection_id = id, "Collection deleted");
        Ok(removed)
    }

    /// Persist `next`, then make it the live catalog
    async fn commit(&self, live: &mut MuseumData, next: MuseumData) -> Result<()> {
        if let Err(e) = save(&self.path, &next).await {
            error!(path = %self.path.display(), error = %e, "Failed to save catalog");
            return Err(Error::Internal(format!("Failed to save catalog: {}", e)));
        }
        *live = next;
        Ok(())
    }
}

async fn load(path: &Path) -> Result<MuseumData> {
    let content = tokio::fs::read(path).await?;
    Ok(serde_json::from_slice(&content)?)
}

/// Write to a sibling temp file, then rename over the target
async fn save(path: &Path, data: &MuseumData) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }

    let json = serde_json::to_vec_pretty(data)?;
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    tokio::fs::write(&tmp, json).await?;
    tokio::fs::rename(&tmp, path).await?;
    Ok(())
}
