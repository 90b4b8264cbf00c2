//! JSON-file-backed item store.
//!
//! # Responsibility
//! - Persist items as a single `{"items": [...]}` document.
//! - Assign ids that are never reused within one file.
//!
//! # Invariants
//! - Every operation re-reads the file; insert rewrites the whole document.
//! - There is no locking. Concurrent writers can lose updates.

use crate::model::item::{Item, ItemId};
use crate::repo::{check_insertable, check_keyword, ItemRepository, RepoError, RepoResult};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Serialize, Deserialize)]
struct ItemsDocument {
    items: Vec<Item>,
}

/// Item repository stored in one JSON file.
#[derive(Debug, Clone)]
pub struct JsonItemRepository {
    path: PathBuf,
}

impl JsonItemRepository {
    /// Opens the store at `path`, creating an empty document if missing.
    ///
    /// # Errors
    /// - Returns `RepoError::Io` when the file or its parent cannot be created.
    pub fn open(path: impl Into<PathBuf>) -> RepoResult<Self> {
        let repo = Self { path: path.into() };

        if !repo.path.exists() {
            if let Some(parent) = repo.path.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent)?;
                }
            }
            repo.write_document(&ItemsDocument::default())?;
            info!(
                "event=items_file_create module=repo status=ok path={}",
                repo.path.display()
            );
        }

        Ok(repo)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_document(&self) -> RepoResult<ItemsDocument> {
        let raw = fs::read_to_string(&self.path)?;
        if raw.trim().is_empty() {
            return Ok(ItemsDocument::default());
        }

        let document: ItemsDocument = serde_json::from_str(&raw).map_err(|err| {
            RepoError::InvalidData(format!("{}: {err}", self.path.display()))
        })?;
        for item in &document.items {
            if !item.id.is_assigned() {
                return Err(RepoError::InvalidData(format!(
                    "{}: item id {} is not positive",
                    self.path.display(),
                    item.id
                )));
            }
            item.validate().map_err(|err| {
                RepoError::InvalidData(format!(
                    "{}: item {}: {err}",
                    self.path.display(),
                    item.id
                ))
            })?;
        }
        Ok(document)
    }

    fn write_document(&self, document: &ItemsDocument) -> RepoResult<()> {
        let mut encoded = serde_json::to_string_pretty(document)
            .map_err(|err| RepoError::InvalidData(err.to_string()))?;
        encoded.push('\n');
        fs::write(&self.path, encoded)?;
        Ok(())
    }
}

impl ItemRepository for JsonItemRepository {
    fn insert_item(&self, item: &mut Item) -> RepoResult<()> {
        check_insertable(item)?;

        let mut document = self.read_document()?;
        let next_id = document
            .items
            .iter()
            .map(|existing| existing.id)
            .max()
            .unwrap_or(ItemId::UNASSIGNED)
            .checked_next()
            .ok_or_else(|| {
                RepoError::InvalidData(format!(
                    "{}: no item id left after the highest stored id",
                    self.path.display()
                ))
            })?;

        let mut stored = item.clone();
        stored.id = next_id;
        document.items.push(stored);
        self.write_document(&document)?;

        item.id = next_id;
        debug!(
            "event=item_insert module=repo status=ok backend=json id={}",
            item.id
        );
        Ok(())
    }

    fn list_items(&self) -> RepoResult<Vec<Item>> {
        Ok(self.read_document()?.items)
    }

    fn get_item(&self, id: ItemId) -> RepoResult<Item> {
        self.read_document()?
            .items
            .into_iter()
            .find(|item| item.id == id)
            .ok_or(RepoError::ItemNotFound(id))
    }

    fn search_items(&self, keyword: &str) -> RepoResult<Vec<Item>> {
        check_keyword(keyword)?;

        Ok(self
            .read_document()?
            .items
            .into_iter()
            .filter(|item| item.name.contains(keyword))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::JsonItemRepository;
    use crate::repo::{ItemRepository, RepoError};
    use crate::Item;

    #[test]
    fn whitespace_only_file_reads_as_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("items.json");
        std::fs::write(&path, "  \n").unwrap();

        let repo = JsonItemRepository::open(&path).unwrap();
        assert!(repo.list_items().unwrap().is_empty());
    }

    #[test]
    fn malformed_document_is_invalid_data() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("items.json");
        std::fs::write(&path, "{\"items\": [").unwrap();

        let repo = JsonItemRepository::open(&path).unwrap();
        let err = repo.list_items().unwrap_err();
        assert!(matches!(err, RepoError::InvalidData(_)));
    }

    #[test]
    fn written_document_has_items_envelope() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("items.json");
        let repo = JsonItemRepository::open(&path).unwrap();

        let mut item = Item::new("jacket", "fashion");
        repo.insert_item(&mut item).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["items"][0]["id"], 1);
        assert_eq!(raw["items"][0]["name"], "jacket");
        assert_eq!(raw["items"][0]["category"], "fashion");
        assert_eq!(raw["items"][0]["image_name"], "default.jpg");
    }
}
