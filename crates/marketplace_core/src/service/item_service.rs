//! Item use-case service.
//!
//! # Responsibility
//! - Provide listing entry points for core callers.
//! - Delegate persistence to repository implementations.
//!
//! # Invariants
//! - Service APIs never bypass repository validation/persistence contracts.
//! - Service layer remains storage-agnostic.

use crate::model::item::{Item, ItemId};
use crate::repo::{ItemRepository, RepoResult};

/// Use-case service wrapper for item operations.
pub struct ItemService<R: ItemRepository> {
    repo: R,
}

impl<R: ItemRepository> ItemService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Inserts a new listing and returns it with its assigned id.
    pub fn add_item(&self, mut item: Item) -> RepoResult<Item> {
        self.repo.insert_item(&mut item)?;
        Ok(item)
    }

    pub fn list_items(&self) -> RepoResult<Vec<Item>> {
        self.repo.list_items()
    }

    /// Gets one item by its textual id.
    ///
    /// Malformed ids fail with `RepoError::InvalidInput` before the store is
    /// touched.
    pub fn get_item(&self, raw_id: &str) -> RepoResult<Item> {
        let id: ItemId = raw_id.parse()?;
        self.repo.get_item(id)
    }

    pub fn search_items(&self, keyword: &str) -> RepoResult<Vec<Item>> {
        self.repo.search_items(keyword)
    }
}
