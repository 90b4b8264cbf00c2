//! Core domain logic for the marketplace listing backend.
//! This crate is the single source of truth for item invariants.

pub mod db;
pub mod error;
pub mod image;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use error::ErrorKind;
pub use image::{validate_upload, ImageError, ImageResult, ImageStore, StoredImage};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::item::{
    Item, ItemId, ItemValidationError, ParseItemIdError, DEFAULT_IMAGE_NAME,
};
pub use repo::backend::{open_repository, StorageBackend};
pub use repo::json_repo::JsonItemRepository;
pub use repo::sqlite_repo::SqliteItemRepository;
pub use repo::{ItemRepository, RepoError, RepoResult};
pub use service::item_service::ItemService;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
