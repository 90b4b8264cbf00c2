//! Startup-time selection of the item store backend.

use crate::db::open_db;
use crate::repo::json_repo::JsonItemRepository;
use crate::repo::sqlite_repo::SqliteItemRepository;
use crate::repo::{ItemRepository, RepoResult};
use log::info;
use std::fs;
use std::path::PathBuf;

/// Which backend holds the items, and where.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    /// Single `{"items": [...]}` document.
    JsonFile { path: PathBuf },
    /// SQLite database; `categories` are created at open when missing.
    Sqlite {
        path: PathBuf,
        categories: Vec<String>,
    },
}

impl StorageBackend {
    pub fn label(&self) -> &'static str {
        match self {
            Self::JsonFile { .. } => "json",
            Self::Sqlite { .. } => "sqlite",
        }
    }
}

/// Opens the configured backend behind the `ItemRepository` contract.
///
/// # Errors
/// - Returns `RepoError::Io` when a parent directory cannot be created.
/// - Returns `RepoError::Db` when the SQLite database cannot be opened.
pub fn open_repository(backend: &StorageBackend) -> RepoResult<Box<dyn ItemRepository>> {
    match backend {
        StorageBackend::JsonFile { path } => {
            let repo = JsonItemRepository::open(path.clone())?;
            info!(
                "event=store_open module=repo status=ok backend=json path={}",
                path.display()
            );
            Ok(Box::new(repo))
        }
        StorageBackend::Sqlite { path, categories } => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent)?;
                }
            }
            let repo = SqliteItemRepository::new(open_db(path)?);
            for category in categories {
                repo.add_category(category)?;
            }
            info!(
                "event=store_open module=repo status=ok backend=sqlite path={} seeded_categories={}",
                path.display(),
                categories.len()
            );
            Ok(Box::new(repo))
        }
    }
}
