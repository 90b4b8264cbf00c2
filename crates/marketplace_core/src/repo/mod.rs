//! Item store abstraction and its persistence backends.
//!
//! # Responsibility
//! - Define the storage contract every item backend implements.
//! - Isolate JSON-file and SQLite details from service/HTTP orchestration.
//!
//! # Invariants
//! - Repository writes must enforce `Item::validate()` before persistence.
//! - Repository APIs return semantic errors (`ItemNotFound`,
//!   `CategoryNotFound`, `InvalidInput`) in addition to transport errors.

use crate::db::DbError;
use crate::error::ErrorKind;
use crate::model::item::{Item, ItemId, ItemValidationError, ParseItemIdError};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod backend;
pub mod json_repo;
pub mod sqlite_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for item persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(ItemValidationError),
    /// Malformed id, empty keyword, or an item that already has an id.
    InvalidInput(String),
    ItemNotFound(ItemId),
    CategoryNotFound(String),
    Db(DbError),
    Io(std::io::Error),
    InvalidData(String),
}

impl RepoError {
    /// Classifies this error for callers that map failures to responses.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) | Self::InvalidInput(_) => ErrorKind::Validation,
            Self::ItemNotFound(_) | Self::CategoryNotFound(_) => ErrorKind::NotFound,
            Self::Db(_) | Self::Io(_) | Self::InvalidData(_) => ErrorKind::Storage,
        }
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::InvalidInput(message) => write!(f, "{message}"),
            Self::ItemNotFound(id) => write!(f, "item not found: {id}"),
            Self::CategoryNotFound(name) => write!(f, "category not found: {name}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::Io(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted item data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::Io(err) => Some(err),
            Self::InvalidInput(_)
            | Self::ItemNotFound(_)
            | Self::CategoryNotFound(_)
            | Self::InvalidData(_) => None,
        }
    }
}

impl From<ItemValidationError> for RepoError {
    fn from(value: ItemValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<ParseItemIdError> for RepoError {
    fn from(value: ParseItemIdError) -> Self {
        Self::InvalidInput(value.to_string())
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<std::io::Error> for RepoError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

/// Storage contract for listing items.
pub trait ItemRepository: Send + Sync {
    /// Persists `item` and writes the assigned id back into it.
    fn insert_item(&self, item: &mut Item) -> RepoResult<()>;
    /// Returns all items in storage order.
    fn list_items(&self) -> RepoResult<Vec<Item>>;
    fn get_item(&self, id: ItemId) -> RepoResult<Item>;
    /// Returns items whose name contains `keyword` (case-sensitive).
    fn search_items(&self, keyword: &str) -> RepoResult<Vec<Item>>;
}

impl<R: ItemRepository + ?Sized> ItemRepository for Box<R> {
    fn insert_item(&self, item: &mut Item) -> RepoResult<()> {
        (**self).insert_item(item)
    }

    fn list_items(&self) -> RepoResult<Vec<Item>> {
        (**self).list_items()
    }

    fn get_item(&self, id: ItemId) -> RepoResult<Item> {
        (**self).get_item(id)
    }

    fn search_items(&self, keyword: &str) -> RepoResult<Vec<Item>> {
        (**self).search_items(keyword)
    }
}

/// Write-path checks shared by every backend.
pub(crate) fn check_insertable(item: &Item) -> RepoResult<()> {
    if item.id.is_assigned() {
        return Err(RepoError::InvalidInput(format!(
            "item already has id {}",
            item.id
        )));
    }
    item.validate()?;
    Ok(())
}

pub(crate) fn check_keyword(keyword: &str) -> RepoResult<()> {
    if keyword.is_empty() {
        return Err(RepoError::InvalidInput("keyword is required".to_string()));
    }
    Ok(())
}
