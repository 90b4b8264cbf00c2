//! Item domain model.
//!
//! # Responsibility
//! - Define the canonical listing record shared by every store backend.
//! - Provide validation used by write paths before persistence.
//!
//! # Invariants
//! - `id` is `ItemId::UNASSIGNED` until a store inserts the item.
//! - `name`, `category` and `image_name` are never blank once persisted.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Image name recorded when a listing is submitted without an image.
pub const DEFAULT_IMAGE_NAME: &str = "default.jpg";

/// Store-assigned item identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(i64);

impl ItemId {
    /// Marker carried by items that have not been inserted yet.
    pub const UNASSIGNED: ItemId = ItemId(0);

    /// Wraps a raw id read from storage.
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn get(self) -> i64 {
        self.0
    }

    /// Returns whether a store has assigned this id.
    pub fn is_assigned(self) -> bool {
        self.0 > 0
    }

    /// Returns the id following this one, or `None` once `i64::MAX` is used.
    pub fn checked_next(self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }
}

impl Display for ItemId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error returned when text cannot be read as an `ItemId`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseItemIdError {
    pub input: String,
}

impl Display for ParseItemIdError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid item id: `{}`", self.input)
    }
}

impl Error for ParseItemIdError {}

impl FromStr for ItemId {
    type Err = ParseItemIdError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().parse::<i64>() {
            Ok(id) if id > 0 => Ok(Self(id)),
            _ => Err(ParseItemIdError {
                input: value.to_string(),
            }),
        }
    }
}

/// Field-level validation failures for `Item`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemValidationError {
    EmptyName,
    EmptyCategory,
    EmptyImageName,
}

impl Display for ItemValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "name is required"),
            Self::EmptyCategory => write!(f, "category is required"),
            Self::EmptyImageName => write!(f, "image_name is required"),
        }
    }
}

impl Error for ItemValidationError {}

/// A listed product record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    /// Category name. The relational store keeps it as a foreign key.
    pub category: String,
    /// File name inside the image directory.
    pub image_name: String,
}

impl Item {
    /// Creates an item that is not yet persisted.
    ///
    /// The image name defaults to `DEFAULT_IMAGE_NAME`.
    pub fn new(name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            id: ItemId::UNASSIGNED,
            name: name.into(),
            category: category.into(),
            image_name: DEFAULT_IMAGE_NAME.to_string(),
        }
    }

    /// Replaces the image name.
    pub fn with_image_name(mut self, image_name: impl Into<String>) -> Self {
        self.image_name = image_name.into();
        self
    }

    /// Checks field invariants required before persistence.
    ///
    /// # Errors
    /// - Returns the first blank required field, in declaration order.
    pub fn validate(&self) -> Result<(), ItemValidationError> {
        if self.name.trim().is_empty() {
            return Err(ItemValidationError::EmptyName);
        }
        if self.category.trim().is_empty() {
            return Err(ItemValidationError::EmptyCategory);
        }
        if self.image_name.trim().is_empty() {
            return Err(ItemValidationError::EmptyImageName);
        }
        Ok(())
    }
}
