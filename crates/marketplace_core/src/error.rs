//! Error classification shared by the store and image layers.
//!
//! Callers map failures by kind instead of matching every variant of every
//! layer's error enum.

use std::fmt::{Display, Formatter};

/// Coarse failure class of a core operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Caller input is malformed or violates an item invariant.
    Validation,
    /// The requested item, category or image does not exist.
    NotFound,
    /// The backing file system or database failed.
    Storage,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation => write!(f, "validation"),
            Self::NotFound => write!(f, "not_found"),
            Self::Storage => write!(f, "storage"),
        }
    }
}
