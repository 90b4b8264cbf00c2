//! Listing domain model.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//! - Keep one item shape for both storage backends and the HTTP surface.
//!
//! # Invariants
//! - Every persisted item is identified by a store-assigned `ItemId`.
//! - Ids are assigned once, at insert time.

pub mod item;
