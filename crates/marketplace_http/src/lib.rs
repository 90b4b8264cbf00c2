//! HTTP surface for the marketplace listing backend.
//!
//! # Responsibility
//! - Map REST-over-JSON requests onto `marketplace_core` use cases.
//! - Translate core error kinds into status codes.
//!
//! # Invariants
//! - Handlers never touch storage before request validation succeeds.
//! - Blocking store calls run off the async worker threads.

pub mod config;
pub mod error;
pub mod handlers;
pub mod request;
pub mod routes;
pub mod server;
pub mod state;

pub use config::{ConfigError, ServerConfig};
pub use error::{ApiErrorResponse, MessageResponse};
pub use routes::{cors_layer, router};
pub use server::{serve, ServerError};
pub use state::AppState;
