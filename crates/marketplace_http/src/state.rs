//! Shared handler state.

use crate::error::ApiErrorResponse;
use log::error;
use marketplace_core::{ImageStore, ItemRepository, ItemService};
use std::sync::Arc;

/// Item service over whichever backend was selected at startup.
pub type SharedItemService = ItemService<Box<dyn ItemRepository>>;

#[derive(Clone)]
pub struct AppState {
    pub items: Arc<SharedItemService>,
    pub images: Arc<ImageStore>,
}

impl AppState {
    pub fn new(repo: Box<dyn ItemRepository>, images: ImageStore) -> Self {
        Self {
            items: Arc::new(ItemService::new(repo)),
            images: Arc::new(images),
        }
    }
}

/// Runs a blocking store/file operation on tokio's blocking pool.
pub(crate) async fn run_blocking<T, F>(task: F) -> Result<T, ApiErrorResponse>
where
    F: FnOnce() -> Result<T, ApiErrorResponse> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(task).await.map_err(|err| {
        error!("event=blocking_task module=http status=error error={err}");
        ApiErrorResponse::internal_error()
    })?
}
