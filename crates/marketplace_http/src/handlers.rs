//! Route handlers.

use crate::error::{ApiErrorResponse, MessageResponse};
use crate::request::AddItemRequest;
use crate::state::{run_blocking, AppState};
use axum::extract::{Path, Query, State};
use axum::http::header::CONTENT_TYPE;
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::{debug, info, warn};
use marketplace_core::{ImageError, Item};
use serde::{Deserialize, Serialize};
use std::io::ErrorKind as IoErrorKind;
use std::sync::Arc;

/// `{"items": [...]}` envelope with full records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemsResponse {
    pub items: Vec<Item>,
}

/// Item fields shown on detail and search results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDetail {
    pub name: String,
    pub category: String,
    pub image_name: String,
}

impl From<Item> for ItemDetail {
    fn from(item: Item) -> Self {
        Self {
            name: item.name,
            category: item.category,
            image_name: item.image_name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub items: Vec<ItemDetail>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub keyword: String,
}

/// `GET /`
pub async fn hello() -> Json<MessageResponse> {
    Json(MessageResponse::new("Hello, world!"))
}

/// `POST /items`: stores the image (if any), inserts the item and returns
/// every listed item.
pub async fn add_item(
    State(state): State<AppState>,
    request: AddItemRequest,
) -> Result<Json<ItemsResponse>, ApiErrorResponse> {
    let items = Arc::clone(&state.items);
    let images = Arc::clone(&state.images);

    let listed = run_blocking(move || {
        let mut item = request.to_item();
        let stored = match &request.image {
            Some(image) => Some(images.store(&image.bytes)?),
            None => None,
        };
        if let Some(stored) = &stored {
            item.image_name = stored.file_name.clone();
        }

        let created = match items.add_item(item) {
            Ok(created) => created,
            Err(err) => {
                if let Some(stored) = &stored {
                    if let Err(discard_err) = images.discard(stored) {
                        warn!(
                            "event=image_discard module=http status=error file={} error={discard_err}",
                            stored.file_name
                        );
                    }
                }
                return Err(err.into());
            }
        };
        info!(
            "event=item_add module=http status=ok id={} image={}",
            created.id, created.image_name
        );
        Ok(items.list_items()?)
    })
    .await?;

    Ok(Json(ItemsResponse { items: listed }))
}

/// `GET /items`
pub async fn get_items(
    State(state): State<AppState>,
) -> Result<Json<ItemsResponse>, ApiErrorResponse> {
    let items = Arc::clone(&state.items);
    let listed = run_blocking(move || Ok(items.list_items()?)).await?;
    Ok(Json(ItemsResponse { items: listed }))
}

/// `GET /items/{id}`
pub async fn get_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ItemDetail>, ApiErrorResponse> {
    let items = Arc::clone(&state.items);
    let item = run_blocking(move || Ok(items.get_item(&id)?)).await?;
    Ok(Json(item.into()))
}

/// `GET /search?keyword=`
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, ApiErrorResponse> {
    let items = Arc::clone(&state.items);
    let hits = run_blocking(move || Ok(items.search_items(&params.keyword)?)).await?;
    Ok(Json(SearchResponse {
        items: hits.into_iter().map(ItemDetail::from).collect(),
    }))
}

/// `GET /images/{filename}`: serves a stored image, falling back to the
/// default image when a well-formed name is unknown.
pub async fn get_image(
    State(state): State<AppState>,
    Path(file_name): Path<String>,
) -> Result<Response, ApiErrorResponse> {
    let images = Arc::clone(&state.images);
    let path = run_blocking(move || match images.resolve(&file_name) {
        Ok(path) => Ok(path),
        Err(ImageError::NotFound(missing)) => {
            debug!(
                "event=image_get module=http status=fallback missing={}",
                missing.display()
            );
            Ok(images.default_image_path())
        }
        Err(err) => {
            warn!("event=image_get module=http status=rejected error={err}");
            Err(err.into())
        }
    })
    .await?;

    let bytes = tokio::fs::read(&path).await.map_err(|err| {
        if err.kind() == IoErrorKind::NotFound {
            ApiErrorResponse::not_found("image not found")
        } else {
            ApiErrorResponse::from(ImageError::Io(err))
        }
    })?;

    info!(
        "event=image_get module=http status=ok path={}",
        path.display()
    );
    Ok(([(CONTENT_TYPE, "image/jpeg")], bytes).into_response())
}
