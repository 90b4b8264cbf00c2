//! Request parsing for `POST /items`.
//!
//! Accepts `multipart/form-data` (with an optional `image` file part) or
//! `application/x-www-form-urlencoded` (text fields only). Validation runs
//! inside the extractor so handlers only ever see valid requests.

use crate::error::ApiErrorResponse;
use axum::extract::{FromRequest, Multipart, Request};
use axum::http::header::CONTENT_TYPE;
use axum::Form;
use log::debug;
use marketplace_core::{validate_upload, Item};
use serde::Deserialize;

/// Uploaded image part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Validated body of an add-item request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddItemRequest {
    pub name: String,
    pub category: String,
    pub image: Option<ImageUpload>,
}

#[derive(Debug, Default, Deserialize)]
struct AddItemFields {
    #[serde(default)]
    name: String,
    #[serde(default)]
    category: String,
}

impl AddItemRequest {
    /// Builds the unsaved item; `image_name` stays the default until an
    /// upload is stored.
    pub fn to_item(&self) -> Item {
        Item::new(self.name.clone(), self.category.clone())
    }

    fn validate(&self) -> Result<(), ApiErrorResponse> {
        self.to_item().validate()?;
        if let Some(image) = &self.image {
            validate_upload(&image.file_name, &image.bytes)?;
        }
        Ok(())
    }
}

impl<S> FromRequest<S> for AddItemRequest
where
    S: Send + Sync,
{
    type Rejection = ApiErrorResponse;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_multipart = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.starts_with("multipart/form-data"));

        let request = if is_multipart {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(|rejection| ApiErrorResponse::bad_request(rejection.body_text()))?;
            read_multipart(multipart).await?
        } else {
            let Form(fields) = Form::<AddItemFields>::from_request(req, state)
                .await
                .map_err(|rejection| ApiErrorResponse::bad_request(rejection.body_text()))?;
            AddItemRequest {
                name: fields.name,
                category: fields.category,
                image: None,
            }
        };

        debug!(
            "event=add_item_parse module=http status=ok multipart={} image_len={}",
            is_multipart,
            request.image.as_ref().map_or(0, |image| image.bytes.len())
        );
        request.validate()?;
        Ok(request)
    }
}

async fn read_multipart(mut multipart: Multipart) -> Result<AddItemRequest, ApiErrorResponse> {
    let mut request = AddItemRequest::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| ApiErrorResponse::bad_request(err.to_string()))?
    {
        let field_name = field.name().map(str::to_owned);
        match field_name.as_deref() {
            Some("name") => request.name = read_text(field).await?,
            Some("category") => request.category = read_text(field).await?,
            Some("image") => {
                let file_name = field.file_name().unwrap_or_default().to_owned();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|err| ApiErrorResponse::bad_request(err.to_string()))?;
                // Browsers send an empty, unnamed part when no file was chosen.
                if !(file_name.is_empty() && bytes.is_empty()) {
                    request.image = Some(ImageUpload {
                        file_name,
                        bytes: bytes.to_vec(),
                    });
                }
            }
            _ => {}
        }
    }

    Ok(request)
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> Result<String, ApiErrorResponse> {
    field
        .text()
        .await
        .map_err(|err| ApiErrorResponse::bad_request(err.to_string()))
}
