//! Content-addressed image storage.
//!
//! # Responsibility
//! - Store uploaded `.jpg` images under their SHA-256 digest.
//! - Resolve stored file names back to paths without escaping the image
//!   directory.
//!
//! # Invariants
//! - Identical bytes always map to the same file name and are written once.
//! - `resolve` only returns paths directly inside the image directory.

use crate::error::ErrorKind;
use crate::model::item::DEFAULT_IMAGE_NAME;
use log::debug;
use sha2::{Digest, Sha256};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs;
use std::path::{Component, Path, PathBuf};

const IMAGE_EXTENSION: &str = ".jpg";

pub type ImageResult<T> = Result<T, ImageError>;

#[derive(Debug)]
pub enum ImageError {
    InvalidExtension(String),
    EmptyImage,
    InvalidPath(String),
    NotFound(PathBuf),
    Io(std::io::Error),
}

impl ImageError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidExtension(_) | Self::EmptyImage | Self::InvalidPath(_) => {
                ErrorKind::Validation
            }
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Io(_) => ErrorKind::Storage,
        }
    }
}

impl Display for ImageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidExtension(name) => {
                write!(f, "only .jpg files are allowed, got `{name}`")
            }
            Self::EmptyImage => write!(f, "image data is empty"),
            Self::InvalidPath(name) => write!(f, "invalid image path: `{name}`"),
            Self::NotFound(path) => write!(f, "image not found: {}", path.display()),
            Self::Io(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ImageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ImageError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

/// Checks an uploaded file before it is stored.
///
/// # Errors
/// - `InvalidExtension` unless `file_name` ends with `.jpg` (any case).
/// - `EmptyImage` when `bytes` is empty.
pub fn validate_upload(file_name: &str, bytes: &[u8]) -> ImageResult<()> {
    if !file_name.to_ascii_lowercase().ends_with(IMAGE_EXTENSION) {
        return Err(ImageError::InvalidExtension(file_name.to_string()));
    }
    if bytes.is_empty() {
        return Err(ImageError::EmptyImage);
    }
    Ok(())
}

/// Result of `ImageStore::store`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredImage {
    pub file_name: String,
    /// `false` when identical bytes were already on disk.
    pub created: bool,
}

/// Image directory handle.
#[derive(Debug, Clone)]
pub struct ImageStore {
    dir: PathBuf,
}

impl ImageStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Stores `bytes` as `<sha256-hex>.jpg`.
    ///
    /// Existing files with the same digest are reused untouched.
    pub fn store(&self, bytes: &[u8]) -> ImageResult<StoredImage> {
        if bytes.is_empty() {
            return Err(ImageError::EmptyImage);
        }

        let file_name = content_file_name(bytes);
        let path = self.dir.join(&file_name);
        if path.exists() {
            debug!("event=image_store module=image status=reused file={file_name}");
            return Ok(StoredImage {
                file_name,
                created: false,
            });
        }

        fs::create_dir_all(&self.dir)?;
        fs::write(&path, bytes)?;
        debug!(
            "event=image_store module=image status=ok file={file_name} bytes={}",
            bytes.len()
        );
        Ok(StoredImage {
            file_name,
            created: true,
        })
    }

    /// Removes an image written by `store` when the listing that referenced
    /// it was not saved. Reused files are left alone.
    pub fn discard(&self, image: &StoredImage) -> ImageResult<()> {
        if !image.created {
            return Ok(());
        }
        match fs::remove_file(self.dir.join(&image.file_name)) {
            Ok(()) => {
                debug!(
                    "event=image_discard module=image status=ok file={}",
                    image.file_name
                );
                Ok(())
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    /// Maps a stored file name to its path inside the image directory.
    ///
    /// # Errors
    /// - `InvalidPath` for empty, nested, absolute or parent-relative names.
    /// - `InvalidExtension` when the name does not end with `.jpg`.
    /// - `NotFound` when the name is well formed but no such file exists.
    pub fn resolve(&self, file_name: &str) -> ImageResult<PathBuf> {
        if !is_plain_file_name(file_name) {
            return Err(ImageError::InvalidPath(file_name.to_string()));
        }
        if !file_name.ends_with(IMAGE_EXTENSION) {
            return Err(ImageError::InvalidExtension(file_name.to_string()));
        }

        let path = self.dir.join(file_name);
        if !path.is_file() {
            return Err(ImageError::NotFound(path));
        }
        Ok(path)
    }

    /// Path of the image served when a requested one is missing.
    pub fn default_image_path(&self) -> PathBuf {
        self.dir.join(DEFAULT_IMAGE_NAME)
    }
}

fn content_file_name(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}{IMAGE_EXTENSION}", hasher.finalize())
}

fn is_plain_file_name(file_name: &str) -> bool {
    if file_name.is_empty() || file_name.contains('\\') {
        return false;
    }
    let mut components = Path::new(file_name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}
