//! Item image storage.
//!
//! Images are written as `{item_id}_{unix_ts}_{uuid}{ext}` and exposed under
//! `/uploads`. Only raster formats are accepted, and the extension always
//! comes from the accepted content type so `/uploads` never serves markup.

use async_trait::async_trait;
use core_config::{ConfigError, FromEnv, env_or_default, env_parse};
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::io::AsyncWriteExt;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{CatalogError, CatalogResult};

/// URL prefix under which stored images are served.
pub const UPLOADS_URL_PREFIX: &str = "/uploads";

/// Upload settings.
///
/// | Variable           | Default   |
/// |--------------------|-----------|
/// | `UPLOAD_DIR`       | `uploads` |
/// | `UPLOAD_MAX_BYTES` | 5242880   |
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadConfig {
    pub dir: PathBuf,
    pub max_bytes: usize,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("uploads"),
            max_bytes: 5 * 1024 * 1024,
        }
    }
}

impl FromEnv for UploadConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let max_bytes: usize = env_parse("UPLOAD_MAX_BYTES", "5242880")?;
        if max_bytes == 0 {
            return Err(ConfigError::ParseError {
                key: "UPLOAD_MAX_BYTES".to_string(),
                details: "must be greater than zero".to_string(),
            });
        }

        Ok(Self {
            dir: PathBuf::from(env_or_default("UPLOAD_DIR", "uploads")),
            max_bytes,
        })
    }
}

#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Stores the bytes under a new `file_name` and returns the public URL.
    /// Existing files are never overwritten.
    async fn save(&self, file_name: &str, data: &[u8]) -> CatalogResult<String>;
}

/// Writes images into a directory on local disk.
#[derive(Clone, Debug)]
pub struct LocalImageStore {
    dir: PathBuf,
}

impl LocalImageStore {
    /// Creates the upload directory if it does not exist yet.
    pub async fn new(dir: impl AsRef<Path>) -> CatalogResult<Self> {
        let dir = dir.as_ref().to_path_buf();
        tokio::fs::create_dir_all(&dir).await?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[async_trait]
impl ImageStore for LocalImageStore {
    async fn save(&self, file_name: &str, data: &[u8]) -> CatalogResult<String> {
        let path = self.dir.join(file_name);
        let mut file = tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await?;
        file.write_all(data).await?;
        file.flush().await?;

        tracing::debug!(path = %path.display(), bytes = data.len(), "Stored image");
        Ok(format!("{UPLOADS_URL_PREFIX}/{file_name}"))
    }
}

/// Keeps images in memory (for development/testing).
#[derive(Clone, Debug, Default)]
pub struct InMemoryImageStore {
    files: Arc<RwLock<HashMap<String, Vec<u8>>>>,
}

impl InMemoryImageStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, file_name: &str) -> Option<Vec<u8>> {
        self.files.read().await.get(file_name).cloned()
    }
}

#[async_trait]
impl ImageStore for InMemoryImageStore {
    async fn save(&self, file_name: &str, data: &[u8]) -> CatalogResult<String> {
        match self.files.write().await.entry(file_name.to_string()) {
            Entry::Occupied(_) => Err(std::io::Error::new(
                ErrorKind::AlreadyExists,
                format!("{file_name} already exists"),
            )
            .into()),
            Entry::Vacant(slot) => {
                slot.insert(data.to_vec());
                Ok(format!("{UPLOADS_URL_PREFIX}/{file_name}"))
            }
        }
    }
}

/// Accepted upload types and the extension each is stored with.
const RASTER_TYPES: [(&str, &str); 5] = [
    ("image/jpeg", ".jpg"),
    ("image/jpg", ".jpg"),
    ("image/png", ".png"),
    ("image/gif", ".gif"),
    ("image/webp", ".webp"),
];

/// Returns the stored extension for a supported raster content type.
pub fn ensure_image(content_type: Option<&str>) -> CatalogResult<&'static str> {
    let content_type = content_type
        .ok_or_else(|| CatalogError::InvalidImage("missing content type".to_string()))?;
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    RASTER_TYPES
        .iter()
        .find(|(ct, _)| *ct == essence)
        .map(|(_, ext)| *ext)
        .ok_or_else(|| {
            CatalogError::InvalidImage(format!(
                "unsupported content type '{content_type}', expected jpeg, png, gif or webp"
            ))
        })
}

/// `{item_id}_{unix_ts}_{uuid}{ext}`
pub fn image_file_name(item_id: i32, unix_ts: i64, ext: &str) -> String {
    format!("{item_id}_{unix_ts}_{}{ext}", Uuid::new_v4().simple())
}
