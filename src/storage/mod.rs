//! Local-disk storage for uploaded assets.
//!
//! Files land under `{upload_dir}/{kind}/{uuid}.{ext}` and are served back
//! at `/uploads/{kind}/{file}`. Image kinds carry a pool of default assets
//! used when a disk write fails, so content creation survives a broken
//! storage volume. Audio has no default: the file is the content.

use std::path::PathBuf;

use rand::seq::IndexedRandom;
use tokio::fs;
use tracing::{info, warn};

use crate::errors::AppError;

/// Default asset pool for image kinds, relative to the uploads root.
/// Deployments seed these files alongside the data directory.
const DEFAULT_IMAGES: &[&str] = &[
    "defaults/sanctuary.jpg",
    "defaults/gathering.jpg",
    "defaults/candles.jpg",
    "defaults/stained-glass.jpg",
];

/// What kind of asset is being stored. Determines the subdirectory and
/// whether the default-asset fallback applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    Image,
    Photo,
    Audio,
    Thumbnail,
}

impl UploadKind {
    pub fn dir(self) -> &'static str {
        match self {
            UploadKind::Image => "images",
            UploadKind::Photo => "photos",
            UploadKind::Audio => "audio",
            UploadKind::Thumbnail => "thumbnails",
        }
    }

    fn has_default(self) -> bool {
        !matches!(self, UploadKind::Audio)
    }
}

/// Local-disk storage adapter for uploaded files.
#[derive(Clone)]
pub struct Storage {
    root: PathBuf,
    public_base: Option<String>,
}

impl Storage {
    /// Open the storage root, creating the per-kind subdirectories.
    pub async fn new(root: PathBuf, public_base: Option<String>) -> Result<Self, AppError> {
        for dir in ["images", "photos", "audio", "thumbnails", "defaults"] {
            fs::create_dir_all(root.join(dir))
                .await
                .map_err(|e| AppError::Storage(format!("Failed to create upload dir: {}", e)))?;
        }
        info!("Upload storage directory: {}", root.display());
        Ok(Self { root, public_base })
    }

    /// Write a file under the kind's subdirectory and return its public path.
    pub async fn store(
        &self,
        kind: UploadKind,
        ext: &str,
        data: &[u8],
    ) -> Result<String, AppError> {
        let file_name = format!("{}.{}", uuid::Uuid::new_v4(), ext);
        let path = self.root.join(kind.dir()).join(&file_name);

        fs::write(&path, data)
            .await
            .map_err(|e| AppError::Storage(format!("Failed to write {}: {}", path.display(), e)))?;

        Ok(self.public_path(&format!("{}/{}", kind.dir(), file_name)))
    }

    /// Store a file, falling back to a random default asset when the disk
    /// write fails and the kind has defaults. The bool is true when the
    /// fallback was taken.
    pub async fn store_with_fallback(
        &self,
        kind: UploadKind,
        ext: &str,
        data: &[u8],
    ) -> Result<(String, bool), AppError> {
        match self.store(kind, ext, data).await {
            Ok(url) => Ok((url, false)),
            Err(err) if kind.has_default() => {
                warn!("Upload failed, substituting default asset: {}", err);
                Ok((self.default_asset(), true))
            }
            Err(err) => Err(err),
        }
    }

    /// Pick a random default asset path.
    pub fn default_asset(&self) -> String {
        let mut rng = rand::rng();
        let rel = DEFAULT_IMAGES.choose(&mut rng).copied().unwrap_or(DEFAULT_IMAGES[0]);
        self.public_path(rel)
    }

    fn public_path(&self, rel: &str) -> String {
        match &self.public_base {
            Some(base) => format!("{}/uploads/{}", base, rel),
            None => format!("/uploads/{}", rel),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn open_storage(dir: &std::path::Path) -> Storage {
        Storage::new(dir.to_path_buf(), None).await.unwrap()
    }

    #[tokio::test]
    async fn test_store_writes_file_and_returns_public_path() {
        let dir = tempfile::tempdir().unwrap();
        let storage = open_storage(dir.path()).await;

        let url = storage
            .store(UploadKind::Image, "png", b"fake png bytes")
            .await
            .unwrap();

        assert!(url.starts_with("/uploads/images/"));
        assert!(url.ends_with(".png"));

        let file_name = url.rsplit('/').next().unwrap();
        let on_disk = dir.path().join("images").join(file_name);
        assert_eq!(std::fs::read(on_disk).unwrap(), b"fake png bytes");
    }

    #[tokio::test]
    async fn test_public_base_prefixes_urls() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Storage::new(
            dir.path().to_path_buf(),
            Some("https://church.example.org".to_string()),
        )
        .await
        .unwrap();

        let url = storage
            .store(UploadKind::Thumbnail, "jpg", b"bytes")
            .await
            .unwrap();
        assert!(url.starts_with("https://church.example.org/uploads/thumbnails/"));
    }

    #[tokio::test]
    async fn test_image_write_failure_falls_back_to_default() {
        let dir = tempfile::tempdir().unwrap();
        let storage = open_storage(dir.path()).await;

        // Replace the images subdirectory with a file so writes under it fail.
        std::fs::remove_dir(dir.path().join("images")).unwrap();
        std::fs::write(dir.path().join("images"), b"not a dir").unwrap();

        let (url, fallback) = storage
            .store_with_fallback(UploadKind::Image, "png", b"bytes")
            .await
            .unwrap();

        assert!(fallback);
        assert!(url.starts_with("/uploads/defaults/"));
    }

    #[tokio::test]
    async fn test_audio_write_failure_is_a_hard_error() {
        let dir = tempfile::tempdir().unwrap();
        let storage = open_storage(dir.path()).await;

        std::fs::remove_dir(dir.path().join("audio")).unwrap();
        std::fs::write(dir.path().join("audio"), b"not a dir").unwrap();

        let result = storage
            .store_with_fallback(UploadKind::Audio, "mp3", b"bytes")
            .await;
        assert!(matches!(result, Err(AppError::Storage(_))));
    }
}
