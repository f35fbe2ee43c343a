//! On-disk storage for generated illustrations.
//!
//! Each completed madlib owns at most one image, written as
//! `<image_dir>/<madlib_id>.png`. There is no in-memory index; presence on
//! disk is the only record that an image exists.

use crate::error::RecordKind;
use crate::{Error, Result};
use image::ImageFormat;
use std::path::{Path, PathBuf};
use uuid::Uuid;

pub struct ImageStore {
    image_dir: PathBuf,
}

impl ImageStore {
    /// Open the store, creating `image_dir` if needed.
    pub fn new(image_dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(image_dir)?;
        Ok(Self {
            image_dir: image_dir.to_path_buf(),
        })
    }

    pub fn image_dir(&self) -> &Path {
        &self.image_dir
    }

    pub fn filename_for(madlib_id: &Uuid) -> String {
        format!("{}.png", madlib_id)
    }

    pub fn path_for(&self, madlib_id: &Uuid) -> PathBuf {
        self.image_dir.join(Self::filename_for(madlib_id))
    }

    pub fn exists(&self, madlib_id: &Uuid) -> bool {
        self.path_for(madlib_id).is_file()
    }

    fn save_png_sync(image_data: Vec<u8>, path: PathBuf) -> Result<()> {
        let image = image::load_from_memory(&image_data)?;
        image.save_with_format(path, ImageFormat::Png)?;
        Ok(())
    }

    /// Decode `image_data` and write it as PNG for `madlib_id`.
    pub async fn save_png(&self, madlib_id: &Uuid, image_data: &[u8]) -> Result<PathBuf> {
        let path = self.path_for(madlib_id);

        tokio::task::spawn_blocking({
            let image_data = image_data.to_vec();
            let path = path.clone();
            move || Self::save_png_sync(image_data, path)
        })
        .await
        .map_err(|e| Error::Invariant(format!("Image save task join error: {}", e)))??;

        tracing::info!("Saved image to {}", path.display());
        Ok(path)
    }

    /// Read a stored image by bare filename.
    ///
    /// Names with path components resolve to not-found rather than escaping
    /// the image directory.
    pub async fn read(&self, filename: &str) -> Result<Vec<u8>> {
        if !is_plain_filename(filename) {
            tracing::warn!("Rejected image filename {:?}", filename);
            return Err(Error::not_found(RecordKind::Image, filename));
        }

        match tokio::fs::read(self.image_dir.join(filename)).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(Error::not_found(RecordKind::Image, filename))
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// Content type for stored image bytes, sniffed from the magic number.
pub fn content_type(bytes: &[u8]) -> &'static str {
    match bytes {
        [0x89, b'P', b'N', b'G', ..] => "image/png",
        [0xFF, 0xD8, 0xFF, ..] => "image/jpeg",
        [b'R', b'I', b'F', b'F', _, _, _, _, b'W', b'E', b'B', b'P', ..] => "image/webp",
        _ => "image/png",
    }
}

fn is_plain_filename(filename: &str) -> bool {
    !filename.is_empty()
        && filename != "."
        && filename != ".."
        && !filename.contains(&['/', '\\'][..])
        && !filename.contains("..")
}


#[cfg(test)]
mod tests {
    use super::test_support::{jpeg_bytes, png_bytes};
    use super::*;
    use tempfile::TempDir;

    fn store() -> (TempDir, ImageStore) {
        let dir = TempDir::new().unwrap();
        let store = ImageStore::new(&dir.path().join("images")).unwrap();
        (dir, store)
    }

    #[test]
    fn test_new_creates_directory() {
        let (_dir, store) = store();
        assert!(store.image_dir().is_dir());
    }

    #[tokio::test]
    async fn test_save_png_writes_named_file() {
        let (_dir, store) = store();
        let id = Uuid::new_v4();

        let path = store.save_png(&id, &png_bytes()).await.unwrap();

        assert_eq!(path, store.image_dir().join(format!("{}.png", id)));
        assert!(store.exists(&id));
        let saved = image::open(&path).unwrap();
        assert_eq!(saved.width(), 4);
    }

    #[tokio::test]
    async fn test_save_png_transcodes_jpeg() {
        let (_dir, store) = store();
        let id = Uuid::new_v4();

        let path = store.save_png(&id, &jpeg_bytes()).await.unwrap();

        let bytes = std::fs::read(path).unwrap();
        assert_eq!(&bytes[..4], &[0x89, 0x50, 0x4E, 0x47]);
    }

    #[tokio::test]
    async fn test_save_png_rejects_undecodable_bytes() {
        let (_dir, store) = store();
        let id = Uuid::new_v4();

        let err = store.save_png(&id, b"not an image").await.unwrap_err();

        assert!(matches!(err, Error::Image(_)));
        assert!(!store.exists(&id));
    }

    #[tokio::test]
    async fn test_read_round_trips_saved_image() {
        let (_dir, store) = store();
        let id = Uuid::new_v4();
        let path = store.save_png(&id, &png_bytes()).await.unwrap();

        let bytes = store.read(&ImageStore::filename_for(&id)).await.unwrap();

        assert_eq!(bytes, std::fs::read(path).unwrap());
    }

    #[tokio::test]
    async fn test_read_missing_file_is_not_found() {
        let (_dir, store) = store();

        let err = store.read("missing.png").await.unwrap_err();
        assert!(matches!(
            err,
            Error::NotFound {
                kind: RecordKind::Image,
                ..
            }
        ));
    }

    #[test]
    fn test_content_type_sniffs_magic_bytes() {
        assert_eq!(content_type(&png_bytes()), "image/png");
        assert_eq!(content_type(&jpeg_bytes()), "image/jpeg");
        assert_eq!(content_type(b"RIFF\0\0\0\0WEBPVP8 "), "image/webp");
        assert_eq!(content_type(b""), "image/png");
    }

    #[tokio::test]
    async fn test_read_rejects_path_traversal() {
        let (dir, store) = store();
        std::fs::write(dir.path().join("secret.png"), b"secret").unwrap();

        for name in ["../secret.png", "..", "a/b.png", "a\\b.png", ""] {
            let err = store.read(name).await.unwrap_err();
            assert!(matches!(err, Error::NotFound { .. }), "{name}");
        }
    }
}
