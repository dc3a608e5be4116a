//! Fleet image storage on the local filesystem.

use std::path::{Component, Path, PathBuf};

use tracing::{debug, warn};

use truckscout_core::{Error, Result};

/// Image bytes with their detected MIME type.
#[derive(Debug, Clone)]
pub struct StoredImage {
    pub bytes: Vec<u8>,
    pub content_type: &'static str,
}

/// Reads images referenced by dataset rows, relative to a root directory.
#[derive(Debug, Clone)]
pub struct FilesystemImageStore {
    root: PathBuf,
}

impl FilesystemImageStore {
    /// Create a store rooted at the given directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a stored reference, refusing anything that leaves the root.
    fn full_path(&self, reference: &str) -> Result<PathBuf> {
        let relative = Path::new(reference);
        let escapes = relative.components().any(|c| {
            matches!(
                c,
                Component::ParentDir | Component::RootDir | Component::Prefix(_)
            )
        });
        if escapes || reference.is_empty() {
            warn!(reference = %reference, "Rejected image path outside image root");
            return Err(Error::InvalidInput(format!(
                "image path '{}' is not inside the image root",
                reference
            )));
        }
        Ok(self.root.join(relative))
    }

    /// Read an image. A missing file is `NotFound`, never a panic.
    ///
    /// Symlinks are followed before the containment check, so a link inside
    /// the root that points elsewhere is rejected.
    pub async fn read(&self, reference: &str) -> Result<StoredImage> {
        let path = self.full_path(reference)?;
        let not_found = |e: std::io::Error| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::NotFound(format!("image '{}'", reference))
            } else {
                Error::Io(e)
            }
        };

        let resolved = tokio::fs::canonicalize(&path).await.map_err(not_found)?;
        let root = tokio::fs::canonicalize(&self.root).await?;
        if !resolved.starts_with(&root) {
            warn!(
                reference = %reference,
                resolved = %resolved.display(),
                "Rejected image link outside image root"
            );
            return Err(Error::InvalidInput(format!(
                "image path '{}' is not inside the image root",
                reference
            )));
        }
        debug!(full_path = %resolved.display(), "image_store: read");

        let bytes = tokio::fs::read(&resolved).await.map_err(not_found)?;

        let content_type = infer::get(&bytes)
            .map(|kind| kind.mime_type())
            .unwrap_or("application/octet-stream");

        Ok(StoredImage {
            bytes,
            content_type,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_HEADER: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0];

    #[tokio::test]
    async fn test_read_detects_png() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("fleet")).unwrap();
        std::fs::write(dir.path().join("fleet/truck.png"), PNG_HEADER).unwrap();

        let store = FilesystemImageStore::new(dir.path());
        let image = store.read("fleet/truck.png").await.unwrap();
        assert_eq!(image.content_type, "image/png");
        assert_eq!(image.bytes, PNG_HEADER);
    }

    #[tokio::test]
    async fn test_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = FilesystemImageStore::new(dir.path());
        let err = store.read("nope.jpg").await.unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_symlink_out_of_root_rejected() {
        let outside = tempfile::tempdir().unwrap();
        std::fs::write(outside.path().join("secret.png"), PNG_HEADER).unwrap();

        let root = tempfile::tempdir().unwrap();
        std::os::unix::fs::symlink(
            outside.path().join("secret.png"),
            root.path().join("truck.png"),
        )
        .unwrap();

        let store = FilesystemImageStore::new(root.path());
        let err = store.read("truck.png").await.unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_symlink_within_root_allowed() {
        let root = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(root.path().join("fleet")).unwrap();
        std::fs::write(root.path().join("fleet/truck.png"), PNG_HEADER).unwrap();
        std::os::unix::fs::symlink(
            root.path().join("fleet/truck.png"),
            root.path().join("latest.png"),
        )
        .unwrap();

        let store = FilesystemImageStore::new(root.path());
        let image = store.read("latest.png").await.unwrap();
        assert_eq!(image.content_type, "image/png");
    }

    #[tokio::test]
    async fn test_escaping_paths_rejected() {
        let store = FilesystemImageStore::new("/srv/images");
        for reference in ["../secret.png", "/etc/passwd", "a/../../b.png", ""] {
            let err = store.read(reference).await.unwrap_err();
            assert!(matches!(err, Error::InvalidInput(_)), "{}", reference);
        }
    }
}
