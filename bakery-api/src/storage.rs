/// On-disk storage for gallery images
///
/// Images live in one flat directory, addressed by the filename recorded in
/// the gallery row. Files are created with `create_new`, so a name that is
/// already taken is reported as [`std::io::ErrorKind::AlreadyExists`] instead
/// of being overwritten.

use std::io;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;

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

    /// Creates the upload directory if it does not exist
    pub async fn ensure_dir(&self) -> io::Result<()> {
        tokio::fs::create_dir_all(&self.dir).await
    }

    /// Full path of a stored image
    ///
    /// `filename` must be a bare name; anything containing a path separator
    /// is rejected.
    pub fn path_for(&self, filename: &str) -> io::Result<PathBuf> {
        if filename.is_empty()
            || filename.contains(['/', '\\'])
            || filename == "."
            || filename == ".."
        {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Invalid image filename: {:?}", filename),
            ));
        }
        Ok(self.dir.join(filename))
    }

    /// Writes a new image; fails if `filename` already exists
    pub async fn save(&self, filename: &str, data: &[u8]) -> io::Result<PathBuf> {
        let path = self.path_for(filename)?;

        let mut file = tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await?;
        file.write_all(data).await?;
        file.flush().await?;

        tracing::debug!(path = %path.display(), bytes = data.len(), "Stored gallery image");
        Ok(path)
    }

    pub async fn remove(&self, filename: &str) -> io::Result<()> {
        let path = self.path_for(filename)?;
        tokio::fs::remove_file(&path).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_store(name: &str) -> ImageStore {
        let dir = std::env::temp_dir().join(format!(
            "bakery-images-{}-{}",
            name,
            std::process::id()
        ));
        ImageStore::new(dir)
    }

    #[tokio::test]
    async fn test_save_and_remove() {
        let store = scratch_store("save");
        store.ensure_dir().await.unwrap();

        let path = store.save("20240101_120000_cake.png", b"png-bytes").await.unwrap();
        assert_eq!(tokio::fs::read(&path).await.unwrap(), b"png-bytes");

        store.remove("20240101_120000_cake.png").await.unwrap();
        assert!(!path.exists());

        tokio::fs::remove_dir_all(store.dir()).await.ok();
    }

    #[tokio::test]
    async fn test_save_refuses_to_overwrite() {
        let store = scratch_store("collide");
        store.ensure_dir().await.unwrap();

        store.save("same.png", b"first").await.unwrap();
        let err = store.save("same.png", b"second").await.unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::AlreadyExists);

        let kept = tokio::fs::read(store.dir().join("same.png")).await.unwrap();
        assert_eq!(kept, b"first");

        tokio::fs::remove_dir_all(store.dir()).await.ok();
    }

    #[tokio::test]
    async fn test_remove_missing_file_is_an_error() {
        let store = scratch_store("missing");
        store.ensure_dir().await.unwrap();

        let err = store.remove("never-written.png").await.unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);

        tokio::fs::remove_dir_all(store.dir()).await.ok();
    }

    #[test]
    fn test_path_for_rejects_separators() {
        let store = ImageStore::new("/srv/uploads");
        assert!(store.path_for("../secret.png").is_err());
        assert!(store.path_for("a\\b.png").is_err());
        assert!(store.path_for("").is_err());
        assert_eq!(
            store.path_for("cake.png").unwrap(),
            PathBuf::from("/srv/uploads/cake.png")
        );
    }
}
