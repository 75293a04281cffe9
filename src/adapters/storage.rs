use crate::core::state::HashStore;
use crate::core::Storage;
use crate::utils::error::{Result, WatchError};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }
}

impl Storage for LocalStorage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let full_path = self.base_path.join(path);
        let data = tokio::fs::read(full_path).await?;
        Ok(data)
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = self.base_path.join(path);

        if let Some(parent) = full_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        tokio::fs::write(full_path, data).await?;
        Ok(())
    }
}

impl HashStore<LocalStorage> {
    /// State file on the local filesystem, e.g. `/data/hashes.txt`.
    pub fn at_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| WatchError::StateError {
                message: format!("'{}' does not name a file", path.display()),
            })?;

        // 相對路徑如 "hashes.txt" 沒有上層目錄，使用目前目錄
        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        Ok(HashStore::new(LocalStorage::new(parent), file_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Fingerprint;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_write_creates_missing_directories() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path());

        storage.write_file("nested/dir/state.txt", b"x").await.unwrap();

        let data = storage.read_file("nested/dir/state.txt").await.unwrap();
        assert_eq!(data, b"x");
    }

    #[tokio::test]
    async fn test_missing_file_is_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path());

        let err = storage.read_file("absent.txt").await.unwrap_err();
        assert!(matches!(err, WatchError::IoError(ref e) if e.kind() == std::io::ErrorKind::NotFound));
    }

    #[tokio::test]
    async fn test_hash_store_at_nested_path() {
        let temp_dir = TempDir::new().unwrap();
        let state_path = temp_dir.path().join("data").join("hashes.txt");
        let store = HashStore::at_path(&state_path).unwrap();
        assert_eq!(store.key(), "hashes.txt");

        assert!(store.load().await.is_none());
        let fingerprint = Fingerprint::of("<html></html>", Some("<p>x</p>"));
        store.save(&fingerprint).await.unwrap();

        assert!(state_path.exists());
        assert_eq!(store.load().await, Some(fingerprint));
    }

    #[test]
    fn test_relative_path_uses_current_directory() {
        let store = HashStore::at_path("hashes.txt").unwrap();
        assert_eq!(store.storage().base_path(), Path::new("."));
        assert!(HashStore::at_path("/").is_err());
    }
}
