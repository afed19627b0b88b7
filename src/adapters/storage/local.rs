use crate::domain::model::WriteOutcome;
use crate::domain::ports::Storage;
use crate::utils::error::{HoursError, Result};
use crate::utils::validation::validate_hours_name;
use async_trait::async_trait;
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

pub const HOURS_FILE_EXTENSION: &str = "json";

/// rw-r--r--
pub const DEFAULT_FILE_MODE: u32 = 0o644;

/// One `<key>.json` file per key in a single flat directory.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
    file_mode: u32,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            file_mode: DEFAULT_FILE_MODE,
        }
    }

    pub fn with_file_mode(mut self, file_mode: u32) -> Self {
        self.file_mode = file_mode;
        self
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.base_path
            .join(format!("{}.{}", key, HOURS_FILE_EXTENSION))
    }

    fn not_found_or_io(err: io::Error, key: &str) -> HoursError {
        if err.kind() == io::ErrorKind::NotFound {
            HoursError::NotFound {
                name: key.to_string(),
            }
        } else {
            HoursError::IoError(err)
        }
    }

    async fn write_atomically(&self, final_path: &Path, data: &[u8]) -> io::Result<()> {
        // 暫存檔以 "." 開頭，列表時不會被當成 hours
        let temp_path = self.base_path.join(format!(".{}.tmp", Uuid::new_v4()));

        let result = self.write_and_rename(&temp_path, final_path, data).await;
        if result.is_err() {
            if let Err(e) = fs::remove_file(&temp_path).await {
                tracing::debug!("Failed to clean up {}: {}", temp_path.display(), e);
            }
        }
        result
    }

    async fn write_and_rename(
        &self,
        temp_path: &Path,
        final_path: &Path,
        data: &[u8],
    ) -> io::Result<()> {
        let mut file = fs::File::create(temp_path).await?;
        file.write_all(data).await?;
        file.sync_all().await?;
        drop(file);

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(temp_path, std::fs::Permissions::from_mode(self.file_mode))
                .await?;
        }

        fs::rename(temp_path, final_path).await
    }
}

#[async_trait]
impl Storage for LocalStorage {
    async fn list_keys(&self) -> Result<Vec<String>> {
        let mut entries = match fs::read_dir(&self.base_path).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                // 第一次使用：建立空目錄，但仍回報沒有資料
                tracing::info!(
                    "Hours directory {} does not exist, creating it",
                    self.base_path.display()
                );
                fs::create_dir_all(&self.base_path).await?;
                return Err(HoursError::NoHours);
            }
            Err(e) => return Err(e.into()),
        };

        let mut keys = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(HOURS_FILE_EXTENSION) {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                tracing::warn!("Skipping non UTF-8 hours file {}", path.display());
                continue;
            };
            if stem.starts_with('.') {
                continue;
            }
            // 只列出之後能用名稱讀回的檔案
            if let Err(e) = validate_hours_name(stem) {
                tracing::warn!("Skipping hours file {}: {}", path.display(), e);
                continue;
            }
            keys.push(stem.to_string());
        }

        if keys.is_empty() {
            tracing::debug!("No hours files in {}", self.base_path.display());
            return Err(HoursError::NoHours);
        }

        keys.sort();
        Ok(keys)
    }

    async fn exists(&self, key: &str) -> Result<bool> {
        Ok(fs::try_exists(self.path_for(key)).await?)
    }

    async fn read(&self, key: &str) -> Result<Vec<u8>> {
        fs::read(self.path_for(key))
            .await
            .map_err(|e| Self::not_found_or_io(e, key))
    }

    async fn write(&self, key: &str, data: &[u8]) -> Result<WriteOutcome> {
        let path = self.path_for(key);
        // check-then-write：並發寫入同一個名稱時只是參考值
        let outcome = if fs::try_exists(&path).await? {
            WriteOutcome::Replaced
        } else {
            WriteOutcome::Created
        };

        fs::create_dir_all(&self.base_path).await?;
        self.write_atomically(&path, data).await?;

        Ok(outcome)
    }

    async fn delete(&self, key: &str) -> Result<()> {
        fs::remove_file(self.path_for(key))
            .await
            .map_err(|e| Self::not_found_or_io(e, key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_missing_directory_is_created_on_list() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("hours");
        let storage = LocalStorage::new(&dir);

        assert!(matches!(storage.list_keys().await, Err(HoursError::NoHours)));
        assert!(dir.is_dir());

        // 第二次呼叫仍是 NoHours，不是錯誤
        assert!(matches!(storage.list_keys().await, Err(HoursError::NoHours)));
    }

    #[tokio::test]
    async fn test_list_only_json_files_sorted() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path());

        std::fs::write(temp_dir.path().join("b.json"), b"{}").unwrap();
        std::fs::write(temp_dir.path().join("a.json"), b"{}").unwrap();
        std::fs::write(temp_dir.path().join("notes.txt"), b"ignore").unwrap();
        std::fs::write(temp_dir.path().join(".stale.tmp"), b"ignore").unwrap();

        let keys = storage.list_keys().await.unwrap();
        assert_eq!(keys, vec!["a".to_string(), "b".to_string()]);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_list_skips_names_that_cannot_be_read_back() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path());

        std::fs::write(temp_dir.path().join("good.json"), b"{}").unwrap();
        std::fs::write(temp_dir.path().join("a\\b.json"), b"{}").unwrap();
        std::fs::write(temp_dir.path().join(" .json"), b"{}").unwrap();

        let keys = storage.list_keys().await.unwrap();
        assert_eq!(keys, vec!["good".to_string()]);
    }

    #[tokio::test]
    async fn test_directory_without_json_is_no_hours() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("readme.md"), b"hi").unwrap();
        let storage = LocalStorage::new(temp_dir.path());

        assert!(matches!(storage.list_keys().await, Err(HoursError::NoHours)));
    }

    #[tokio::test]
    async fn test_write_reports_created_then_replaced() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path().join("nested"));

        let first = storage.write("shop", b"one").await.unwrap();
        let second = storage.write("shop", b"two").await.unwrap();

        assert_eq!(first, WriteOutcome::Created);
        assert_eq!(second, WriteOutcome::Replaced);
        assert_eq!(storage.read("shop").await.unwrap(), b"two".to_vec());
        assert!(storage.path_for("shop").ends_with("shop.json"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_written_file_mode() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path()).with_file_mode(0o600);
        storage.write("shop", b"{}").await.unwrap();

        let mode = std::fs::metadata(storage.path_for("shop"))
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[tokio::test]
    async fn test_read_and_delete_missing_key() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path());

        assert!(matches!(
            storage.read("ghost").await,
            Err(HoursError::NotFound { .. })
        ));
        assert!(matches!(
            storage.delete("ghost").await,
            Err(HoursError::NotFound { .. })
        ));
        assert!(!storage.exists("ghost").await.unwrap());
    }
}
