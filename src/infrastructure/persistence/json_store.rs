//! JSON File Combination Store
//!
//! 单文件 JSON 快照存储，写入采用 临时文件 + fsync + rename 的原子替换

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::application::ports::{CombinationSnapshot, CombinationStorePort, StoreError};

/// JSON 文件存储
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl CombinationStorePort for JsonFileStore {
    async fn load(&self) -> CombinationSnapshot {
        let data = match fs::read(&self.path).await {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::info!(path = ?self.path, "Data file not found, initializing with empty data");
                return CombinationSnapshot::empty();
            }
            Err(e) => {
                tracing::error!(path = ?self.path, error = %e, "Failed to read data file, starting fresh");
                return CombinationSnapshot::empty();
            }
        };

        match serde_json::from_slice::<CombinationSnapshot>(&data) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                tracing::error!(path = ?self.path, error = %e, "Failed to parse data file, starting fresh");
                CombinationSnapshot::empty()
            }
        }
    }

    async fn save(&self, snapshot: &CombinationSnapshot) -> Result<(), StoreError> {
        let data = serde_json::to_vec_pretty(snapshot)
            .map_err(|e| StoreError::SerializationError(e.to_string()))?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .await
                    .map_err(|e| StoreError::IoError(e.to_string()))?;
            }
        }

        let temp_path = self.temp_path();
        if let Err(e) = write_synced(&temp_path, &data).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(StoreError::IoError(e.to_string()));
        }

        if let Err(e) = fs::rename(&temp_path, &self.path).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(StoreError::IoError(e.to_string()));
        }

        // rename 已生效，目录项落盘失败只记录日志
        if let Err(e) = sync_parent_dir(&self.path).await {
            tracing::warn!(path = ?self.path, error = %e, "Failed to sync data directory");
        }

        tracing::debug!(
            path = ?self.path,
            front_mid = snapshot.front_mid.len(),
            mid_end = snapshot.mid_end.len(),
            current_index = snapshot.current_index,
            "Combination data saved"
        );

        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

/// 写入并 fsync，rename 之前数据必须已经落盘
async fn write_synced(path: &Path, data: &[u8]) -> std::io::Result<()> {
    let mut file = fs::File::create(path).await?;
    file.write_all(data).await?;
    file.sync_all().await
}

#[cfg(unix)]
async fn sync_parent_dir(path: &Path) -> std::io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            fs::File::open(parent).await?.sync_all().await
        }
        _ => Ok(()),
    }
}

#[cfg(not(unix))]
async fn sync_parent_dir(_path: &Path) -> std::io::Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use tempfile::tempdir;

    fn snapshot(index: usize) -> CombinationSnapshot {
        CombinationSnapshot {
            front_mid: vec!["f1|||m1".to_string()],
            mid_end: vec!["m1|||e1".to_string()],
            current_index: index,
            updated_at: Utc::now(),
        }
    }

    fn snapshot_with_time(index: usize, updated_at: chrono::DateTime<Utc>) -> CombinationSnapshot {
        CombinationSnapshot {
            updated_at,
            ..snapshot(index)
        }
    }

    #[tokio::test]
    async fn test_missing_file_loads_empty() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("video-combinations.json"));

        assert!(store.load().await.is_empty());
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("nested/video-combinations.json"));

        store.save(&snapshot(5)).await.unwrap();
        let loaded = store.load().await;

        assert_eq!(loaded, snapshot_with_time(5, loaded.updated_at));
        assert!(store.path().ends_with("nested/video-combinations.json"));
        assert!(store.path().is_file());
        assert!(!store.temp_path().exists());
    }

    #[tokio::test]
    async fn test_file_uses_camel_case_fields() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("video-combinations.json");
        let store = JsonFileStore::new(&path);

        store.save(&snapshot(2)).await.unwrap();
        let json: serde_json::Value =
            serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();

        assert_eq!(json["frontMid"][0], "f1|||m1");
        assert_eq!(json["midEnd"][0], "m1|||e1");
        assert_eq!(json["currentIndex"], 2);
        assert!(json["updatedAt"].is_string());
    }

    #[tokio::test]
    async fn test_corrupted_file_loads_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("video-combinations.json");
        std::fs::write(&path, b"{\"frontMid\": [\"f1|||m1\"").unwrap();

        let store = JsonFileStore::new(&path);
        assert!(store.load().await.is_empty());
    }

    #[tokio::test]
    async fn test_partial_legacy_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("video-combinations.json");
        std::fs::write(&path, br#"{"frontMid": ["a.mp4|||b.mp4"]}"#).unwrap();

        let loaded = JsonFileStore::new(&path).load().await;
        assert_eq!(loaded.front_mid, vec!["a.mp4|||b.mp4".to_string()]);
        assert!(loaded.mid_end.is_empty());
        assert_eq!(loaded.current_index, 0);
    }

    #[tokio::test]
    async fn test_save_replaces_previous_content() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("video-combinations.json"));

        store.save(&snapshot(1)).await.unwrap();
        store.save(&CombinationSnapshot::empty()).await.unwrap();

        assert!(store.load().await.is_empty());
    }

    #[tokio::test]
    async fn test_save_failure_is_reported() {
        let dir = tempdir().unwrap();
        // 父路径是普通文件，无法创建目录
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"").unwrap();
        let store = JsonFileStore::new(blocker.join("video-combinations.json"));

        assert!(matches!(
            store.save(&snapshot(0)).await,
            Err(StoreError::IoError(_))
        ));
    }

    #[tokio::test]
    async fn test_stale_temp_file_is_overwritten() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("video-combinations.json"));
        store.save(&snapshot(1)).await.unwrap();

        // 上次写入中途崩溃留下的半截临时文件
        std::fs::write(store.temp_path(), b"{\"frontMid\": [\"stale").unwrap();

        store.save(&snapshot(3)).await.unwrap();
        let loaded = store.load().await;

        assert_eq!(loaded, snapshot_with_time(3, loaded.updated_at));
        assert!(!store.temp_path().exists());
        let on_disk: CombinationSnapshot =
            serde_json::from_slice(&std::fs::read(store.path()).unwrap()).unwrap();
        assert_eq!(on_disk.current_index, 3);
    }

    #[tokio::test]
    async fn test_failed_temp_write_leaves_data_file_intact() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("video-combinations.json"));
        store.save(&snapshot(4)).await.unwrap();

        // 临时文件路径被目录占用，File::create 失败
        std::fs::create_dir(store.temp_path()).unwrap();

        assert!(matches!(
            store.save(&CombinationSnapshot::empty()).await,
            Err(StoreError::IoError(_))
        ));
        assert_eq!(store.load().await.current_index, 4);
    }
}
