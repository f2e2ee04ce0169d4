//! In-Memory Engine Registry
//!
//! 按项目懒加载 CombinationService，数据文件位于 `<data_dir>/<project>/<file_name>`

use async_trait::async_trait;
use dashmap::DashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::application::ports::EngineRegistryPort;
use crate::application::services::CombinationService;
use crate::domain::combination::ProjectName;
use crate::infrastructure::persistence::JsonFileStore;

/// 注册表配置
#[derive(Debug, Clone)]
pub struct EngineRegistryConfig {
    /// 数据根目录
    pub data_dir: PathBuf,
    /// 每个项目的数据文件名
    pub file_name: String,
    /// 默认项目
    pub default_project: ProjectName,
}

/// 内存引擎注册表
pub struct InMemoryEngineRegistry {
    config: EngineRegistryConfig,
    engines: DashMap<String, Arc<CombinationService>>,
    /// 串行化引擎创建，避免同一项目被并发加载两次
    open_lock: Mutex<()>,
}

impl InMemoryEngineRegistry {
    pub fn new(config: EngineRegistryConfig) -> Self {
        Self {
            config,
            engines: DashMap::new(),
            open_lock: Mutex::new(()),
        }
    }

    /// 项目数据文件路径
    pub fn data_file(&self, project: &ProjectName) -> PathBuf {
        self.config
            .data_dir
            .join(project.as_str())
            .join(&self.config.file_name)
    }
}

#[async_trait]
impl EngineRegistryPort for InMemoryEngineRegistry {
    async fn engine(&self, project: &ProjectName) -> Arc<CombinationService> {
        if let Some(engine) = self.engines.get(project.as_str()) {
            return engine.clone();
        }

        let _guard = self.open_lock.lock().await;
        if let Some(engine) = self.engines.get(project.as_str()) {
            return engine.clone();
        }

        let store = Arc::new(JsonFileStore::new(self.data_file(project)));
        let engine = CombinationService::open(store).await.arc();
        self.engines
            .insert(project.as_str().to_string(), engine.clone());

        tracing::info!(project = %project, "Combination engine registered");
        engine
    }

    fn default_project(&self) -> &ProjectName {
        &self.config.default_project
    }

    fn loaded_projects(&self) -> Vec<String> {
        let mut projects: Vec<String> = self.engines.iter().map(|e| e.key().clone()).collect();
        projects.sort();
        projects
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::combination::{Combination, SegmentId};
    use std::path::Path;
    use tempfile::tempdir;

    fn registry(dir: &Path) -> InMemoryEngineRegistry {
        InMemoryEngineRegistry::new(EngineRegistryConfig {
            data_dir: dir.to_path_buf(),
            file_name: "video-combinations.json".to_string(),
            default_project: ProjectName::new("default").unwrap(),
        })
    }

    #[tokio::test]
    async fn test_same_project_returns_same_engine() {
        let dir = tempdir().unwrap();
        let registry = registry(dir.path());
        let project = ProjectName::new("alpha").unwrap();

        let a = registry.engine(&project).await;
        let b = registry.engine(&project).await;

        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(registry.loaded_projects(), vec!["alpha".to_string()]);
    }

    #[tokio::test]
    async fn test_projects_are_isolated() {
        let dir = tempdir().unwrap();
        let registry = registry(dir.path());
        let combo = Combination::new("f1", "m1", "e1");

        let alpha = registry.resolve(Some("alpha")).await.unwrap();
        let beta = registry.resolve(Some("beta")).await.unwrap();
        alpha.record(&combo).await.unwrap();

        assert!(!alpha.check(&combo).await.available);
        assert!(beta.check(&combo).await.available);
        assert!(dir.path().join("alpha/video-combinations.json").exists());
        assert!(!dir.path().join("beta/video-combinations.json").exists());
    }

    #[tokio::test]
    async fn test_resolve_defaults_and_validates() {
        let dir = tempdir().unwrap();
        let registry = registry(dir.path());

        registry.resolve(None).await.unwrap();
        assert_eq!(registry.loaded_projects(), vec!["default".to_string()]);

        assert!(registry.resolve(Some("../escape")).await.is_err());
    }

    #[tokio::test]
    async fn test_state_survives_restart() {
        let dir = tempdir().unwrap();
        let combo = Combination::new("f1", "m1", "e1");
        let front: Vec<SegmentId> = vec!["f1".into(), "f2".into()];
        let mid: Vec<SegmentId> = vec!["m1".into()];
        let end: Vec<SegmentId> = vec!["e1".into(), "e2".into()];

        {
            let engine = registry(dir.path()).resolve(None).await.unwrap();
            let next = engine.get_next(&front, &mid, &end, None).await.unwrap();
            engine.record(&next.combination.unwrap()).await.unwrap();
        }

        let engine = registry(dir.path()).resolve(None).await.unwrap();
        assert!(!engine.check(&combo).await.available);
        assert_eq!(engine.current_index().await, 1);
        assert_eq!(engine.stats().await.total_records, 2);

        // 前中对 (f1,m1) 与中后对 (m1,e1) 已用，只剩 (f2,m1,e2)
        let next = engine.get_next(&front, &mid, &end, None).await.unwrap();
        assert_eq!(next.current_index, 3);
    }
}
