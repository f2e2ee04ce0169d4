//! Engine Registry Port - 组合引擎实例管理
//!
//! 每个项目一个独立的 CombinationService，由注册表负责创建和持有

use async_trait::async_trait;
use std::sync::Arc;

use crate::application::services::CombinationService;
use crate::domain::combination::{CombinationError, ProjectName};

/// Engine Registry Port
#[async_trait]
pub trait EngineRegistryPort: Send + Sync {
    /// 获取项目对应的引擎，不存在时从存储加载并创建
    async fn engine(&self, project: &ProjectName) -> Arc<CombinationService>;

    /// 未指定项目时使用的默认项目
    fn default_project(&self) -> &ProjectName;

    /// 已加载的项目列表
    fn loaded_projects(&self) -> Vec<String>;

    /// 按可选的项目名解析引擎，名称无效时返回错误
    async fn resolve(&self, project: Option<&str>) -> Result<Arc<CombinationService>, CombinationError> {
        match project {
            Some(name) => {
                let name = ProjectName::new(name)?;
                Ok(self.engine(&name).await)
            }
            None => Ok(self.engine(self.default_project()).await),
        }
    }
}
