//! Combination Store Port - 组合数据持久化
//!
//! 定义组合引擎快照的加载/保存接口，具体实现在 infrastructure/persistence 层

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Store 错误
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// 组合引擎快照（完整的持久化表示）
///
/// 文件格式:
/// ```json
/// {
///   "frontMid": ["<first>|||<second>"],
///   "midEnd": ["<first>|||<second>"],
///   "currentIndex": 0,
///   "updatedAt": "2024-01-01T00:00:00Z"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinationSnapshot {
    #[serde(default)]
    pub front_mid: Vec<String>,

    #[serde(default)]
    pub mid_end: Vec<String>,

    #[serde(default)]
    pub current_index: usize,

    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl CombinationSnapshot {
    pub fn empty() -> Self {
        Self {
            front_mid: Vec::new(),
            mid_end: Vec::new(),
            current_index: 0,
            updated_at: Utc::now(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.front_mid.is_empty() && self.mid_end.is_empty() && self.current_index == 0
    }
}

impl Default for CombinationSnapshot {
    fn default() -> Self {
        Self::empty()
    }
}

/// Combination Store Port
///
/// - `load` 从不失败：文件不存在或损坏时返回空快照
/// - `save` 必须原子替换，失败时原样返回错误，不重试
#[async_trait]
pub trait CombinationStorePort: Send + Sync {
    /// 加载快照
    async fn load(&self) -> CombinationSnapshot;

    /// 保存快照
    async fn save(&self, snapshot: &CombinationSnapshot) -> Result<(), StoreError>;

    /// 存储位置描述（用于日志）
    fn location(&self) -> String;
}
