//! clipweave - 三段式视频素材组合引擎
//!
//! 为 前段 / 中段 / 后段 素材分配组合，保证任意两个相邻片段对
//! （前+中、中+后）在整个历史中不重复。
//!
//! 领域层 (domain/):
//! - Combination Context: 片段对键、去重索引、组合枚举
//!
//! 应用层 (application/):
//! - Ports: CombinationStore, EngineRegistry
//! - Services: CombinationService 门面
//! - Commands / Queries: CQRS 处理器
//!
//! 基础设施层 (infrastructure/):
//! - Persistence: JSON 文件存储（原子写入）
//! - Memory: 按项目的引擎注册表
//! - HTTP: RESTful API

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
