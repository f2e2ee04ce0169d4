//! Persistence Layer - 数据持久化
//!
//! 组合引擎快照的 JSON 文件存储

mod json_store;

pub use json_store::JsonFileStore;
