//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod combination_store;
mod engine_registry;

pub use combination_store::{CombinationSnapshot, CombinationStorePort, StoreError};
pub use engine_registry::EngineRegistryPort;
