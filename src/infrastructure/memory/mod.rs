//! Memory Layer - In-Memory State Management
//!
//! 持有各项目的组合引擎实例

mod engine_registry;

pub use engine_registry::{EngineRegistryConfig, InMemoryEngineRegistry};
