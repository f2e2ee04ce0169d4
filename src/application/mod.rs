//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（CombinationStore、EngineRegistry）
//! - services: 组合引擎门面
//! - commands: CQRS 命令及处理器
//! - queries: CQRS 查询及处理器
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod ports;
pub mod queries;
pub mod services;

// Re-exports
pub use commands::{
    ClearCombinationsCommand, GetNextCombinationCommand, RecordCombinationCommand,
    ResetIndexCommand,
    // Handlers
    handlers::{
        ClearCombinationsHandler, GetNextCombinationHandler, RecordCombinationHandler,
        ResetIndexHandler,
    },
};

pub use error::ApplicationError;

pub use ports::{CombinationSnapshot, CombinationStorePort, EngineRegistryPort, StoreError};

pub use queries::{
    CheckCombinationQuery, GetCombinationStatsQuery, GetCurrentIndexQuery,
    // Handlers
    handlers::{CheckCombinationHandler, GetCombinationStatsHandler, GetCurrentIndexHandler},
};

pub use services::{CombinationService, CombinationStats, NextCombination};
