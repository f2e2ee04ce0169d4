//! 应用层 - 查询（读操作）
//!
//! CQRS 查询侧：只读操作，可并发执行

mod combination_queries;

pub mod handlers;

pub use combination_queries::*;
