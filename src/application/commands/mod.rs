//! 应用层 - 命令（写操作）
//!
//! CQRS 命令侧：所有会修改组合状态的操作

mod combination_commands;

pub mod handlers;

pub use combination_commands::*;
