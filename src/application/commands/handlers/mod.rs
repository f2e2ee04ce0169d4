//! Command Handlers 实现

mod combination_command_handlers;

pub use combination_command_handlers::*;
