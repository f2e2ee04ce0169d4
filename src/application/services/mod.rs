//! Application Services
//!
//! 跨端口的有状态服务

mod combination_service;

pub use combination_service::{CombinationService, CombinationStats, NextCombination};
