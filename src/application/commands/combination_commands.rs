//! Combination Commands - 组合写操作
//!
//! `project` 为空时使用默认项目

use crate::domain::combination::{Combination, SegmentId};

/// 记录已使用的组合
#[derive(Debug, Clone)]
pub struct RecordCombinationCommand {
    pub project: Option<String>,
    pub combination: Combination,
}

/// 获取下一个可用组合（命中时推进游标）
#[derive(Debug, Clone)]
pub struct GetNextCombinationCommand {
    pub project: Option<String>,
    pub front_assets: Vec<SegmentId>,
    pub mid_assets: Vec<SegmentId>,
    pub end_assets: Vec<SegmentId>,
    /// 起始索引，为空时从持久化游标继续
    pub current_index: Option<usize>,
}

/// 清除所有组合记录
#[derive(Debug, Clone)]
pub struct ClearCombinationsCommand {
    pub project: Option<String>,
}

/// 重置遍历游标
#[derive(Debug, Clone)]
pub struct ResetIndexCommand {
    pub project: Option<String>,
}
