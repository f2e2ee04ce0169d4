//! Combination Queries - 组合只读查询

use crate::domain::combination::Combination;

/// 检查组合是否可用
#[derive(Debug, Clone)]
pub struct CheckCombinationQuery {
    pub project: Option<String>,
    pub combination: Combination,
}

/// 获取组合统计
#[derive(Debug, Clone)]
pub struct GetCombinationStatsQuery {
    pub project: Option<String>,
}

/// 获取当前遍历游标
#[derive(Debug, Clone)]
pub struct GetCurrentIndexQuery {
    pub project: Option<String>,
}
