//! Data Transfer Objects

use serde::{Deserialize, Serialize};

use crate::application::{CombinationStats, NextCombination};
use crate::domain::combination::{Availability, SegmentId, UnavailableReason};

// ============================================================================
// 统一响应结构
// ============================================================================

/// 统一 API 响应格式
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub errno: i32,
    pub error: String,
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// 成功响应
    pub fn success(data: T) -> Self {
        Self {
            errno: 0,
            error: String::new(),
            data: Some(data),
        }
    }
}

/// 空数据响应
#[derive(Debug, Serialize)]
pub struct Empty {}

impl ApiResponse<Empty> {
    /// 成功但无数据
    pub fn ok() -> Self {
        Self::success(Empty {})
    }
}

// ============================================================================
// Combination DTOs
// ============================================================================

/// 只携带项目名的请求
#[derive(Debug, Default, Deserialize)]
pub struct ProjectRequest {
    #[serde(default)]
    pub project: Option<String>,
}

/// 三段组合请求（check / record）
#[derive(Debug, Deserialize)]
pub struct CombinationRequest {
    #[serde(default)]
    pub project: Option<String>,
    pub front: String,
    pub mid: String,
    pub end: String,
}

#[derive(Debug, Serialize)]
pub struct CheckCombinationResponse {
    pub available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<UnavailableReason>,
}

impl From<Availability> for CheckCombinationResponse {
    fn from(availability: Availability) -> Self {
        Self {
            available: availability.available,
            reason: availability.reason,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct NextCombinationRequest {
    #[serde(default)]
    pub project: Option<String>,
    #[serde(default)]
    pub front_assets: Vec<SegmentId>,
    #[serde(default)]
    pub mid_assets: Vec<SegmentId>,
    #[serde(default)]
    pub end_assets: Vec<SegmentId>,
    #[serde(default)]
    pub current_index: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct NextCombinationResponse {
    pub found: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub front: Option<SegmentId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mid: Option<SegmentId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<SegmentId>,
    pub current_index: usize,
    pub exhausted: bool,
    pub total_combinations: usize,
    pub used_combinations: usize,
}

impl From<NextCombination> for NextCombinationResponse {
    fn from(next: NextCombination) -> Self {
        let (front, mid, end) = match next.combination {
            Some(c) => (Some(c.front), Some(c.mid), Some(c.end)),
            None => (None, None, None),
        };
        Self {
            found: next.found,
            front,
            mid,
            end,
            current_index: next.current_index,
            exhausted: next.exhausted,
            total_combinations: next.total_combinations,
            used_combinations: next.used_combinations,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub front_mid_count: usize,
    pub mid_end_count: usize,
    pub total_records: usize,
}

impl From<CombinationStats> for StatsResponse {
    fn from(stats: CombinationStats) -> Self {
        Self {
            front_mid_count: stats.front_mid_count,
            mid_end_count: stats.mid_end_count,
            total_records: stats.total_records,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct IndexResponse {
    pub current_index: usize,
}
