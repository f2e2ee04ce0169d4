//! Dedup Index - 已使用的相邻片段对
//!
//! 去重规则:
//! - (front, mid) 已出现过 → 重复
//! - (mid, end) 已出现过 → 重复
//! - 非相邻片段相同（如 front 与 end 相同）不算重复

use serde::Serialize;
use std::collections::HashSet;

use super::{Combination, PairKey, SegmentId};

/// 组合不可用的原因
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UnavailableReason {
    FrontMidExists,
    MidEndExists,
}

impl UnavailableReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FrontMidExists => "front_mid_exists",
            Self::MidEndExists => "mid_end_exists",
        }
    }
}

/// 可用性检查结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Availability {
    pub available: bool,
    pub reason: Option<UnavailableReason>,
}

impl Availability {
    pub fn available() -> Self {
        Self {
            available: true,
            reason: None,
        }
    }

    pub fn blocked(reason: UnavailableReason) -> Self {
        Self {
            available: false,
            reason: Some(reason),
        }
    }
}

/// 记录结果：哪些键是本次新插入的（用于回滚）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RecordOutcome {
    pub front_mid_inserted: bool,
    pub mid_end_inserted: bool,
}

impl RecordOutcome {
    pub fn changed(&self) -> bool {
        self.front_mid_inserted || self.mid_end_inserted
    }
}

/// 相邻片段对索引
///
/// 单调增长，只有 [`DedupIndex::clear`] 会清空。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DedupIndex {
    front_mid: HashSet<PairKey>,
    mid_end: HashSet<PairKey>,
}

impl DedupIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_keys(
        front_mid: impl IntoIterator<Item = PairKey>,
        mid_end: impl IntoIterator<Item = PairKey>,
    ) -> Self {
        Self {
            front_mid: front_mid.into_iter().collect(),
            mid_end: mid_end.into_iter().collect(),
        }
    }

    pub fn compose_key(first: &SegmentId, second: &SegmentId) -> PairKey {
        PairKey::new(first.clone(), second.clone())
    }

    /// 检查组合是否可用
    ///
    /// 先查前中对，再查中后对：两对都已使用时报告 `FrontMidExists`。
    pub fn is_available(&self, front: &SegmentId, mid: &SegmentId, end: &SegmentId) -> Availability {
        if self.front_mid.contains(&Self::compose_key(front, mid)) {
            return Availability::blocked(UnavailableReason::FrontMidExists);
        }
        if self.mid_end.contains(&Self::compose_key(mid, end)) {
            return Availability::blocked(UnavailableReason::MidEndExists);
        }
        Availability::available()
    }

    pub fn check(&self, combination: &Combination) -> Availability {
        self.is_available(&combination.front, &combination.mid, &combination.end)
    }

    /// 记录组合的两个相邻对（幂等）
    pub fn record_usage(&mut self, combination: &Combination) -> RecordOutcome {
        RecordOutcome {
            front_mid_inserted: self.front_mid.insert(combination.front_mid()),
            mid_end_inserted: self.mid_end.insert(combination.mid_end()),
        }
    }

    /// 撤销一次 [`DedupIndex::record_usage`]，只移除当次新插入的键
    pub fn revert_usage(&mut self, combination: &Combination, outcome: RecordOutcome) {
        if outcome.front_mid_inserted {
            self.front_mid.remove(&combination.front_mid());
        }
        if outcome.mid_end_inserted {
            self.mid_end.remove(&combination.mid_end());
        }
    }

    /// 清空索引，返回清空前的内容
    pub fn clear(&mut self) -> DedupIndex {
        std::mem::take(self)
    }

    pub fn front_mid_count(&self) -> usize {
        self.front_mid.len()
    }

    pub fn mid_end_count(&self) -> usize {
        self.mid_end.len()
    }

    pub fn front_mid_keys(&self) -> impl Iterator<Item = &PairKey> {
        self.front_mid.iter()
    }

    pub fn mid_end_keys(&self) -> impl Iterator<Item = &PairKey> {
        self.mid_end.iter()
    }
}
