//! Combination Service - 组合引擎门面
//!
//! 组合 DedupIndex、Enumerator 与 CombinationStorePort，对外提供
//! check / record / get_next / stats / clear / reset_index / current_index。
//!
//! 并发模型:
//! - 所有写操作持有写锁直到落盘完成，同一时刻最多一个写操作
//! - 读操作持有读锁，可并发，但不会观察到未落盘的中间状态
//! - 落盘失败时回滚内存修改，保证内存与磁盘一致

use serde::Serialize;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::application::error::ApplicationError;
use crate::application::ports::{CombinationSnapshot, CombinationStorePort};
use crate::domain::combination::{
    Availability, Combination, DedupIndex, Enumerator, PairKey, ScanOutcome, SegmentId,
};

/// 获取下一个组合的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NextCombination {
    pub found: bool,
    pub combination: Option<Combination>,
    /// 找到时为命中的线性索引，否则为本次扫描的起始索引
    pub current_index: usize,
    pub exhausted: bool,
    pub total_combinations: usize,
    /// 近似值：前中对数量，不是已耗尽组合的精确计数
    pub used_combinations: usize,
}

/// 组合统计
///
/// `total_records` 是两个不同键空间的数量之和，不是不同组合的数量
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CombinationStats {
    pub front_mid_count: usize,
    pub mid_end_count: usize,
    pub total_records: usize,
}

#[derive(Debug, Default)]
struct EngineState {
    index: DedupIndex,
    cursor: usize,
}

impl EngineState {
    fn snapshot(&self) -> CombinationSnapshot {
        CombinationSnapshot {
            front_mid: encode_keys(self.index.front_mid_keys()),
            mid_end: encode_keys(self.index.mid_end_keys()),
            current_index: self.cursor,
            updated_at: chrono::Utc::now(),
        }
    }
}

/// 组合引擎
pub struct CombinationService {
    store: Arc<dyn CombinationStorePort>,
    state: RwLock<EngineState>,
}

impl CombinationService {
    /// 从存储加载状态并创建引擎
    pub async fn open(store: Arc<dyn CombinationStorePort>) -> Self {
        let snapshot = store.load().await;
        let location = store.location();

        let index = DedupIndex::from_keys(
            decode_keys(&location, "frontMid", &snapshot.front_mid),
            decode_keys(&location, "midEnd", &snapshot.mid_end),
        );

        tracing::info!(
            location = %location,
            front_mid = index.front_mid_count(),
            mid_end = index.mid_end_count(),
            current_index = snapshot.current_index,
            "Combination engine loaded"
        );

        Self {
            store,
            state: RwLock::new(EngineState {
                index,
                cursor: snapshot.current_index,
            }),
        }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// 检查组合是否可用
    pub async fn check(&self, combination: &Combination) -> Availability {
        self.state.read().await.index.check(combination)
    }

    /// 记录已使用的组合
    pub async fn record(&self, combination: &Combination) -> Result<(), ApplicationError> {
        let mut state = self.state.write().await;
        let outcome = state.index.record_usage(combination);

        if let Err(e) = self.store.save(&state.snapshot()).await {
            state.index.revert_usage(combination, outcome);
            tracing::error!(combination = %combination, error = %e, "Failed to persist combination record");
            return Err(e.into());
        }

        tracing::info!(
            front = %combination.front,
            mid = %combination.mid,
            end = %combination.end,
            new_pairs = outcome.changed(),
            "Recorded combination"
        );
        Ok(())
    }

    /// 获取下一个可用组合
    ///
    /// `start` 为空时从持久化的游标继续。找到时游标推进到 `(index + 1) % total`
    /// 并落盘；耗尽时游标不变。
    pub async fn get_next(
        &self,
        front: &[SegmentId],
        mid: &[SegmentId],
        end: &[SegmentId],
        start: Option<usize>,
    ) -> Result<NextCombination, ApplicationError> {
        let enumerator = Enumerator::new(front, mid, end)?;
        let total = enumerator.total();

        let mut state = self.state.write().await;
        let start = start.unwrap_or(state.cursor);
        let used = state.index.front_mid_count();

        match enumerator.scan(start, &state.index) {
            ScanOutcome::Empty => Ok(NextCombination {
                found: false,
                combination: None,
                current_index: 0,
                exhausted: true,
                total_combinations: 0,
                used_combinations: 0,
            }),
            ScanOutcome::Exhausted => {
                tracing::debug!(start = start, total = total, "All combinations exhausted");
                Ok(NextCombination {
                    found: false,
                    combination: None,
                    current_index: start,
                    exhausted: true,
                    total_combinations: total,
                    used_combinations: used,
                })
            }
            ScanOutcome::Found { index, combination } => {
                let previous = std::mem::replace(&mut state.cursor, (index + 1) % total);

                if let Err(e) = self.store.save(&state.snapshot()).await {
                    state.cursor = previous;
                    tracing::error!(index = index, error = %e, "Failed to persist iteration index");
                    return Err(e.into());
                }

                tracing::debug!(
                    index = index,
                    next_index = state.cursor,
                    combination = %combination,
                    "Next combination selected"
                );

                Ok(NextCombination {
                    found: true,
                    combination: Some(combination),
                    current_index: index,
                    exhausted: false,
                    total_combinations: total,
                    used_combinations: used,
                })
            }
        }
    }

    /// 统计信息
    pub async fn stats(&self) -> CombinationStats {
        let state = self.state.read().await;
        let front_mid_count = state.index.front_mid_count();
        let mid_end_count = state.index.mid_end_count();
        CombinationStats {
            front_mid_count,
            mid_end_count,
            total_records: front_mid_count + mid_end_count,
        }
    }

    /// 清除所有组合记录，并将游标归零
    pub async fn clear(&self) -> Result<(), ApplicationError> {
        let mut state = self.state.write().await;
        let previous = std::mem::take(&mut *state);

        if let Err(e) = self.store.save(&state.snapshot()).await {
            *state = previous;
            tracing::error!(error = %e, "Failed to persist cleared combinations");
            return Err(e.into());
        }

        tracing::info!("All combination records cleared");
        Ok(())
    }

    /// 重置遍历游标
    pub async fn reset_index(&self) -> Result<(), ApplicationError> {
        let mut state = self.state.write().await;
        let previous = std::mem::replace(&mut state.cursor, 0);

        if let Err(e) = self.store.save(&state.snapshot()).await {
            state.cursor = previous;
            tracing::error!(error = %e, "Failed to persist iteration index reset");
            return Err(e.into());
        }

        tracing::info!("Iteration index reset");
        Ok(())
    }

    /// 当前持久化的游标
    pub async fn current_index(&self) -> usize {
        self.state.read().await.cursor
    }
}

fn encode_keys<'a>(keys: impl Iterator<Item = &'a PairKey>) -> Vec<String> {
    let mut encoded: Vec<String> = keys.map(PairKey::encode).collect();
    encoded.sort_unstable();
    encoded
}

fn decode_keys(location: &str, field: &'static str, raw: &[String]) -> Vec<PairKey> {
    raw.iter()
        .filter_map(|entry| {
            let key = PairKey::decode(entry);
            if key.is_none() {
                tracing::warn!(
                    location = %location,
                    field = field,
                    entry = %entry,
                    "Skipping malformed pair key"
                );
            }
            key
        })
        .collect()
}
