//! Enumerator - 组合空间的线性遍历
//!
//! 线性索引按 前段优先、中段其次、后段最内层 的顺序映射到三维坐标:
//!
//! ```text
//! front_idx = i / (|mid| * |end|)
//! mid_idx   = (i % (|mid| * |end|)) / |end|
//! end_idx   = i % |end|
//! ```

use super::{CombinationError, Combination, DedupIndex, SegmentId};

/// 扫描结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    /// 找到可用组合
    Found { index: usize, combination: Combination },
    /// 整个循环内没有可用组合
    Exhausted,
    /// 任一素材列表为空
    Empty,
}

/// 三个素材列表的笛卡尔积视图
#[derive(Debug, Clone, Copy)]
pub struct Enumerator<'a> {
    front: &'a [SegmentId],
    mid: &'a [SegmentId],
    end: &'a [SegmentId],
    total: usize,
}

impl<'a> Enumerator<'a> {
    pub fn new(
        front: &'a [SegmentId],
        mid: &'a [SegmentId],
        end: &'a [SegmentId],
    ) -> Result<Self, CombinationError> {
        let total = front
            .len()
            .checked_mul(mid.len())
            .and_then(|n| n.checked_mul(end.len()))
            .ok_or(CombinationError::SpaceOverflow {
                front: front.len(),
                mid: mid.len(),
                end: end.len(),
            })?;

        Ok(Self {
            front,
            mid,
            end,
            total,
        })
    }

    /// 组合总数
    pub fn total(&self) -> usize {
        self.total
    }

    /// 线性索引 → (front_idx, mid_idx, end_idx)
    ///
    /// `index` 必须小于 `total`
    pub fn coordinate(&self, index: usize) -> (usize, usize, usize) {
        let plane = self.mid.len() * self.end.len();
        (
            index / plane,
            (index % plane) / self.end.len(),
            index % self.end.len(),
        )
    }

    pub fn combination_at(&self, index: usize) -> Combination {
        let (f, m, e) = self.coordinate(index);
        Combination {
            front: self.front[f].clone(),
            mid: self.mid[m].clone(),
            end: self.end[e].clone(),
        }
    }

    /// 从 `start` 开始的一整圈线性索引（按 `total` 取模回绕）
    pub fn cycle_from(&self, start: usize) -> impl Iterator<Item = usize> {
        let offset = if self.total == 0 { 0 } else { start % self.total };
        (offset..self.total).chain(0..offset)
    }

    /// 从 `start` 开始循环扫描，返回第一个可用组合
    pub fn scan(&self, start: usize, index: &DedupIndex) -> ScanOutcome {
        if self.total == 0 {
            return ScanOutcome::Empty;
        }

        for i in self.cycle_from(start) {
            let (f, m, e) = self.coordinate(i);
            if index
                .is_available(&self.front[f], &self.mid[m], &self.end[e])
                .available
            {
                return ScanOutcome::Found {
                    index: i,
                    combination: self.combination_at(i),
                };
            }
        }

        ScanOutcome::Exhausted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn ids(names: &[&str]) -> Vec<SegmentId> {
        names.iter().map(|n| SegmentId::new(*n)).collect()
    }

    #[test]
    fn test_coordinate_mapping_is_front_major() {
        let (front, mid, end) = (ids(&["f1", "f2"]), ids(&["m1", "m2", "m3"]), ids(&["e1", "e2"]));
        let enumerator = Enumerator::new(&front, &mid, &end).unwrap();

        assert_eq!(enumerator.total(), 12);
        assert_eq!(enumerator.coordinate(0), (0, 0, 0));
        assert_eq!(enumerator.coordinate(1), (0, 0, 1));
        assert_eq!(enumerator.coordinate(2), (0, 1, 0));
        assert_eq!(enumerator.coordinate(5), (0, 2, 1));
        assert_eq!(enumerator.coordinate(6), (1, 0, 0));
        assert_eq!(enumerator.coordinate(11), (1, 2, 1));
        assert_eq!(enumerator.combination_at(7), Combination::new("f2", "m1", "e2"));
    }

    #[test]
    fn test_full_cycle_visits_every_index_once() {
        let (front, mid, end) = (ids(&["a", "b", "c"]), ids(&["x", "y"]), ids(&["p", "q", "r", "s"]));
        let enumerator = Enumerator::new(&front, &mid, &end).unwrap();

        for start in [0, 1, 7, 23, 24, 100] {
            let visited: Vec<usize> = enumerator.cycle_from(start).collect();
            assert_eq!(visited.len(), 24);
            assert_eq!(visited[0], start % 24);
            let unique: HashSet<usize> = visited.into_iter().collect();
            assert_eq!(unique.len(), 24);
        }
    }

    #[test]
    fn test_scan_on_empty_index_returns_start() {
        let (front, mid, end) = (ids(&["f1", "f2"]), ids(&["m1"]), ids(&["e1", "e2"]));
        let enumerator = Enumerator::new(&front, &mid, &end).unwrap();

        assert_eq!(
            enumerator.scan(0, &DedupIndex::new()),
            ScanOutcome::Found {
                index: 0,
                combination: Combination::new("f1", "m1", "e1"),
            }
        );
        assert_eq!(
            enumerator.scan(3, &DedupIndex::new()),
            ScanOutcome::Found {
                index: 3,
                combination: Combination::new("f2", "m1", "e2"),
            }
        );
    }

    #[test]
    fn test_scan_skips_used_pairs_and_wraps() {
        let (front, mid, end) = (ids(&["f1", "f2"]), ids(&["m1"]), ids(&["e1", "e2"]));
        let enumerator = Enumerator::new(&front, &mid, &end).unwrap();

        let mut index = DedupIndex::new();
        index.record_usage(&Combination::new("f2", "m1", "e1"));

        // 从 2 开始: (f2,m1,e1) 与 (f2,m1,e2) 前中对已用，回绕后
        // (f1,m1,e1) 中后对已用，(f1,m1,e2) 可用
        assert_eq!(
            enumerator.scan(2, &index),
            ScanOutcome::Found {
                index: 1,
                combination: Combination::new("f1", "m1", "e2"),
            }
        );
    }

    #[test]
    fn test_scan_exhausted() {
        let (front, mid, end) = (ids(&["f1"]), ids(&["m1"]), ids(&["e1", "e2"]));
        let enumerator = Enumerator::new(&front, &mid, &end).unwrap();

        let mut index = DedupIndex::new();
        index.record_usage(&Combination::new("f1", "m1", "e1"));

        assert_eq!(enumerator.scan(0, &index), ScanOutcome::Exhausted);
    }

    #[test]
    fn test_scan_with_empty_list() {
        let (front, mid, end) = (ids(&["f1"]), ids(&[]), ids(&["e1"]));
        let enumerator = Enumerator::new(&front, &mid, &end).unwrap();

        assert_eq!(enumerator.total(), 0);
        assert_eq!(enumerator.cycle_from(5).count(), 0);
        assert_eq!(enumerator.scan(0, &DedupIndex::new()), ScanOutcome::Empty);
    }
}
