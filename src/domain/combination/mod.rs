//! Combination Context - 组合限界上下文
//!
//! 职责:
//! - 前/中/后三段素材的组合枚举
//! - 相邻片段对去重
//!
//! 纯内存逻辑，不涉及 IO

mod dedup_index;
mod enumerator;
mod errors;
mod value_objects;

pub use dedup_index::{Availability, DedupIndex, RecordOutcome, UnavailableReason};
pub use enumerator::{Enumerator, ScanOutcome};
pub use errors::CombinationError;
pub use value_objects::{Combination, PairKey, ProjectName, SegmentId, PAIR_SEPARATOR};
