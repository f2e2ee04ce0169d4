//! Combination Context - Errors

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CombinationError {
    #[error("无效的项目名称: {0:?}")]
    InvalidProjectName(String),

    #[error("组合空间过大: {front} x {mid} x {end}")]
    SpaceOverflow { front: usize, mid: usize, end: usize },
}
