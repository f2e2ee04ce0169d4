//! Domain Layer - 领域层
//!
//! Combination Context: 三段组合的枚举与相邻对去重

pub mod combination;
