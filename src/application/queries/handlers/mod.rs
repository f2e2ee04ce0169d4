//! Query Handlers 实现

mod combination_query_handlers;

pub use combination_query_handlers::*;
