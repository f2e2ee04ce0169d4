//! HTTP Routes
//!
//! API Endpoints:
//! - /api/ping                          GET   健康检查
//! - /api/combination/check             POST  检查组合是否可用
//! - /api/combination/record            POST  记录已使用的组合
//! - /api/combination/next              POST  获取下一个可用组合
//! - /api/combination/stats             POST  组合统计
//! - /api/combination/clear             POST  清除所有组合记录
//! - /api/combination/reset_index       POST  重置遍历索引
//! - /api/combination/index             POST  获取当前遍历索引
//!
//! 所有 combination 接口都接受可选的 `project` 字段

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new().nest("/api", api_routes())
}

/// API 路由
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ping", get(handlers::ping))
        .nest("/combination", combination_routes())
}

/// Combination 路由
fn combination_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/check", post(handlers::check_combination))
        .route("/record", post(handlers::record_combination))
        .route("/next", post(handlers::next_combination))
        .route("/stats", post(handlers::combination_stats))
        .route("/clear", post(handlers::clear_combinations))
        .route("/reset_index", post(handlers::reset_index))
        .route("/index", post(handlers::current_index))
}
