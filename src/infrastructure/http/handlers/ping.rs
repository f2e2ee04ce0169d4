//! Ping Handler
//!
//! 健康检查，同时返回已加载的项目

use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::infrastructure::http::state::AppState;

/// Ping 响应
#[derive(Serialize)]
pub struct PingResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub default_project: String,
    pub loaded_projects: Vec<String>,
}

/// Ping endpoint - 健康检查
pub async fn ping(State(state): State<Arc<AppState>>) -> Json<PingResponse> {
    Json(PingResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        default_project: state.registry.default_project().to_string(),
        loaded_projects: state.registry.loaded_projects(),
    })
}
