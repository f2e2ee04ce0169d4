//! Combination Handlers

use axum::{body::Bytes, extract::State, Json};
use std::sync::Arc;

use crate::application::{
    CheckCombinationQuery, ClearCombinationsCommand, GetCombinationStatsQuery,
    GetCurrentIndexQuery, GetNextCombinationCommand, RecordCombinationCommand, ResetIndexCommand,
};
use crate::domain::combination::Combination;
use crate::infrastructure::http::dto::{
    ApiResponse, CheckCombinationResponse, CombinationRequest, Empty, IndexResponse,
    NextCombinationRequest, NextCombinationResponse, ProjectRequest, StatsResponse,
};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 解析可选的 `{project}` 请求体
///
/// 空请求体使用默认项目；非空但无法解析的请求体一律视为错误请求，
/// 不能回落到默认项目
fn project_of(body: &Bytes) -> Result<Option<String>, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }

    serde_json::from_slice::<ProjectRequest>(body)
        .map(|req| req.project)
        .map_err(|e| ApiError::BadRequest(format!("Invalid request body: {}", e)))
}

// ============================================================================
// Check
// ============================================================================

pub async fn check_combination(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CombinationRequest>,
) -> Result<Json<ApiResponse<CheckCombinationResponse>>, ApiError> {
    let query = CheckCombinationQuery {
        project: req.project,
        combination: Combination::new(req.front, req.mid, req.end),
    };

    let result = state.check_combination_handler.handle(query).await?;

    Ok(Json(ApiResponse::success(result.into())))
}

// ============================================================================
// Record
// ============================================================================

pub async fn record_combination(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CombinationRequest>,
) -> Result<Json<ApiResponse<Empty>>, ApiError> {
    let cmd = RecordCombinationCommand {
        project: req.project,
        combination: Combination::new(req.front, req.mid, req.end),
    };

    state.record_combination_handler.handle(cmd).await?;

    Ok(Json(ApiResponse::ok()))
}

// ============================================================================
// Get Next
// ============================================================================

pub async fn next_combination(
    State(state): State<Arc<AppState>>,
    Json(req): Json<NextCombinationRequest>,
) -> Result<Json<ApiResponse<NextCombinationResponse>>, ApiError> {
    let cmd = GetNextCombinationCommand {
        project: req.project,
        front_assets: req.front_assets,
        mid_assets: req.mid_assets,
        end_assets: req.end_assets,
        current_index: req.current_index,
    };

    let result = state.get_next_combination_handler.handle(cmd).await?;

    Ok(Json(ApiResponse::success(result.into())))
}

// ============================================================================
// Stats / Index
// ============================================================================

pub async fn combination_stats(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<ApiResponse<StatsResponse>>, ApiError> {
    let query = GetCombinationStatsQuery {
        project: project_of(&body)?,
    };

    let result = state.get_stats_handler.handle(query).await?;

    Ok(Json(ApiResponse::success(result.into())))
}

pub async fn current_index(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<ApiResponse<IndexResponse>>, ApiError> {
    let query = GetCurrentIndexQuery {
        project: project_of(&body)?,
    };

    let current_index = state.get_current_index_handler.handle(query).await?;

    Ok(Json(ApiResponse::success(IndexResponse { current_index })))
}

// ============================================================================
// Clear / Reset Index
// ============================================================================

pub async fn clear_combinations(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<ApiResponse<Empty>>, ApiError> {
    let cmd = ClearCombinationsCommand {
        project: project_of(&body)?,
    };

    state.clear_combinations_handler.handle(cmd).await?;

    Ok(Json(ApiResponse::ok()))
}

pub async fn reset_index(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<ApiResponse<Empty>>, ApiError> {
    let cmd = ResetIndexCommand {
        project: project_of(&body)?,
    };

    state.reset_index_handler.handle(cmd).await?;

    Ok(Json(ApiResponse::ok()))
}
