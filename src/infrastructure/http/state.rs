//! Application State
//!
//! 包含所有 Command/Query Handlers 的应用状态

use std::sync::Arc;

use crate::application::{
    // Command handlers
    ClearCombinationsHandler, GetNextCombinationHandler, RecordCombinationHandler,
    ResetIndexHandler,
    // Query handlers
    CheckCombinationHandler, GetCombinationStatsHandler, GetCurrentIndexHandler,
    // Ports
    EngineRegistryPort,
};

/// 应用状态
pub struct AppState {
    // ========== Ports ==========
    pub registry: Arc<dyn EngineRegistryPort>,

    // ========== Command Handlers ==========
    pub record_combination_handler: RecordCombinationHandler,
    pub get_next_combination_handler: GetNextCombinationHandler,
    pub clear_combinations_handler: ClearCombinationsHandler,
    pub reset_index_handler: ResetIndexHandler,

    // ========== Query Handlers ==========
    pub check_combination_handler: CheckCombinationHandler,
    pub get_stats_handler: GetCombinationStatsHandler,
    pub get_current_index_handler: GetCurrentIndexHandler,
}

impl AppState {
    /// 创建应用状态
    pub fn new(registry: Arc<dyn EngineRegistryPort>) -> Self {
        Self {
            registry: registry.clone(),

            // Command handlers
            record_combination_handler: RecordCombinationHandler::new(registry.clone()),
            get_next_combination_handler: GetNextCombinationHandler::new(registry.clone()),
            clear_combinations_handler: ClearCombinationsHandler::new(registry.clone()),
            reset_index_handler: ResetIndexHandler::new(registry.clone()),

            // Query handlers
            check_combination_handler: CheckCombinationHandler::new(registry.clone()),
            get_stats_handler: GetCombinationStatsHandler::new(registry.clone()),
            get_current_index_handler: GetCurrentIndexHandler::new(registry),
        }
    }
}
