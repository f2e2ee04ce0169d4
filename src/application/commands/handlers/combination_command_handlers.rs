//! Combination Command Handlers

use std::sync::Arc;

use crate::application::commands::combination_commands::*;
use crate::application::error::ApplicationError;
use crate::application::ports::EngineRegistryPort;
use crate::application::services::NextCombination;

/// RecordCombination Handler
pub struct RecordCombinationHandler {
    registry: Arc<dyn EngineRegistryPort>,
}

impl RecordCombinationHandler {
    pub fn new(registry: Arc<dyn EngineRegistryPort>) -> Self {
        Self { registry }
    }

    pub async fn handle(&self, cmd: RecordCombinationCommand) -> Result<(), ApplicationError> {
        let engine = self.registry.resolve(cmd.project.as_deref()).await?;
        engine.record(&cmd.combination).await
    }
}

/// GetNextCombination Handler - 顺序遍历并推进游标
pub struct GetNextCombinationHandler {
    registry: Arc<dyn EngineRegistryPort>,
}

impl GetNextCombinationHandler {
    pub fn new(registry: Arc<dyn EngineRegistryPort>) -> Self {
        Self { registry }
    }

    pub async fn handle(
        &self,
        cmd: GetNextCombinationCommand,
    ) -> Result<NextCombination, ApplicationError> {
        let engine = self.registry.resolve(cmd.project.as_deref()).await?;
        engine
            .get_next(
                &cmd.front_assets,
                &cmd.mid_assets,
                &cmd.end_assets,
                cmd.current_index,
            )
            .await
    }
}

/// ClearCombinations Handler
pub struct ClearCombinationsHandler {
    registry: Arc<dyn EngineRegistryPort>,
}

impl ClearCombinationsHandler {
    pub fn new(registry: Arc<dyn EngineRegistryPort>) -> Self {
        Self { registry }
    }

    pub async fn handle(&self, cmd: ClearCombinationsCommand) -> Result<(), ApplicationError> {
        let engine = self.registry.resolve(cmd.project.as_deref()).await?;
        engine.clear().await
    }
}

/// ResetIndex Handler
pub struct ResetIndexHandler {
    registry: Arc<dyn EngineRegistryPort>,
}

impl ResetIndexHandler {
    pub fn new(registry: Arc<dyn EngineRegistryPort>) -> Self {
        Self { registry }
    }

    pub async fn handle(&self, cmd: ResetIndexCommand) -> Result<(), ApplicationError> {
        let engine = self.registry.resolve(cmd.project.as_deref()).await?;
        engine.reset_index().await
    }
}
